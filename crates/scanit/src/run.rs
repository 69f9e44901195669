// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eventline::{debug, info};
use image::GenericImageView;

use scanit_core::{select_product_code, CropEditor, FrameShape, PointerEvent, SurfaceSize};

use crate::cli::{Args, Cmd};
use crate::config::{self, ScanitConfig};
use crate::crop::{self, ViewTransform};
use crate::gestures::{self, ScriptHost};
use crate::lookup::{resolve_evaluation, DirectorySource, LocalRepository, ProductSource};
use crate::paths;
use crate::preview;
use crate::print;

pub fn run(args: Args) -> Result<(), String> {
    debug!("parsed args: {:?}", args.cmd);

    let mut cfg = config::load(args.config.as_deref()).map_err(|e| format!("{e}"))?;
    debug!("config: {:?}", cfg);

    match args.cmd {
        Cmd::Frame { surface, shape } => {
            override_shape(&mut cfg, shape);
            run_frame(&cfg, surface)
        }

        Cmd::Crop {
            image,
            surface,
            gestures,
            script_file,
            output,
            preview,
            shape,
            overlay,
        } => {
            override_shape(&mut cfg, shape);
            if let Some(overlay) = overlay {
                cfg.overlay = overlay;
            }
            let events = collect_events(&gestures, script_file.as_deref())?;
            run_crop(&cfg, &image, surface, &events, output, preview.as_deref())
        }

        Cmd::Lookup { store, codes } => {
            let code = select_product_code(&codes).map_err(|e| format!("{e}"))?;
            info!("selected product code {code} from {} symbol(s)", codes.len());

            let local = LocalRepository::default();
            let dir_source = store.map(DirectorySource::new);
            if let Some(src) = &dir_source {
                debug!("product store: {}", src.dir().display());
            }
            let remote = dir_source.as_ref().map(|s| s as &dyn ProductSource);

            let evaluation = resolve_evaluation(&code, remote, &local);
            print::print_evaluation(&evaluation);
            Ok(())
        }
    }
}

fn override_shape(cfg: &mut ScanitConfig, shape: Option<FrameShape>) {
    if let Some(shape) = shape {
        cfg.frame_shape = shape;
    }
}

fn run_frame(cfg: &ScanitConfig, surface: SurfaceSize) -> Result<(), String> {
    let metrics = cfg.metrics().map_err(|e| format!("{e}"))?;

    let mut host = ScriptHost::default();
    let mut editor = CropEditor::new(metrics);
    editor.on_surface_resized(surface.width, surface.height, &mut host);

    println!("{}", print::format_rect(&editor.current_rect()));
    Ok(())
}

/// `-g` scripts in order, then the script file.
fn collect_events(scripts: &[String], file: Option<&Path>) -> Result<Vec<PointerEvent>, String> {
    let mut events = Vec::new();

    for (i, src) in scripts.iter().enumerate() {
        let parsed = gestures::parse_script(src).map_err(|e| format!("-g #{}: {e}", i + 1))?;
        events.extend(parsed);
    }

    if let Some(path) = file {
        let src = std::fs::read_to_string(path)
            .map_err(|e| format!("read script {}: {e}", path.display()))?;
        let parsed =
            gestures::parse_script(&src).map_err(|e| format!("{}: {e}", path.display()))?;
        events.extend(parsed);
    }

    Ok(events)
}

fn run_crop(
    cfg: &ScanitConfig,
    image_path: &Path,
    surface: Option<SurfaceSize>,
    events: &[PointerEvent],
    output: Option<PathBuf>,
    preview_path: Option<&Path>,
) -> Result<(), String> {
    let metrics = cfg.metrics().map_err(|e| format!("{e}"))?;

    let img = image::open(image_path)
        .map_err(|e| format!("open image {}: {e}", image_path.display()))?;
    let (iw, ih) = img.dimensions();
    info!("loaded {} ({iw}x{ih})", image_path.display());

    let surface = surface.unwrap_or_else(|| SurfaceSize::new(iw as f32, ih as f32));
    let transform = ViewTransform::fit_center(iw, ih, surface);
    debug!("surface {:?}, transform {:?}", surface, transform);

    let mut host = ScriptHost::default();
    let mut editor = CropEditor::new(metrics);
    editor.on_surface_resized(surface.width, surface.height, &mut host);
    let style = cfg.style(editor.metrics());
    debug!("overlay {:?}: {:?}", cfg.overlay, style);

    let handled = gestures::replay(&mut editor, events, &mut host);
    let rect = editor.current_rect();
    info!(
        "replayed {} event(s), {handled} handled, {} redraw(s); rect {}",
        events.len(),
        host.redraws,
        print::format_rect(&rect)
    );

    if let Some(path) = preview_path {
        let shot = preview::compose_preview(&img, &transform, &editor, &style)
            .map_err(|e| format!("preview: {e}"))?;
        paths::ensure_parent_dir(path).map_err(|e| format!("create preview dir: {e}"))?;
        shot.save(path)
            .map_err(|e| format!("save preview {}: {e}", path.display()))?;
        info!("preview written to {}", path.display());
    }

    let region = crop::crop_region(rect, &transform, iw, ih).map_err(|e| format!("{e}"))?;
    let cropped = crop::crop_image(&img, region).map_err(|e| format!("{e}"))?;

    let out_path = output.unwrap_or_else(|| {
        let dir = paths::effective_output_dir(&cfg.output_directory);
        paths::cropped_file_name(&dir, image_path)
    });
    crop::save_image(&cropped, &out_path)
        .map_err(|e| format!("save {}: {e}", out_path.display()))?;

    info!(
        "cropped {} -> {} ({})",
        image_path.display(),
        out_path.display(),
        print::format_region(&region)
    );

    // user-facing output
    println!("{}", out_path.display());
    Ok(())
}
