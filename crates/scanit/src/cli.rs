// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scanit_core::{BarcodeFormat, DecodedBarcode, FrameShape, OverlayKind, SurfaceSize};

#[derive(Debug, Parser)]
#[command(name = "scanit", version, about = "Scanit: crop a product photo, look up its barcode.")]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/scanit/scanit.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/scanit/scanit.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Print the default crop rectangle for a surface
    Frame {
        /// Surface size in pixels, e.g. 1080x1920
        #[arg(long, value_parser = parse_surface)]
        surface: SurfaceSize,

        /// Override the configured default frame shape
        #[arg(long)]
        shape: Option<FrameShape>,
    },

    /// Fit an image to a surface, replay gestures, write the crop
    Crop {
        /// Source image
        image: PathBuf,

        /// Surface size in pixels (default: the image's own size)
        #[arg(long, value_parser = parse_surface)]
        surface: Option<SurfaceSize>,

        /// Gesture script, e.g. "press 150 250; move 100 100; release" (repeatable)
        #[arg(short = 'g', long = "gesture")]
        gestures: Vec<String>,

        /// Read more gestures from a file (run after any -g scripts)
        #[arg(long)]
        script_file: Option<PathBuf>,

        /// Output path (default: <output dir>/<name>-crop.png)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Also write the surface with the overlay drawn on top
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Override the configured default frame shape
        #[arg(long)]
        shape: Option<FrameShape>,

        /// Override the configured overlay look used for --preview
        #[arg(long)]
        overlay: Option<OverlayKind>,
    },

    /// Pick the product code from decoded barcodes and evaluate it
    Lookup {
        /// Directory of <barcode>.rune product documents
        #[arg(long)]
        store: Option<PathBuf>,

        /// Decoded symbols as format:value, e.g. ean13:5901234123457
        #[arg(required = true, value_parser = parse_code)]
        codes: Vec<DecodedBarcode>,
    },
}

/// `WxH` with positive, finite extents.
pub fn parse_surface(s: &str) -> Result<SurfaceSize, String> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got \"{s}\""))?;

    let dim = |v: &str| -> Result<f32, String> {
        let n = v
            .trim()
            .parse::<f32>()
            .map_err(|_| format!("bad surface extent \"{v}\""))?;
        if n.is_finite() && n > 0.0 {
            Ok(n)
        } else {
            Err(format!("surface extent must be positive, got {v}"))
        }
    };

    Ok(SurfaceSize::new(dim(w)?, dim(h)?))
}

/// `format:value`. The value is kept raw; trimming happens at selection.
pub fn parse_code(s: &str) -> Result<DecodedBarcode, String> {
    let (format, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected format:value, got \"{s}\""))?;

    let format = BarcodeFormat::parse(format).ok_or_else(|| {
        format!(
            "unknown barcode format \"{format}\" \
             (ean8, ean13, upca, upce, qr, datamatrix, code128, other)"
        )
    })?;

    Ok(DecodedBarcode::new(format, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn surfaces() {
        assert_eq!(parse_surface("1080x1920").unwrap(), SurfaceSize::new(1080.0, 1920.0));
        assert_eq!(parse_surface(" 800X600 ").unwrap(), SurfaceSize::new(800.0, 600.0));
        assert!(parse_surface("1080").is_err());
        assert!(parse_surface("0x100").is_err());
        assert!(parse_surface("-5x100").is_err());
        assert!(parse_surface("infx100").is_err());
    }

    #[test]
    fn codes() {
        let c = parse_code("ean13:5901234123457").unwrap();
        assert_eq!(c, DecodedBarcode::new(BarcodeFormat::Ean13, "5901234123457"));

        // URLs keep everything after the first colon.
        let c = parse_code("qr:https://example.com").unwrap();
        assert_eq!(c.raw_value.as_deref(), Some("https://example.com"));

        assert!(parse_code("5901234123457").is_err());
        assert!(parse_code("pdf417:123").is_err());
    }

    #[test]
    fn crop_command_collects_repeated_gestures() {
        let args = Args::try_parse_from([
            "scanit",
            "-v",
            "crop",
            "shelf.jpg",
            "--surface",
            "1000x1000",
            "-g",
            "press 150 250",
            "-g",
            "move 100 100; release",
            "--shape",
            "square",
            "--overlay",
            "legacy",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.cmd {
            Cmd::Crop {
                image,
                surface,
                gestures,
                shape,
                overlay,
                output,
                ..
            } => {
                assert_eq!(image, PathBuf::from("shelf.jpg"));
                assert_eq!(surface, Some(SurfaceSize::new(1000.0, 1000.0)));
                assert_eq!(gestures.len(), 2);
                assert_eq!(shape, Some(FrameShape::Square));
                assert_eq!(overlay, Some(OverlayKind::Legacy));
                assert_eq!(output, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn lookup_needs_a_code() {
        assert!(Args::try_parse_from(["scanit", "lookup"]).is_err());

        let args = Args::try_parse_from(["scanit", "lookup", "qr:x", "ean8:96385074"]).unwrap();
        match args.cmd {
            Cmd::Lookup { codes, store } => {
                assert_eq!(codes.len(), 2);
                assert_eq!(store, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
