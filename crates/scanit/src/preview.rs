// Author: Dustin Pilgrim
// License: MIT
//
// Preview = source image placed on the surface + crop overlay on top.
// tiny-skia stores premultiplied RGBA; the image crate expects straight alpha.

use image::{DynamicImage, RgbaImage};
use scanit_core::CropEditor;
use scanit_overlay::{render_overlay, OverlayStyle, RenderError};
use tiny_skia::{Color, ColorU8, FilterQuality, Pixmap, PixmapPaint};

use crate::crop::ViewTransform;

const BACKDROP: Color = Color::BLACK;

pub fn image_to_pixmap(img: &DynamicImage) -> Result<Pixmap, RenderError> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let mut pixmap = Pixmap::new(w, h).ok_or(RenderError::Layer {
        width: w,
        height: h,
    })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}

pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut out = RgbaImage::new(w, h);

    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }

    out
}

/// Renders what the user would see: the image fitted to the editor surface
/// over a black backdrop, then the overlay.
pub fn compose_preview(
    img: &DynamicImage,
    transform: &ViewTransform,
    editor: &CropEditor,
    style: &OverlayStyle,
) -> Result<RgbaImage, RenderError> {
    let surface = editor.surface();
    let (w, h) = (surface.width.ceil() as u32, surface.height.ceil() as u32);
    if surface.is_empty() {
        return Err(RenderError::EmptySurface {
            width: w,
            height: h,
        });
    }

    let source = image_to_pixmap(img)?;
    let mut canvas = Pixmap::new(w, h).ok_or(RenderError::Layer {
        width: w,
        height: h,
    })?;
    canvas.fill(BACKDROP);

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, source.as_ref(), &paint, transform.to_skia(), None);

    render_overlay(editor, style, &mut canvas.as_mut())?;

    Ok(pixmap_to_image(&canvas))
}
