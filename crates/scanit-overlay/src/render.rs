// Author: Dustin Pilgrim
// License: MIT

use scanit_core::{CropEditor, CropRect};
use tiny_skia::{
    BlendMode, FillRule, Paint, PathBuilder, Pixmap, PixmapMut, PixmapPaint, Rect, Stroke,
    Transform,
};

use crate::colour;
use crate::error::RenderError;
use crate::style::OverlayStyle;

/// Draws the crop overlay on top of whatever `target` already holds.
///
/// Order:
/// 1. dim mask over the whole surface,
/// 2. transparent hole over the crop rectangle (cut on an off-screen layer,
///    so the target outside the rectangle only ever sees the mask),
/// 3. border stroke,
/// 4. one filled circle per corner.
pub fn render_overlay(
    editor: &CropEditor,
    style: &OverlayStyle,
    target: &mut PixmapMut<'_>,
) -> Result<(), RenderError> {
    let (w, h) = (target.width(), target.height());
    let rect = editor.current_rect();

    let mut layer = Pixmap::new(w, h).ok_or(RenderError::Layer {
        width: w,
        height: h,
    })?;
    layer.fill(colour::to_skia(style.dim_colour));

    let hole = skia_rect(rect);
    if let Some(hole) = hole {
        let mut clear = Paint::default();
        clear.blend_mode = BlendMode::Clear;
        clear.anti_alias = style.anti_alias;
        layer.fill_rect(hole, &clear, Transform::identity(), None);
    }

    target.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    if let Some(hole) = hole {
        if style.border_width > 0.0 {
            let path = PathBuilder::from_rect(hole);
            let paint = solid(style.border_colour, style.anti_alias);
            let stroke = Stroke {
                width: style.border_width,
                ..Stroke::default()
            };
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    if style.handle_radius > 0.0 {
        let paint = solid(style.handle_colour, style.anti_alias);
        for (cx, cy) in rect.corners() {
            if let Some(circle) = PathBuilder::from_circle(cx, cy, style.handle_radius) {
                target.fill_path(
                    &circle,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    Ok(())
}

/// Renders the overlay alone onto a fresh transparent pixmap sized to the
/// editor's surface.
pub fn render_to_pixmap(editor: &CropEditor, style: &OverlayStyle) -> Result<Pixmap, RenderError> {
    let surface = editor.surface();
    let w = surface.width.ceil() as u32;
    let h = surface.height.ceil() as u32;
    if surface.is_empty() {
        return Err(RenderError::EmptySurface {
            width: w,
            height: h,
        });
    }

    let mut pixmap = Pixmap::new(w, h).ok_or(RenderError::Layer {
        width: w,
        height: h,
    })?;
    render_overlay(editor, style, &mut pixmap.as_mut())?;
    Ok(pixmap)
}

fn skia_rect(r: CropRect) -> Option<Rect> {
    Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn solid(argb: u32, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(colour::to_skia(argb));
    paint.anti_alias = anti_alias;
    paint
}
