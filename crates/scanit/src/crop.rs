// Author: Dustin Pilgrim
// License: MIT
//
// Maps the editor's surface-space rectangle back onto the source bitmap and
// cuts it out.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use scanit_core::{CropRect, SurfaceSize};
use thiserror::Error;

use crate::paths::ensure_parent_dir;

/// Rectangles smaller than this (surface px, either axis) are not cropped.
pub const MIN_CROP_EXTENT: f32 = 10.0;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("crop area too small: {width}x{height} (minimum 10px per side)")]
    TooSmall { width: f32, height: f32 },

    #[error("image transform is not invertible")]
    Singular,

    #[error("crop area is empty after clamping to the {width}x{height} image")]
    Empty { width: u32, height: u32 },

    #[error("crop region {x},{y} {w}x{h} exceeds the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },

    #[error("image: {0}")]
    Image(#[from] image::ImageError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Bitmap px -> surface px: `surface = bitmap * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Uniform scale that fits the whole image inside the surface, centered.
    /// Scales up as well as down.
    pub fn fit_center(image_w: u32, image_h: u32, surface: SurfaceSize) -> Self {
        let (iw, ih) = (image_w as f32, image_h as f32);
        let scale = (surface.width / iw).min(surface.height / ih);

        Self {
            scale_x: scale,
            scale_y: scale,
            translate_x: (surface.width - iw * scale) * 0.5,
            translate_y: (surface.height - ih * scale) * 0.5,
        }
    }

    pub fn invert(&self) -> Result<Self, CropError> {
        let ok = |s: f32| s.is_finite() && s != 0.0;
        if !ok(self.scale_x) || !ok(self.scale_y) {
            return Err(CropError::Singular);
        }

        Ok(Self {
            scale_x: 1.0 / self.scale_x,
            scale_y: 1.0 / self.scale_y,
            translate_x: -self.translate_x / self.scale_x,
            translate_y: -self.translate_y / self.scale_y,
        })
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale_x + self.translate_x,
            y * self.scale_y + self.translate_y,
        )
    }

    /// Bounding box of the mapped rectangle (sorted even under a flip).
    pub fn map_rect(&self, r: CropRect) -> CropRect {
        let (x0, y0) = self.map_point(r.left, r.top);
        let (x1, y1) = self.map_point(r.right, r.bottom);
        CropRect::from_ltrb(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    pub fn to_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(
            self.scale_x,
            0.0,
            0.0,
            self.scale_y,
            self.translate_x,
            self.translate_y,
        )
    }
}

/// Integer source-bitmap region, always inside the image it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Surface rectangle -> bitmap region.
pub fn crop_region(
    rect: CropRect,
    transform: &ViewTransform,
    image_w: u32,
    image_h: u32,
) -> Result<PixelRegion, CropError> {
    // Negated so NaN extents are rejected too.
    if !(rect.width() >= MIN_CROP_EXTENT && rect.height() >= MIN_CROP_EXTENT) {
        return Err(CropError::TooSmall {
            width: rect.width(),
            height: rect.height(),
        });
    }

    let mapped = transform.invert()?.map_rect(rect);

    let (iw, ih) = (image_w as f32, image_h as f32);
    let left = mapped.left.max(0.0).min(iw);
    let top = mapped.top.max(0.0).min(ih);
    let right = mapped.right.max(0.0).min(iw);
    let bottom = mapped.bottom.max(0.0).min(ih);

    let width = (right - left) as u32;
    let height = (bottom - top) as u32;
    if width == 0 || height == 0 {
        return Err(CropError::Empty {
            width: image_w,
            height: image_h,
        });
    }

    Ok(PixelRegion {
        x: left as u32,
        y: top as u32,
        width,
        height,
    })
}

pub fn crop_image(img: &DynamicImage, region: PixelRegion) -> Result<DynamicImage, CropError> {
    let (iw, ih) = img.dimensions();

    let fits = region.width > 0
        && region.height > 0
        && region.x.checked_add(region.width).is_some_and(|r| r <= iw)
        && region.y.checked_add(region.height).is_some_and(|b| b <= ih);
    if !fits {
        return Err(CropError::OutOfBounds {
            x: region.x,
            y: region.y,
            w: region.width,
            h: region.height,
            width: iw,
            height: ih,
        });
    }

    Ok(img.crop_imm(region.x, region.y, region.width, region.height))
}

pub fn save_image(img: &DynamicImage, out_path: &Path) -> Result<(), CropError> {
    ensure_parent_dir(out_path)?;
    img.save(out_path)?;
    Ok(())
}
