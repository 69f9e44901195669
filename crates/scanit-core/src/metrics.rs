// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::error::ScanitError;
use crate::rect::{CropRect, SurfaceSize};

// Density-independent sizes, multiplied by the display density.
pub const MIN_CROP_SIZE_DP: f32 = 120.0;
pub const HANDLE_TOUCH_RADIUS_DP: f32 = 20.0;
pub const HANDLE_VISUAL_RADIUS_DP: f32 = 6.0;
pub const EDGE_SLOP_DP: f32 = 24.0;

// Default frame: 70% x 50% of the surface, or a square at 65% of the shorter side.
pub const DEFAULT_WIDTH_FRACTION: f32 = 0.70;
pub const DEFAULT_HEIGHT_FRACTION: f32 = 0.50;
pub const DEFAULT_SQUARE_FRACTION: f32 = 0.65;

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameShape {
    #[default]
    Padded,
    Square,
}

/// Which overlay look the host draws around the rectangle.
#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    /// Darker mask, border and corner handles.
    #[default]
    Interactive,
    /// Lighter mask and border only.
    Legacy,
}

/// Shape of the rectangle placed on every surface resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DefaultFrame {
    /// Centered, covering the given fractions of width and height.
    Padded {
        width_fraction: f32,
        height_fraction: f32,
    },

    /// Centered square covering `fraction` of the shorter side.
    Square { fraction: f32 },
}

impl Default for DefaultFrame {
    fn default() -> Self {
        DefaultFrame::Padded {
            width_fraction: DEFAULT_WIDTH_FRACTION,
            height_fraction: DEFAULT_HEIGHT_FRACTION,
        }
    }
}

impl DefaultFrame {
    pub fn square() -> Self {
        DefaultFrame::Square {
            fraction: DEFAULT_SQUARE_FRACTION,
        }
    }

    /// Centered rectangle for `surface`, at least `min_w` x `min_h` and never
    /// larger than the surface.
    pub fn place(&self, surface: SurfaceSize, min_w: f32, min_h: f32) -> CropRect {
        let (w, h) = match *self {
            DefaultFrame::Padded {
                width_fraction,
                height_fraction,
            } => (
                surface.width * width_fraction,
                surface.height * height_fraction,
            ),
            DefaultFrame::Square { fraction } => {
                let side = surface.shorter_side() * fraction;
                (side, side)
            }
        };

        let w = w.max(min_w).min(surface.width);
        let h = h.max(min_h).min(surface.height);
        let left = (surface.width - w) * 0.5;
        let top = (surface.height - h) * 0.5;

        CropRect::from_ltrb(left, top, left + w, top + h)
    }
}

/// Pixel sizes the editor works with, resolved once from display density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorMetrics {
    pub min_crop_size: f32,

    /// Hit-test tolerance around each corner (square, per axis).
    pub handle_touch_radius: f32,

    /// Drawn handle radius. Independent of the touch radius.
    pub handle_visual_radius: f32,

    /// Largest distance from an edge that still starts an edge drag.
    pub edge_slop_base: f32,

    pub default_frame: DefaultFrame,
}

impl Default for EditorMetrics {
    fn default() -> Self {
        Self::from_density(1.0)
    }
}

impl EditorMetrics {
    pub fn from_density(density: f32) -> Self {
        Self {
            min_crop_size: MIN_CROP_SIZE_DP * density,
            handle_touch_radius: HANDLE_TOUCH_RADIUS_DP * density,
            handle_visual_radius: HANDLE_VISUAL_RADIUS_DP * density,
            edge_slop_base: EDGE_SLOP_DP * density,
            default_frame: DefaultFrame::default(),
        }
    }

    pub fn with_default_frame(mut self, frame: DefaultFrame) -> Self {
        self.default_frame = frame;
        self
    }

    pub fn validate(&self) -> Result<(), ScanitError> {
        check_size("min_crop_size", self.min_crop_size)?;
        check_size("handle_touch_radius", self.handle_touch_radius)?;
        check_size("handle_visual_radius", self.handle_visual_radius)?;
        check_size("edge_slop_base", self.edge_slop_base)?;

        match self.default_frame {
            DefaultFrame::Padded {
                width_fraction,
                height_fraction,
            } => {
                check_fraction("width_fraction", width_fraction)?;
                check_fraction("height_fraction", height_fraction)?;
            }
            DefaultFrame::Square { fraction } => check_fraction("fraction", fraction)?,
        }

        Ok(())
    }
}

/// Validates a display density before it is used to build metrics.
pub fn check_density(density: f32) -> Result<(), ScanitError> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(ScanitError::InvalidMetrics {
            field: "density",
            value: density,
        })
    }
}

fn check_size(field: &'static str, value: f32) -> Result<(), ScanitError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScanitError::InvalidMetrics { field, value })
    }
}

fn check_fraction(field: &'static str, value: f32) -> Result<(), ScanitError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ScanitError::InvalidMetrics { field, value })
    }
}
