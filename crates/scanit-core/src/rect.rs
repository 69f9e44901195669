// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface-local coordinates.
///
/// Same space as pointer events and rendering: origin top-left, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CropRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    pub fn offset(&mut self, dx: f32, dy: f32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Shrinks (or grows, for negative `d`) the rectangle by `d` on every side.
    pub fn inset(&self, d: f32) -> Self {
        Self {
            left: self.left + d,
            top: self.top + d,
            right: self.right - d,
            bottom: self.bottom - d,
        }
    }

    /// Half-open containment: the right and bottom edges are excluded and an
    /// empty or inverted rectangle contains nothing.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && px >= self.left
            && px < self.right
            && py >= self.top
            && py < self.bottom
    }

    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.left, self.top),
            (self.right, self.top),
            (self.left, self.bottom),
            (self.right, self.bottom),
        ]
    }

    pub fn is_within(&self, surface: SurfaceSize) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= surface.width
            && self.bottom <= surface.height
    }
}

/// Size of the rendered surface the editor lives on, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Non-finite or negative extents collapse to 0.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn shorter_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = CropRect::from_ltrb(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(19.9, 19.9));
        assert!(!r.contains(20.0, 15.0));
        assert!(!r.contains(15.0, 20.0));
    }

    #[test]
    fn inverted_rect_contains_nothing() {
        let r = CropRect::from_ltrb(10.0, 10.0, 20.0, 20.0).inset(6.0);
        assert!(r.left > r.right);
        assert!(!r.contains(15.0, 15.0));
    }

    #[test]
    fn negative_inset_grows() {
        let r = CropRect::from_ltrb(10.0, 10.0, 20.0, 20.0).inset(-2.0);
        assert_eq!(r, CropRect::from_ltrb(8.0, 8.0, 22.0, 22.0));
    }

    #[test]
    fn surface_size_sanitizes() {
        let s = SurfaceSize::new(f32::NAN, -5.0);
        assert_eq!(s, SurfaceSize::default());
        assert!(s.is_empty());
    }
}
