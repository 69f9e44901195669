// Author: Dustin Pilgrim
// License: MIT
//
// Interactive crop rectangle: hit-testing, drag resolution and clamping.
//
// The editor owns one rectangle and one gesture mode. The host feeds it
// pointer events and resize notifications on a single thread; every call
// mutates state synchronously and reports back through `EditorHost`.

use crate::event::PointerEvent;
use crate::host::EditorHost;
use crate::metrics::EditorMetrics;
use crate::mode::GestureMode;
use crate::rect::{CropRect, SurfaceSize};

#[derive(Debug, Clone)]
pub struct CropEditor {
    metrics: EditorMetrics,
    surface: SurfaceSize,
    rect: CropRect,
    mode: GestureMode,
    last: (f32, f32),
}

impl CropEditor {
    pub fn new(metrics: EditorMetrics) -> Self {
        Self {
            metrics,
            surface: SurfaceSize::default(),
            rect: CropRect::default(),
            mode: GestureMode::None,
            last: (0.0, 0.0),
        }
    }

    pub fn metrics(&self) -> &EditorMetrics {
        &self.metrics
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Copy of the current rectangle. Editing the copy never reaches the editor.
    pub fn current_rect(&self) -> CropRect {
        self.rect
    }

    /// Minimum width and height actually enforced. Along an axis where the
    /// surface is smaller than `min_crop_size`, the surface extent wins.
    pub fn effective_min_size(&self) -> (f32, f32) {
        let min = self.metrics.min_crop_size;
        (min.min(self.surface.width), min.min(self.surface.height))
    }

    /// Replaces the rectangle with the configured default for the new size.
    pub fn on_surface_resized<H>(&mut self, width: f32, height: f32, host: &mut H)
    where
        H: EditorHost + ?Sized,
    {
        self.surface = SurfaceSize::new(width, height);
        let (min_w, min_h) = self.effective_min_size();
        self.rect = self.metrics.default_frame.place(self.surface, min_w, min_h);
        self.widen_x(Give::High);
        self.widen_y(Give::High);
        host.request_redraw();
    }

    /// Starts a gesture. Returns true when the press was claimed.
    pub fn on_press<H>(&mut self, x: f32, y: f32, host: &mut H) -> bool
    where
        H: EditorHost + ?Sized,
    {
        self.mode = self.hit_test(x, y);
        self.last = (x, y);

        if self.mode.is_active() {
            host.set_intercept_lock(true);
            true
        } else {
            false
        }
    }

    /// Continues the active gesture. Returns false when no gesture is active,
    /// so the host can fall back to its own scroll/pan handling.
    pub fn on_move<H>(&mut self, x: f32, y: f32, host: &mut H) -> bool
    where
        H: EditorHost + ?Sized,
    {
        if !self.mode.is_active() {
            return false;
        }

        // Some hierarchies re-evaluate interception on every event.
        host.set_intercept_lock(true);

        // The gesture stays ours, but a garbage sample must not move anything.
        if !x.is_finite() || !y.is_finite() {
            return true;
        }

        let dx = x - self.last.0;
        let dy = y - self.last.1;

        match self.mode {
            GestureMode::None => {}
            GestureMode::Move => self.move_by(dx, dy),
            mode => {
                if let Some(edges) = mode.edges() {
                    if edges.left {
                        self.resize_left(dx);
                    }
                    if edges.right {
                        self.resize_right(dx);
                    }
                    if edges.top {
                        self.resize_top(dy);
                    }
                    if edges.bottom {
                        self.resize_bottom(dy);
                    }
                }
            }
        }

        self.last = (x, y);
        host.request_redraw();
        true
    }

    /// Ends the gesture. Returns whether one had been active.
    pub fn on_release<H>(&mut self, host: &mut H) -> bool
    where
        H: EditorHost + ?Sized,
    {
        let was_active = self.mode.is_active();
        host.set_intercept_lock(false);
        self.mode = GestureMode::None;
        was_active
    }

    /// Same as release: edits applied by earlier moves are kept.
    pub fn on_cancel<H>(&mut self, host: &mut H) -> bool
    where
        H: EditorHost + ?Sized,
    {
        self.on_release(host)
    }

    pub fn handle_event<H>(&mut self, event: PointerEvent, host: &mut H) -> bool
    where
        H: EditorHost + ?Sized,
    {
        match event {
            PointerEvent::Press { x, y } => self.on_press(x, y, host),
            PointerEvent::Move { x, y } => self.on_move(x, y, host),
            PointerEvent::Release => self.on_release(host),
            PointerEvent::Cancel => self.on_cancel(host),
        }
    }

    /// Mode a press at (x, y) would start. Corners beat edges, edges beat
    /// the body.
    pub fn hit_test(&self, x: f32, y: f32) -> GestureMode {
        let r = self.rect;
        let touch = self.metrics.handle_touch_radius;

        // 1) Corners, fixed priority order.
        for (mode, (cx, cy)) in GestureMode::CORNERS.into_iter().zip(r.corners()) {
            if (x - cx).abs() <= touch && (y - cy).abs() <= touch {
                return mode;
            }
        }

        // 2) Edges.
        let shorter = r.width().min(r.height());
        let edge_slop = self.metrics.edge_slop_base.min(shorter / 3.0);
        let inside_x = x >= r.left && x <= r.right;
        let inside_y = y >= r.top && y <= r.bottom;

        if inside_x && (y - r.top).abs() <= edge_slop {
            return GestureMode::ResizeTop;
        }
        if inside_x && (y - r.bottom).abs() <= edge_slop {
            return GestureMode::ResizeBottom;
        }
        if inside_y && (x - r.left).abs() <= edge_slop {
            return GestureMode::ResizeLeft;
        }
        if inside_y && (x - r.right).abs() <= edge_slop {
            return GestureMode::ResizeRight;
        }

        // 3) Body, inset so the edge bands stay edges.
        let inset = edge_slop.min(shorter / 2.0 - 1.0);
        if r.inset(inset).contains(x, y) {
            return GestureMode::Move;
        }

        GestureMode::None
    }

    /// Translates the rectangle, sliding flush against a bound instead of
    /// stopping when the full delta does not fit.
    fn move_by(&mut self, dx: f32, dy: f32) {
        let r = self.rect;
        let SurfaceSize { width, height } = self.surface;

        let dx = if r.left + dx < 0.0 {
            -r.left
        } else if r.right + dx > width {
            width - r.right
        } else {
            dx
        };

        let dy = if r.top + dy < 0.0 {
            -r.top
        } else if r.bottom + dy > height {
            height - r.bottom
        } else {
            dy
        };

        self.rect.offset(dx, dy);

        // `right + (width - right)` can land an ulp past the bound, and the
        // two offset edges round independently.
        self.rect.right = self.rect.right.min(width);
        self.rect.bottom = self.rect.bottom.min(height);
        self.widen_x(Give::Low);
        self.widen_y(Give::Low);
    }

    fn resize_left(&mut self, dx: f32) {
        let (min_w, _) = self.effective_min_size();
        let max_left = self.rect.right - min_w;
        self.rect.left = clamp_between(self.rect.left + dx, 0.0, max_left);
        self.widen_x(Give::Low);
    }

    fn resize_right(&mut self, dx: f32) {
        let (min_w, _) = self.effective_min_size();
        let min_right = self.rect.left + min_w;
        self.rect.right = clamp_between(self.rect.right + dx, min_right, self.surface.width);
        self.widen_x(Give::High);
    }

    fn resize_top(&mut self, dy: f32) {
        let (_, min_h) = self.effective_min_size();
        let max_top = self.rect.bottom - min_h;
        self.rect.top = clamp_between(self.rect.top + dy, 0.0, max_top);
        self.widen_y(Give::Low);
    }

    fn resize_bottom(&mut self, dy: f32) {
        let (_, min_h) = self.effective_min_size();
        let min_bottom = self.rect.top + min_h;
        self.rect.bottom = clamp_between(self.rect.bottom + dy, min_bottom, self.surface.height);
        self.widen_y(Give::High);
    }

    fn widen_x(&mut self, give: Give) {
        let (min_w, _) = self.effective_min_size();
        let r = &mut self.rect;
        (r.left, r.right) = widen_to_min(r.left, r.right, min_w, self.surface.width, give);
    }

    fn widen_y(&mut self, give: Give) {
        let (_, min_h) = self.effective_min_size();
        let r = &mut self.rect;
        (r.top, r.bottom) = widen_to_min(r.top, r.bottom, min_h, self.surface.height, give);
    }
}

/// Which edge of a span yields first when it has to grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Give {
    Low,
    High,
}

// Rounding in `hi - min` / `lo + min` is a few ulps at most.
const MAX_NUDGES: usize = 64;

/// Grows `[lo, hi]` one ulp at a time until `hi - lo >= min` holds exactly
/// in f32, never leaving `[0, limit]`. The preferred edge moves until it
/// reaches its bound, then the other one does.
fn widen_to_min(mut lo: f32, mut hi: f32, min: f32, limit: f32, give: Give) -> (f32, f32) {
    for _ in 0..MAX_NUDGES {
        if hi - lo >= min {
            break;
        }

        let low_free = lo > 0.0;
        let high_free = hi < limit;
        match (give, low_free, high_free) {
            (Give::Low, true, _) | (Give::High, true, false) => lo = lo.next_down().max(0.0),
            (Give::High, _, true) | (Give::Low, false, true) => hi = hi.next_up().min(limit),
            _ => break,
        }
    }

    // `min` never exceeds `limit`, so the full span always satisfies it.
    if hi - lo < min {
        (0.0, limit)
    } else {
        (lo, hi)
    }
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(EditorMetrics::default())
    }
}

// The invariants keep lo <= hi; unlike f32::clamp this never panics.
fn clamp_between(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use crate::metrics::DefaultFrame;

    fn editor_1000() -> CropEditor {
        let mut ed = CropEditor::default();
        ed.on_surface_resized(1000.0, 1000.0, &mut NullHost);
        ed
    }

    #[test]
    fn fresh_editor_is_idle_and_empty() {
        let ed = CropEditor::default();
        assert_eq!(ed.mode(), GestureMode::None);
        assert_eq!(ed.current_rect(), CropRect::default());
        assert_eq!(ed.metrics(), &EditorMetrics::default());
        assert!(ed.surface().is_empty());
    }

    #[test]
    fn corner_hits_in_priority_order() {
        let ed = editor_1000();
        assert_eq!(ed.hit_test(150.0, 250.0), GestureMode::ResizeTopLeft);
        assert_eq!(ed.hit_test(850.0, 250.0), GestureMode::ResizeTopRight);
        assert_eq!(ed.hit_test(150.0, 750.0), GestureMode::ResizeBottomLeft);
        assert_eq!(ed.hit_test(850.0, 750.0), GestureMode::ResizeBottomRight);
        // Outside the rectangle but within the square touch radius.
        assert_eq!(ed.hit_test(131.0, 231.0), GestureMode::ResizeTopLeft);
    }

    #[test]
    fn top_left_wins_when_corner_zones_overlap() {
        let mut ed = CropEditor::new(EditorMetrics {
            min_crop_size: 10.0,
            handle_touch_radius: 80.0,
            ..EditorMetrics::default()
        });
        // 70 x 50 frame at (15,25)-(85,75): every corner zone covers the centre.
        ed.on_surface_resized(100.0, 100.0, &mut NullHost);
        assert_eq!(ed.hit_test(50.0, 50.0), GestureMode::ResizeTopLeft);
    }

    #[test]
    fn edges_checked_top_bottom_then_left_right() {
        let ed = editor_1000();
        assert_eq!(ed.hit_test(500.0, 260.0), GestureMode::ResizeTop);
        assert_eq!(ed.hit_test(500.0, 740.0), GestureMode::ResizeBottom);
        assert_eq!(ed.hit_test(170.0, 500.0), GestureMode::ResizeLeft);
        assert_eq!(ed.hit_test(830.0, 500.0), GestureMode::ResizeRight);
        // Just outside the rectangle, inside the slop band.
        assert_eq!(ed.hit_test(500.0, 230.0), GestureMode::ResizeTop);
    }

    #[test]
    fn edge_band_requires_span() {
        let ed = editor_1000();
        // Within slop of the top edge line, but left of the rectangle and
        // outside every corner zone.
        assert_eq!(ed.hit_test(100.0, 250.0), GestureMode::None);
    }

    #[test]
    fn body_and_outside() {
        let ed = editor_1000();
        assert_eq!(ed.hit_test(500.0, 500.0), GestureMode::Move);
        assert_eq!(ed.hit_test(20.0, 20.0), GestureMode::None);
    }

    #[test]
    fn edge_slop_shrinks_with_small_rects() {
        let mut m = EditorMetrics::default();
        m.min_crop_size = 30.0;
        m.handle_touch_radius = 1.0;
        m.default_frame = DefaultFrame::Padded {
            width_fraction: 0.3,
            height_fraction: 0.3,
        };
        let mut ed = CropEditor::new(m);
        ed.on_surface_resized(100.0, 100.0, &mut NullHost);
        // 30 x 30 rect at (35,35); slop = min(24, 10) = 10.
        assert_eq!(ed.hit_test(50.0, 44.0), GestureMode::ResizeTop);
        assert_eq!(ed.hit_test(50.0, 46.0), GestureMode::Move);
    }

    #[test]
    fn resize_left_clamps_to_min_size() {
        let mut ed = editor_1000();
        assert!(ed.on_press(150.0, 500.0, &mut NullHost));
        assert_eq!(ed.mode(), GestureMode::ResizeLeft);
        ed.on_move(900.0, 500.0, &mut NullHost);
        let r = ed.current_rect();
        assert_eq!(r.left, 850.0 - 120.0);
        assert_eq!(r.right, 850.0);
    }

    #[test]
    fn resize_bottom_clamps_to_surface() {
        let mut ed = editor_1000();
        ed.on_press(500.0, 750.0, &mut NullHost);
        assert_eq!(ed.mode(), GestureMode::ResizeBottom);
        ed.on_move(500.0, 2000.0, &mut NullHost);
        let r = ed.current_rect();
        assert_eq!(r.bottom, 1000.0);
        assert_eq!(r.top, 250.0);
    }

    #[test]
    fn non_finite_move_is_absorbed() {
        let mut ed = editor_1000();
        ed.on_press(500.0, 500.0, &mut NullHost);
        let before = ed.current_rect();
        assert!(ed.on_move(f32::NAN, 10.0, &mut NullHost));
        assert_eq!(ed.current_rect(), before);
        ed.on_move(510.0, 500.0, &mut NullHost);
        assert_eq!(ed.current_rect().left, before.left + 10.0);
    }

    #[test]
    fn tiny_surface_keeps_invariants() {
        let mut ed = CropEditor::default();
        ed.on_surface_resized(80.0, 60.0, &mut NullHost);
        let r = ed.current_rect();
        assert_eq!(r, CropRect::from_ltrb(0.0, 0.0, 80.0, 60.0));

        ed.on_press(0.0, 0.0, &mut NullHost);
        ed.on_move(40.0, 40.0, &mut NullHost);
        let r = ed.current_rect();
        assert_eq!(r, CropRect::from_ltrb(0.0, 0.0, 80.0, 60.0));
    }

    // 951.82574 + 315 rounds down: the f32 span is 314.99994.
    const SHORT_LO: f32 = 951.825_74;
    const MIN_315: f32 = 315.0;

    #[test]
    fn widen_nudges_the_preferred_edge_by_ulps() {
        let hi = SHORT_LO + MIN_315;
        assert!(hi - SHORT_LO < MIN_315);

        let (lo, grown) = widen_to_min(SHORT_LO, hi, MIN_315, 2000.0, Give::High);
        assert_eq!(lo, SHORT_LO);
        assert!(grown - lo >= MIN_315);
        assert!(grown > hi && grown - hi < 1e-3);

        let (shrunk, h) = widen_to_min(SHORT_LO, hi, MIN_315, 2000.0, Give::Low);
        assert_eq!(h, hi);
        assert!(h - shrunk >= MIN_315);
        assert!(shrunk < SHORT_LO);
    }

    #[test]
    fn widen_falls_back_to_the_free_edge() {
        let hi = SHORT_LO + MIN_315;

        // High edge already on the bound: the low edge gives way.
        let (lo, h) = widen_to_min(SHORT_LO, hi, MIN_315, hi, Give::High);
        assert_eq!(h, hi);
        assert!(h - lo >= MIN_315);

        // Low edge at 0: the high edge gives way.
        let short = MIN_315.next_down();
        assert_eq!(
            widen_to_min(0.0, short, MIN_315, 1000.0, Give::Low),
            (0.0, MIN_315)
        );

        // Minimum equal to the whole extent pins the span to it.
        assert_eq!(widen_to_min(0.0, 99.0, 100.0, 100.0, Give::Low), (0.0, 100.0));

        // Spans that already fit are untouched.
        assert_eq!(widen_to_min(5.0, 500.0, 120.0, 1000.0, Give::Low), (5.0, 500.0));
    }

    #[test]
    fn fractional_density_resize_keeps_exact_minimum() {
        let mut ed = CropEditor::new(EditorMetrics::from_density(2.625));
        ed.on_surface_resized(1079.3, 1917.7, &mut NullHost);
        let min = ed.effective_min_size().1;
        assert_eq!(min, MIN_315);

        // Drag the bottom edge far past the top: it stops at top + min.
        let r = ed.current_rect();
        assert!(ed.on_press(r.center().0, r.bottom, &mut NullHost));
        assert_eq!(ed.mode(), GestureMode::ResizeBottom);
        ed.on_move(r.center().0, -5000.0, &mut NullHost);

        let after = ed.current_rect();
        assert_eq!(after.top, r.top);
        assert!(after.height() >= min, "{after:?}");
    }
}
