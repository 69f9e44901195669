// Author: Dustin Pilgrim
// License: MIT

/// Callbacks the editor issues back into its host.
pub trait EditorHost {
    /// State changed; the host should schedule a repaint.
    fn request_redraw(&mut self);

    /// Ask ancestors to stop (true) or resume (false) intercepting pointer
    /// events while a drag is in progress.
    fn set_intercept_lock(&mut self, enabled: bool);
}

/// Host that ignores every request. Useful for headless geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl EditorHost for NullHost {
    fn request_redraw(&mut self) {}

    fn set_intercept_lock(&mut self, _enabled: bool) {}
}
