// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// Pointer input as the host delivers it to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release,

    /// The gesture was taken away (e.g. stolen by an ancestor control).
    /// Resets exactly like `Release`.
    Cancel,
}
