// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// What the current drag is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureMode {
    #[default]
    None,
    Move,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
    ResizeTop,
    ResizeBottom,
    ResizeLeft,
    ResizeRight,
}

/// Which edges a resize drags. A corner is two edges, a side is one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl GestureMode {
    /// Corner modes in hit-test priority order.
    pub const CORNERS: [GestureMode; 4] = [
        GestureMode::ResizeTopLeft,
        GestureMode::ResizeTopRight,
        GestureMode::ResizeBottomLeft,
        GestureMode::ResizeBottomRight,
    ];

    pub fn is_active(self) -> bool {
        self != GestureMode::None
    }

    /// `None` for modes that do not resize.
    pub fn edges(self) -> Option<ResizeEdges> {
        let (left, right, top, bottom) = match self {
            GestureMode::None | GestureMode::Move => return None,
            GestureMode::ResizeTopLeft => (true, false, true, false),
            GestureMode::ResizeTopRight => (false, true, true, false),
            GestureMode::ResizeBottomLeft => (true, false, false, true),
            GestureMode::ResizeBottomRight => (false, true, false, true),
            GestureMode::ResizeTop => (false, false, true, false),
            GestureMode::ResizeBottom => (false, false, false, true),
            GestureMode::ResizeLeft => (true, false, false, false),
            GestureMode::ResizeRight => (false, true, false, false),
        };
        Some(ResizeEdges {
            left,
            right,
            top,
            bottom,
        })
    }
}
