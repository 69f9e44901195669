// Author: Dustin Pilgrim
// License: MIT

use scanit_core::{EditorMetrics, OverlayKind};

const DIM_ARGB: u32 = 0x9900_0000;
const LEGACY_DIM_ARGB: u32 = 0x8000_0000;
const WHITE_ARGB: u32 = 0xFFFF_FFFF;

const BORDER_WIDTH_DP: f32 = 2.0;

/// Everything `render_overlay` needs besides the editor itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub dim_colour: u32,
    pub border_colour: u32,
    pub border_width: f32,
    pub handle_colour: u32,

    /// 0 hides the handles.
    pub handle_radius: f32,
    pub anti_alias: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            dim_colour: DIM_ARGB,
            border_colour: WHITE_ARGB,
            border_width: BORDER_WIDTH_DP,
            handle_colour: WHITE_ARGB,
            handle_radius: EditorMetrics::default().handle_visual_radius,
            anti_alias: true,
        }
    }
}

impl OverlayStyle {
    pub fn for_metrics(metrics: &EditorMetrics, density: f32) -> Self {
        Self {
            border_width: BORDER_WIDTH_DP * density,
            handle_radius: metrics.handle_visual_radius,
            ..Self::default()
        }
    }

    /// The old square-only overlay: lighter mask, no handles.
    pub fn legacy(density: f32) -> Self {
        Self {
            dim_colour: LEGACY_DIM_ARGB,
            border_width: BORDER_WIDTH_DP * density,
            handle_radius: 0.0,
            ..Self::default()
        }
    }

    pub fn for_kind(kind: OverlayKind, metrics: &EditorMetrics, density: f32) -> Self {
        match kind {
            OverlayKind::Interactive => Self::for_metrics(metrics, density),
            OverlayKind::Legacy => Self::legacy(density),
        }
    }
}
