// Author: Dustin Pilgrim
// License: MIT

pub mod editor;
pub mod error;
pub mod event;
pub mod host;
pub mod metrics;
pub mod mode;
pub mod product;
pub mod rect;

pub use editor::CropEditor;
pub use error::ScanitError;
pub use event::PointerEvent;
pub use host::{EditorHost, NullHost};
pub use metrics::{DefaultFrame, EditorMetrics, FrameShape, OverlayKind};
pub use mode::GestureMode;
pub use product::{
    select_product_code, BarcodeFormat, DecodedBarcode, HealthLevel, ProductEvaluation,
};
pub use rect::{CropRect, SurfaceSize};
