// Author: Dustin Pilgrim
// License: MIT

pub mod colour;
pub mod error;
pub mod render;
pub mod style;

pub use error::RenderError;
pub use render::{render_overlay, render_to_pixmap};
pub use style::OverlayStyle;
