// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface is empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("failed to allocate {width}x{height} layer")]
    Layer { width: u32, height: u32 },
}
