// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScanitError {
    #[error("invalid editor metrics: {field} = {value}")]
    InvalidMetrics { field: &'static str, value: f32 },

    #[error("no barcodes detected")]
    NoBarcodes,

    #[error("no EAN/UPC product barcode among {count} detected codes")]
    NoProductBarcodes { count: usize },
}
