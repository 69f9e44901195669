// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::ScanitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLevel {
    Healthy,
    Moderate,
    Unhealthy,
}

impl HealthLevel {
    /// Indicator colour shown next to the score (ARGB).
    pub fn indicator_colour(self) -> u32 {
        match self {
            HealthLevel::Healthy => 0xFF4C_AF50,
            HealthLevel::Moderate => 0xFFFF_C107,
            HealthLevel::Unhealthy => 0xFFF4_4336,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthLevel::Healthy => "healthy",
            HealthLevel::Moderate => "moderate",
            HealthLevel::Unhealthy => "unhealthy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Some(HealthLevel::Healthy),
            "moderate" => Some(HealthLevel::Moderate),
            "unhealthy" => Some(HealthLevel::Unhealthy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEvaluation {
    pub barcode: String,
    pub product_name: String,

    /// 0 (worst) to 100 (best).
    pub health_score: u8,
    pub level: HealthLevel,
    pub explanation: String,

    /// Short comparison against healthier or less healthy alternatives.
    pub compare_hint: Option<String>,
}

/// Symbologies a barcode decoder may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeFormat {
    Ean8,
    Ean13,
    UpcA,
    UpcE,
    QrCode,
    DataMatrix,
    Code128,
    Other,
}

impl BarcodeFormat {
    /// Retail product codes (EAN/UPC) are the only ones we can look up.
    pub fn is_product_code(self) -> bool {
        matches!(
            self,
            BarcodeFormat::Ean8 | BarcodeFormat::Ean13 | BarcodeFormat::UpcA | BarcodeFormat::UpcE
        )
    }

    pub fn parse(s: &str) -> Option<Self> {
        let f = match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "ean8" => BarcodeFormat::Ean8,
            "ean13" => BarcodeFormat::Ean13,
            "upca" => BarcodeFormat::UpcA,
            "upce" => BarcodeFormat::UpcE,
            "qr" | "qrcode" => BarcodeFormat::QrCode,
            "datamatrix" => BarcodeFormat::DataMatrix,
            "code128" => BarcodeFormat::Code128,
            "other" => BarcodeFormat::Other,
            _ => return None,
        };
        Some(f)
    }
}

/// One symbol as handed over by the (external) decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBarcode {
    pub format: BarcodeFormat,
    pub raw_value: Option<String>,
}

impl DecodedBarcode {
    pub fn new(format: BarcodeFormat, raw_value: impl Into<String>) -> Self {
        Self {
            format,
            raw_value: Some(raw_value.into()),
        }
    }
}

/// First usable product code: EAN/UPC format, trimmed, non-blank.
pub fn select_product_code(barcodes: &[DecodedBarcode]) -> Result<String, ScanitError> {
    if barcodes.is_empty() {
        return Err(ScanitError::NoBarcodes);
    }

    barcodes
        .iter()
        .filter(|b| b.format.is_product_code())
        .filter_map(|b| b.raw_value.as_deref().map(str::trim))
        .find(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ScanitError::NoProductBarcodes {
            count: barcodes.len(),
        })
}
