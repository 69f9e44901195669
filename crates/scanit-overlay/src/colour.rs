// colour.rs
// Author: Dustin Pilgrim
// License: MIT
//
// ARGB helpers shared by the overlay style and the config parser.
// Format: 0xAARRGGBB

use tiny_skia::Color;

#[inline]
pub fn a(argb: u32) -> u8 { ((argb >> 24) & 0xFF) as u8 }
#[inline]
pub fn r(argb: u32) -> u8 { ((argb >> 16) & 0xFF) as u8 }
#[inline]
pub fn g(argb: u32) -> u8 { ((argb >> 8) & 0xFF) as u8 }
#[inline]
pub fn b(argb: u32) -> u8 { (argb & 0xFF) as u8 }

#[inline]
pub fn to_skia(argb: u32) -> Color {
    Color::from_rgba8(r(argb), g(argb), b(argb), a(argb))
}

/// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
pub fn parse_hex(s: &str) -> Result<u32, String> {
    let s = s.trim();

    let Some(hex) = s.strip_prefix('#') else {
        return Err("colour must start with #".into());
    };

    // from_str_radix alone would also take a sign.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("invalid hex colour".into());
    }

    let value = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex colour".to_string())?;

    match hex.len() {
        6 => Ok(0xFF00_0000 | value),
        8 => Ok(value),
        _ => Err("colour must be 6 or 8 hex digits (RRGGBB or AARRGGBB)".into()),
    }
}
