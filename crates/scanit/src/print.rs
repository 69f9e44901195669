// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write as _;

use scanit_core::{CropRect, ProductEvaluation};

use crate::crop::PixelRegion;

pub fn format_rect(r: &CropRect) -> String {
    format!(
        "{:.1},{:.1} {:.1}x{:.1} (ltrb {:.1} {:.1} {:.1} {:.1})",
        r.left,
        r.top,
        r.width(),
        r.height(),
        r.left,
        r.top,
        r.right,
        r.bottom
    )
}

pub fn format_region(r: &PixelRegion) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.width, r.height)
}

pub fn format_evaluation(ev: &ProductEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "barcode: {}", ev.barcode);
    let _ = writeln!(out, "product: {}", ev.product_name);
    let _ = writeln!(
        out,
        "score:   {}/100 ({}, #{:06X})",
        ev.health_score,
        ev.level.label(),
        ev.level.indicator_colour() & 0x00FF_FFFF
    );
    if !ev.explanation.is_empty() {
        let _ = writeln!(out, "about:   {}", ev.explanation);
    }
    if let Some(hint) = ev.compare_hint.as_deref().filter(|h| !h.trim().is_empty()) {
        let _ = writeln!(out, "compare: {hint}");
    }
    out
}

pub fn print_evaluation(ev: &ProductEvaluation) {
    print!("{}", format_evaluation(ev));
}
