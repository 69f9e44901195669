// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};

use rune_cfg::RuneConfig;
use thiserror::Error;

use scanit_core::metrics::{
    check_density, DEFAULT_HEIGHT_FRACTION, DEFAULT_SQUARE_FRACTION, DEFAULT_WIDTH_FRACTION,
};
use scanit_core::{DefaultFrame, EditorMetrics, FrameShape, OverlayKind, ScanitError};
use scanit_overlay::colour::parse_hex;
use scanit_overlay::OverlayStyle;

use crate::paths;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("config error at {key}: {message}")]
    Key { key: &'static str, message: String },
}

fn key_err(key: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Key {
        key,
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanitConfig {
    pub density: f32,
    pub frame_shape: FrameShape,
    pub frame_width: f32,
    pub frame_height: f32,
    pub frame_square: f32,

    pub overlay: OverlayKind,

    // ARGB
    pub dim_colour: Option<u32>,
    pub border_colour: Option<u32>,
    pub handle_colour: Option<u32>,

    pub output_directory: PathBuf,
}

impl Default for ScanitConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            frame_shape: FrameShape::Padded,
            frame_width: DEFAULT_WIDTH_FRACTION,
            frame_height: DEFAULT_HEIGHT_FRACTION,
            frame_square: DEFAULT_SQUARE_FRACTION,
            overlay: OverlayKind::Interactive,
            dim_colour: None,
            border_colour: None,
            handle_colour: None,
            output_directory: paths::default_output_dir(),
        }
    }
}

impl ScanitConfig {
    pub fn default_frame(&self) -> DefaultFrame {
        match self.frame_shape {
            FrameShape::Padded => DefaultFrame::Padded {
                width_fraction: self.frame_width,
                height_fraction: self.frame_height,
            },
            FrameShape::Square => DefaultFrame::Square {
                fraction: self.frame_square,
            },
        }
    }

    /// Editor metrics for this density and frame, validated.
    pub fn metrics(&self) -> Result<EditorMetrics, ScanitError> {
        check_density(self.density)?;
        let metrics =
            EditorMetrics::from_density(self.density).with_default_frame(self.default_frame());
        metrics.validate()?;
        Ok(metrics)
    }

    /// Base look from `overlay`, then any configured colours on top.
    pub fn style(&self, metrics: &EditorMetrics) -> OverlayStyle {
        let mut style = OverlayStyle::for_kind(self.overlay, metrics, self.density);
        if let Some(c) = self.dim_colour {
            style.dim_colour = c;
        }
        if let Some(c) = self.border_colour {
            style.border_colour = c;
        }
        if let Some(c) = self.handle_colour {
            style.handle_colour = c;
        }
        style
    }
}

/// Loads `explicit` if given (it must exist), otherwise the default user
/// config when present, otherwise defaults.
pub fn load(explicit: Option<&Path>) -> Result<ScanitConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = paths::default_config_path();
            if !p.exists() {
                return Ok(ScanitConfig::default());
            }
            p
        }
    };

    let rc = RuneConfig::from_file(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        message: e.to_string(),
    })?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<ScanitConfig, ConfigError> {
    let mut cfg = ScanitConfig::default();

    if !rc.has("scanit") {
        return Ok(cfg);
    }

    if let Some(v) = get_number(rc, "scanit.density")? {
        cfg.density = parse_density(v)?;
    }

    if let Some(s) = get_string(rc, "scanit.frame")? {
        cfg.frame_shape = parse_frame_shape(&s)?;
    }

    if let Some(v) = get_number(rc, "scanit.frame_width")? {
        cfg.frame_width = parse_fraction("scanit.frame_width", v)?;
    }
    if let Some(v) = get_number(rc, "scanit.frame_height")? {
        cfg.frame_height = parse_fraction("scanit.frame_height", v)?;
    }
    if let Some(v) = get_number(rc, "scanit.frame_square")? {
        cfg.frame_square = parse_fraction("scanit.frame_square", v)?;
    }

    if let Some(s) = get_string(rc, "scanit.overlay")? {
        cfg.overlay = parse_overlay(&s)?;
    }

    if let Some(s) = get_string(rc, "scanit.dim_colour")? {
        cfg.dim_colour = Some(parse_colour("scanit.dim_colour", &s)?);
    }
    if let Some(s) = get_string(rc, "scanit.border_colour")? {
        cfg.border_colour = Some(parse_colour("scanit.border_colour", &s)?);
    }
    if let Some(s) = get_string(rc, "scanit.handle_colour")? {
        cfg.handle_colour = Some(parse_colour("scanit.handle_colour", &s)?);
    }

    if let Some(dir) = get_string(rc, "scanit.output_directory")? {
        cfg.output_directory = expand_env(&dir);
    }

    Ok(cfg)
}

fn get_string(rc: &RuneConfig, key: &'static str) -> Result<Option<String>, ConfigError> {
    rc.get_optional::<String>(key)
        .map_err(|e| key_err(key, e.to_string()))
}

fn get_number(rc: &RuneConfig, key: &'static str) -> Result<Option<f64>, ConfigError> {
    rc.get_optional::<f64>(key)
        .map_err(|e| key_err(key, e.to_string()))
}

fn parse_density(v: f64) -> Result<f32, ConfigError> {
    let d = v as f32;
    check_density(d)
        .map_err(|_| key_err("scanit.density", format!("expected a positive number, got {v}")))?;
    Ok(d)
}

fn parse_frame_shape(s: &str) -> Result<FrameShape, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "padded" => Ok(FrameShape::Padded),
        "square" => Ok(FrameShape::Square),
        other => Err(key_err(
            "scanit.frame",
            format!("expected padded|square, got \"{other}\""),
        )),
    }
}

fn parse_overlay(s: &str) -> Result<OverlayKind, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "interactive" => Ok(OverlayKind::Interactive),
        "legacy" => Ok(OverlayKind::Legacy),
        other => Err(key_err(
            "scanit.overlay",
            format!("expected interactive|legacy, got \"{other}\""),
        )),
    }
}

fn parse_fraction(key: &'static str, v: f64) -> Result<f32, ConfigError> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(v as f32)
    } else {
        Err(key_err(key, format!("expected a fraction in (0, 1], got {v}")))
    }
}

fn parse_colour(key: &'static str, s: &str) -> Result<u32, ConfigError> {
    parse_hex(s).map_err(|e| key_err(key, e))
}

fn expand_env(s: &str) -> PathBuf {
    let mut out = s.to_string();

    if out.contains("$env.HOME") {
        if let Ok(home) = env::var("HOME") {
            out = out.replace("$env.HOME", &home);
        }
    }

    PathBuf::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_shapes() {
        assert_eq!(parse_frame_shape(" Square ").unwrap(), FrameShape::Square);
        assert_eq!(parse_frame_shape("padded").unwrap(), FrameShape::Padded);

        let err = parse_frame_shape("round").unwrap_err();
        assert!(err.to_string().contains("scanit.frame"));
        assert!(err.to_string().contains("round"));
    }

    #[test]
    fn overlay_kinds() {
        assert_eq!(parse_overlay("Legacy").unwrap(), OverlayKind::Legacy);
        assert_eq!(parse_overlay(" interactive").unwrap(), OverlayKind::Interactive);

        let err = parse_overlay("fancy").unwrap_err();
        assert!(err.to_string().contains("scanit.overlay"));
    }

    #[test]
    fn fractions_and_density() {
        assert_eq!(parse_fraction("scanit.frame_width", 0.5).unwrap(), 0.5);
        assert_eq!(parse_fraction("scanit.frame_width", 1.0).unwrap(), 1.0);
        assert!(parse_fraction("scanit.frame_width", 0.0).is_err());
        assert!(parse_fraction("scanit.frame_width", 1.5).is_err());
        assert!(parse_fraction("scanit.frame_width", f64::NAN).is_err());

        assert_eq!(parse_density(2.75).unwrap(), 2.75);
        assert!(parse_density(0.0).is_err());
        assert!(parse_density(-1.0).is_err());
    }

    #[test]
    fn colours_name_their_key() {
        assert_eq!(parse_colour("scanit.dim_colour", "#80000000").unwrap(), 0x8000_0000);
        let err = parse_colour("scanit.border_colour", "white").unwrap_err();
        assert!(err.to_string().starts_with("config error at scanit.border_colour"));
    }

    #[test]
    fn home_is_expanded_only_when_set() {
        let p = expand_env("/srv/scans");
        assert_eq!(p, PathBuf::from("/srv/scans"));

        if let Ok(home) = env::var("HOME") {
            let p = expand_env("$env.HOME/scans");
            assert_eq!(p, PathBuf::from(format!("{home}/scans")));
        }
    }

    #[test]
    fn defaults_build_the_stock_editor() {
        let cfg = ScanitConfig::default();
        let metrics = cfg.metrics().unwrap();
        assert_eq!(metrics, EditorMetrics::from_density(1.0));

        let style = cfg.style(&metrics);
        assert_eq!(style, OverlayStyle::for_metrics(&metrics, 1.0));
    }

    #[test]
    fn square_frame_and_colour_overrides() {
        let cfg = ScanitConfig {
            density: 2.0,
            frame_shape: FrameShape::Square,
            frame_square: 0.5,
            dim_colour: Some(0x8000_0000),
            ..ScanitConfig::default()
        };

        let metrics = cfg.metrics().unwrap();
        assert_eq!(metrics.min_crop_size, 240.0);
        assert_eq!(metrics.default_frame, DefaultFrame::Square { fraction: 0.5 });

        let style = cfg.style(&metrics);
        assert_eq!(style.dim_colour, 0x8000_0000);
        assert_eq!(style.handle_radius, 12.0);
    }

    #[test]
    fn bad_density_fails_metrics() {
        let cfg = ScanitConfig {
            density: 0.0,
            ..ScanitConfig::default()
        };
        assert!(cfg.metrics().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.rune");
        assert!(matches!(load(Some(&missing)), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn legacy_overlay_keeps_colour_overrides() {
        let cfg = ScanitConfig {
            overlay: OverlayKind::Legacy,
            border_colour: Some(0xFF00_FF00),
            ..ScanitConfig::default()
        };
        let metrics = cfg.metrics().unwrap();

        let style = cfg.style(&metrics);
        assert_eq!(style.handle_radius, 0.0);
        assert_eq!(style.dim_colour, 0x8000_0000);
        assert_eq!(style.border_colour, 0xFF00_FF00);
    }

    #[test]
    fn loads_a_rune_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scanit.rune");
        std::fs::write(
            &path,
            r##"scanit:
  density 2
  frame "square"
  frame_square 0.5
  overlay "legacy"
  dim_colour "#80000000"
  border_colour "#FF00FF00"
  output_directory "/srv/scans"
end
"##,
        )
        .unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.density, 2.0);
        assert_eq!(cfg.frame_shape, FrameShape::Square);
        assert_eq!(cfg.frame_square, 0.5);
        assert_eq!(cfg.overlay, OverlayKind::Legacy);
        assert_eq!(cfg.dim_colour, Some(0x8000_0000));
        assert_eq!(cfg.border_colour, Some(0xFF00_FF00));
        assert_eq!(cfg.handle_colour, None);
        assert_eq!(cfg.output_directory, PathBuf::from("/srv/scans"));

        let metrics = cfg.metrics().unwrap();
        assert_eq!(metrics.default_frame, DefaultFrame::Square { fraction: 0.5 });
    }

    #[test]
    fn bad_value_in_file_names_its_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scanit.rune");
        std::fs::write(&path, "scanit:\n  frame \"round\"\nend\n").unwrap();

        match load(Some(&path)) {
            Err(ConfigError::Key { key, .. }) => assert_eq!(key, "scanit.frame"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
