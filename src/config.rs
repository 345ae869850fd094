//! Montage configuration.
//!
//! Every setting has a default, and the command-line tool always runs with
//! [`MontageConfig::default`]. Library callers build a `MontageConfig`
//! directly, or load a TOML file from an explicit path with
//! [`load_config_file`], which overrides any subset of the defaults:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! crop_ratios = [0.25, 0.9]   # One montage per ratio, fraction of image width
//! border_size = 2             # Pixels between cells
//! border_color = "black"      # Named color, "#rgb" or "#rrggbb"
//! # grid = [3, 2]             # [columns, rows]; omit for a near-square grid
//! brightness = 1.3            # Multiplier applied to the finished montage
//! jpeg_quality = 75           # 1-100
//! cell_fit = "resize"         # "resize" or "strict" for mixed-size inputs
//! output_dir = "output"       # Created inside the input directory
//! ```
//!
//! Unknown keys are rejected to catch typos early. Nothing is ever read from
//! the input directory, so an unrelated `config.toml` next to the photos has
//! no effect.

use crate::imaging::{Brightness, CellFit, Quality};
use crate::types::GridSpec;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one montage run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MontageConfig {
    /// Crop ratios to render, in order. Each produces one output file.
    pub crop_ratios: Vec<f64>,
    /// Border width in pixels between neighbouring cells.
    pub border_size: u32,
    /// Border (and background) color.
    pub border_color: String,
    /// Explicit `[columns, rows]`; when absent the grid is derived from the image count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    /// Brightness multiplier applied to the finished canvas.
    pub brightness: f32,
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u32,
    /// How to handle images whose crop differs from the first image's cell size.
    pub cell_fit: CellFit,
    /// Output directory name, relative to the input directory.
    pub output_dir: String,
}

impl Default for MontageConfig {
    fn default() -> Self {
        Self {
            crop_ratios: vec![0.25, 0.9],
            border_size: 2,
            border_color: "black".to_string(),
            grid: None,
            brightness: 1.3,
            jpeg_quality: 75,
            cell_fit: CellFit::default(),
            output_dir: "output".to_string(),
        }
    }
}

impl MontageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop_ratios.is_empty() {
            return Err(ConfigError::Validation(
                "crop_ratios must not be empty".into(),
            ));
        }
        for &ratio in &self.crop_ratios {
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(ConfigError::Validation(format!(
                    "crop_ratios values must be in (0, 1], got {ratio}"
                )));
            }
        }
        if let Some(grid) = self.grid {
            if grid.columns == 0 || grid.rows == 0 {
                return Err(ConfigError::Validation(
                    "grid values must be non-zero".into(),
                ));
            }
        }
        if !self.brightness.is_finite() || self.brightness < 0.0 {
            return Err(ConfigError::Validation(
                "brightness must be a non-negative number".into(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Validation(
                "jpeg_quality must be 1-100".into(),
            ));
        }
        parse_color(&self.border_color)?;
        let mut components = Path::new(&self.output_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "output_dir must be a plain directory name, got {:?}",
                    self.output_dir
                )));
            }
        }
        Ok(())
    }

    /// Parsed border color.
    pub fn border_rgb(&self) -> Result<Rgb<u8>, ConfigError> {
        parse_color(&self.border_color)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.jpeg_quality)
    }

    pub fn brightness(&self) -> Brightness {
        Brightness::new(self.brightness)
    }
}

/// Parse a color as a name (`black`, `white`, `gray`/`grey`, `red`, `green`,
/// `blue`) or a hex string (`#rgb`, `#rrggbb`). Case-insensitive.
pub fn parse_color(value: &str) -> Result<Rgb<u8>, ConfigError> {
    let lower = value.trim().to_ascii_lowercase();
    let named = match lower.as_str() {
        "black" => Some([0, 0, 0]),
        "white" => Some([255, 255, 255]),
        "gray" | "grey" => Some([128, 128, 128]),
        "red" => Some([255, 0, 0]),
        "green" => Some([0, 128, 0]),
        "blue" => Some([0, 0, 255]),
        _ => None,
    };
    if let Some(rgb) = named {
        return Ok(Rgb(rgb));
    }

    let invalid = || ConfigError::Validation(format!("unrecognized border_color {value:?}"));
    let hex = lower.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                let digit = channel(&hex[i..i + 1])?;
                *slot = digit * 17;
            }
            Ok(Rgb(rgb))
        }
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(MontageConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a TOML file as a raw value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MontageConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MontageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a montage config from an explicit TOML file.
///
/// Merges the file on top of stock defaults, rejects unknown keys, and
/// validates the result. A missing file is an [`ConfigError::Io`] error.
pub fn load_config_file(path: &Path) -> Result<MontageConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, Some(overlay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = MontageConfig::default();
        assert_eq!(config.crop_ratios, vec![0.25, 0.9]);
        assert_eq!(config.border_size, 2);
        assert_eq!(config.border_color, "black");
        assert_eq!(config.grid, None);
        assert_eq!(config.brightness, 1.3);
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.cell_fit, CellFit::Resize);
        assert_eq!(config.output_dir, "output");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(MontageConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config: MontageConfig = toml::from_str("border_size = 10\n").unwrap();
        assert_eq!(config.border_size, 10);
        assert_eq!(config.crop_ratios, vec![0.25, 0.9]);
    }

    #[test]
    fn parse_grid_and_cell_fit() {
        let toml = r#"
grid = [4, 2]
cell_fit = "strict"
"#;
        let config: MontageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.grid, Some(GridSpec::new(4, 2)));
        assert_eq!(config.cell_fit, CellFit::Strict);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<MontageConfig, _> = toml::from_str("border_width = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_empty_ratios() {
        let config = MontageConfig {
            crop_ratios: vec![],
            ..MontageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ratio_bounds() {
        for bad in [0.0, -0.5, 1.01, f64::NAN] {
            let config = MontageConfig {
                crop_ratios: vec![bad],
                ..MontageConfig::default()
            };
            assert!(config.validate().is_err(), "ratio {bad} accepted");
        }
        let config = MontageConfig {
            crop_ratios: vec![1.0],
            ..MontageConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_grid() {
        let config = MontageConfig {
            grid: Some(GridSpec::new(0, 3)),
            ..MontageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_negative_brightness() {
        let config = MontageConfig {
            brightness: -1.0,
            ..MontageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_quality_range() {
        for (quality, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let config = MontageConfig {
                jpeg_quality: quality,
                ..MontageConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "quality {quality}");
        }
    }

    #[test]
    fn validate_output_dir_must_be_plain_name() {
        for bad in ["", "../out", "/tmp/out", "a/b", "."] {
            let config = MontageConfig {
                output_dir: bad.to_string(),
                ..MontageConfig::default()
            };
            assert!(config.validate().is_err(), "output_dir {bad:?} accepted");
        }
    }

    // =========================================================================
    // Colors
    // =========================================================================

    #[test]
    fn parse_named_colors() {
        assert_eq!(parse_color("black").unwrap(), Rgb([0, 0, 0]));
        assert_eq!(parse_color("White").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("grey").unwrap(), Rgb([128, 128, 128]));
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_color("#ff8000").unwrap(), Rgb([255, 128, 0]));
        assert_eq!(parse_color("#FFF").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("#102").unwrap(), Rgb([17, 0, 34]));
    }

    #[test]
    fn parse_invalid_colors() {
        for bad in ["", "purple-ish", "#12", "#12345g", "123456", "#ébcdef"] {
            assert!(parse_color(bad).is_err(), "color {bad:?} accepted");
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn merge_toml_overlay_wins() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn resolve_config_without_overlay_is_default() {
        let config = resolve_config(stock_defaults_value().unwrap(), None).unwrap();
        assert_eq!(config, MontageConfig::default());
    }

    #[test]
    fn load_config_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            load_config_file(&tmp.path().join("montage.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn load_config_file_reads_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("montage.toml");
        fs::write(
            &path,
            r##"
crop_ratios = [0.5]
border_color = "#ffffff"
grid = [2, 3]
brightness = 1.0
"##,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.crop_ratios, vec![0.5]);
        assert_eq!(config.border_rgb().unwrap(), Rgb([255, 255, 255]));
        assert_eq!(config.grid, Some(GridSpec::new(2, 3)));
        assert_eq!(config.brightness, 1.0);
        // Unspecified values keep their defaults
        assert_eq!(config.border_size, 2);
    }

    #[test]
    fn load_config_file_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("montage.toml");
        fs::write(&path, "crop_ratios = [").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_file_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("montage.toml");
        fs::write(&path, "crop_ratios = [1.5]\n").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
