//! Output filename convention for montages.
//!
//! Each crop ratio produces one JPEG named after the ratio as a whole
//! percentage:
//! - `0.25` → `tiled_image_with_borders_25_percent.jpg`
//! - `0.9` → `tiled_image_with_borders_90_percent.jpg`
//!
//! The percentage is truncated, not rounded: `0.999` maps to `99`.

/// Whole percentage for a crop ratio (`trunc(ratio * 100)`).
pub fn ratio_percent(ratio: f64) -> u32 {
    (ratio * 100.0) as u32
}

/// Filename of the montage written for `ratio`.
pub fn montage_filename(ratio: f64) -> String {
    format!("tiled_image_with_borders_{}_percent.jpg", ratio_percent(ratio))
}
