//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are shared by
//! the configuration layer (which can parse them from TOML) and the
//! [`operations`](super::operations) module (which applies them to pixels).
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`Brightness`] — Per-channel multiplier for the finished canvas (default 1.3).
//! - [`CellFit`] — What to do when a cropped image does not match the cell size.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Brightness multiplier.
///
/// `1.0` leaves the image unchanged, `0.0` produces black, values above `1.0`
/// brighten. Negative and non-finite factors are clamped to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness(f32);

impl Brightness {
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.max(0.0))
        } else {
            Self(0.0)
        }
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    pub fn is_identity(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(1.3)
    }
}

/// Policy for cropped images whose size differs from the montage cell.
///
/// The cell size is taken from the first image. With uniform inputs both
/// policies behave identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFit {
    /// Resize every cropped image to the cell size (Lanczos3).
    #[default]
    Resize,
    /// Fail with a dimension mismatch error.
    Strict,
}
