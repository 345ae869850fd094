//! # Colony Crop
//!
//! Crops every photo in a directory to a centered square and tiles the
//! squares into a bordered montage, once per crop ratio.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan     photos/   →  ImageList   (sorted png/jpg/jpeg files)
//! 2. Montage  ImageList →  photos/output/tiled_image_with_borders_<p>_percent.jpg
//! ```
//!
//! The montage stage repeats for each configured crop ratio (25% and 90% by
//! default) and returns a [`types::Manifest`] of the files it wrote.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists and sorts the input images |
//! | [`montage`] | Stage 2 — plans, composes, brightens and writes each montage |
//! | [`config`] | `MontageConfig` defaults, validation, TOML loading for library callers |
//! | [`types`] | Shared value types (`CropBox`, `GridSpec`, `Manifest`) |
//! | [`naming`] | Output filename convention |
//! | [`imaging`] | Crop/grid geometry, pixel operations, codec backend |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Crop Geometry
//!
//! The square's side is a fraction of the image *width*, even for portrait
//! images. When the square is taller than a landscape image, the missing rows
//! are filled with black rather than shrinking the square, so every crop of a
//! given width has the same size.
//!
//! ## Uniform Cells
//!
//! The cell size comes from the first image (in filename order). Images whose
//! crop differs are resized to the cell by default; `cell_fit = "strict"`
//! turns that into an error instead.
//!
//! ## One Image In Memory
//!
//! Images are decoded one by one and released after pasting, so memory use is
//! bounded by the largest source image plus the canvas, regardless of how many
//! files the directory holds.

pub mod config;
pub mod imaging;
pub mod montage;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
