//! CLI output formatting for all pipeline stages.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Images (4)
//! 001 a.jpg
//! 002 b.jpg
//! ```
//!
//! ## Montage
//!
//! ```text
//! 25% crop: 2x2 grid, 25x25 cells → 52x52
//!     001 a.jpg at (0, 0)
//!     002 b.jpg at (27, 0) resized
//!     Saved: output/tiled_image_with_borders_25_percent.jpg
//! ```
//!
//! ## Summary
//!
//! ```text
//! Wrote 2 montages
//!     tiled_image_with_borders_25_percent.jpg (52x52)
//!     tiled_image_with_borders_90_percent.jpg (182x182)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure and
//! do no I/O.

use crate::montage::MontageEvent;
use crate::naming::ratio_percent;
use crate::scan::ImageList;
use crate::types::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Path shown relative to `base` when it lives underneath it.
fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format the list of images that will be tiled, in tiling order.
pub fn format_scan_output(images: &ImageList) -> Vec<String> {
    let mut lines = vec![format!("Images ({})", images.len())];
    for (i, name) in images.filenames().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
    }
    lines
}

pub fn print_scan_output(images: &ImageList) {
    for line in format_scan_output(images) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Montage events
// ============================================================================

/// Format a single montage progress event.
///
/// Paths are shown relative to `input_dir` where possible.
pub fn format_montage_event(event: &MontageEvent, input_dir: &Path) -> Vec<String> {
    match event {
        MontageEvent::MontageStarted {
            crop_ratio,
            grid,
            cell,
            dimensions,
        } => vec![format!(
            "{}% crop: {}x{} grid, {}x{} cells \u{2192} {}x{}",
            ratio_percent(*crop_ratio),
            grid.columns,
            grid.rows,
            cell.width,
            cell.height,
            dimensions.0,
            dimensions.1
        )],
        MontageEvent::ImagePlaced {
            index,
            source_path,
            x,
            y,
            resized,
        } => {
            let mut line = format!(
                "{}{} {} at ({}, {})",
                indent(1),
                format_index(*index),
                file_name(source_path),
                x,
                y
            );
            if *resized {
                line.push_str(" resized");
            }
            vec![line]
        }
        MontageEvent::MontageSaved { path, .. } => vec![format!(
            "{}Saved: {}",
            indent(1),
            display_relative(path, input_dir)
        )],
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the manifest of written montages.
pub fn format_manifest(manifest: &Manifest) -> Vec<String> {
    let noun = if manifest.len() == 1 {
        "montage"
    } else {
        "montages"
    };
    let mut lines = vec![format!("Wrote {} {}", manifest.len(), noun)];
    for output in &manifest.outputs {
        lines.push(format!(
            "{}{} ({}x{})",
            indent(1),
            output.path.display(),
            output.dimensions.0,
            output.dimensions.1
        ));
    }
    lines
}

pub fn print_manifest(manifest: &Manifest) {
    for line in format_manifest(manifest) {
        println!("{}", line);
    }
}
