//! Shared value types used across the scan, geometry and montage stages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Square crop region in source-image coordinates.
///
/// Coordinates are signed: when the square is taller than the source image,
/// `top` is negative and `bottom` exceeds the height. The part of the box that
/// falls outside the source is filled with black when cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }
}

/// Montage layout as `[columns, rows]`.
///
/// Serialized as a two-element array so it reads naturally in a TOML config:
/// `grid = [3, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }
}

impl From<[u32; 2]> for GridSpec {
    fn from([columns, rows]: [u32; 2]) -> Self {
        Self { columns, rows }
    }
}

impl From<GridSpec> for [u32; 2] {
    fn from(grid: GridSpec) -> Self {
        [grid.columns, grid.rows]
    }
}

/// Pixel size of one montage cell (one cropped image, without border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// One written montage.
#[derive(Debug, Clone, PartialEq)]
pub struct MontageOutput {
    pub crop_ratio: f64,
    pub path: PathBuf,
    pub grid: GridSpec,
    pub cell: CellSize,
    /// Canvas dimensions (width, height)
    pub dimensions: (u32, u32),
}

/// Ordered list of montages written by one run, one entry per crop ratio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub outputs: Vec<MontageOutput>,
}

impl Manifest {
    pub fn push(&mut self, output: MontageOutput) {
        self.outputs.push(output);
    }

    /// Output file paths in the order they were written.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.outputs.iter().map(|o| o.path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
