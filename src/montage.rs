//! Montage building and writing.
//!
//! Stage 2 of the pipeline. For every configured crop ratio:
//!
//! 1. Take the cell size from the first image's centered square crop
//! 2. Resolve the grid (explicit `[columns, rows]` or the near-square default)
//! 3. Allocate a border-colored canvas and paste each cropped image into its cell
//! 4. Apply the brightness multiplier
//! 5. Encode as JPEG into the output directory
//!
//! ## Layout
//!
//! ```text
//!   cell   border  cell
//! ┌──────┐      ┌──────┐
//! │ 0    │      │ 1    │
//! └──────┘      └──────┘      border
//! ┌──────┐      ┌──────┐
//! │ 2    │      │ 3    │
//! └──────┘      └──────┘
//! ```
//!
//! Borders only appear *between* cells; the canvas has no outer frame.
//!
//! ## Memory
//!
//! Images are decoded one at a time and dropped right after they are pasted,
//! so a pass holds at most one source image plus the canvas.

use crate::config::{ConfigError, MontageConfig};
use crate::imaging::calculations::{canvas_size, cell_origin, resolve_grid, square_size};
use crate::imaging::operations::{
    adjust_brightness, blank_canvas, crop_center_square, fit_to_cell, paste,
};
use crate::imaging::{BackendError, CellFit, ImageBackend, RustBackend};
use crate::naming::montage_filename;
use crate::scan::{self, ImageList, ScanError};
use crate::types::{CellSize, GridSpec, Manifest, MontageOutput};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MontageError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Imaging(#[from] BackendError),
    #[error("Failed to create output directory {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid crop ratio {ratio}: {reason}")]
    InvalidCropRatio { ratio: f64, reason: String },
    #[error("Grid {columns}x{rows} cannot hold {images} images")]
    InvalidGridSpec {
        columns: u32,
        rows: u32,
        images: usize,
    },
    #[error(
        "Montage at crop ratio {crop_ratio} is too large: {}x{} grid of {}px cells with {border}px borders",
        .grid.columns,
        .grid.rows,
        .cell.width
    )]
    CanvasTooLarge {
        crop_ratio: f64,
        grid: GridSpec,
        cell: CellSize,
        border: u32,
    },
    #[error(
        "{path} crops to {}x{}, expected {}x{}",
        .actual.0,
        .actual.1,
        .expected.0,
        .expected.1
    )]
    DimensionMismatch {
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Progress events emitted while montages are built.
#[derive(Debug, Clone, PartialEq)]
pub enum MontageEvent {
    MontageStarted {
        crop_ratio: f64,
        grid: GridSpec,
        cell: CellSize,
        dimensions: (u32, u32),
    },
    ImagePlaced {
        /// 1-based position in the montage
        index: usize,
        source_path: PathBuf,
        x: u32,
        y: u32,
        /// Whether the crop was resized to fit the cell
        resized: bool,
    },
    MontageSaved {
        crop_ratio: f64,
        path: PathBuf,
    },
}

fn emit(events: Option<&Sender<MontageEvent>>, event: MontageEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening.
        tx.send(event).ok();
    }
}

/// Output directory for an input directory: `<input>/<config.output_dir>`.
pub fn output_directory(input_dir: &Path, config: &MontageConfig) -> PathBuf {
    input_dir.join(&config.output_dir)
}

/// Per-ratio layout, computed before any pixels are touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MontagePlan {
    pub crop_ratio: f64,
    pub grid: GridSpec,
    pub cell: CellSize,
    pub dimensions: (u32, u32),
}

/// Plan the montage for one ratio from the first image's dimensions.
pub fn plan_montage(
    backend: &impl ImageBackend,
    images: &ImageList,
    crop_ratio: f64,
    config: &MontageConfig,
) -> Result<MontagePlan, MontageError> {
    if !crop_ratio.is_finite() || crop_ratio <= 0.0 || crop_ratio > 1.0 {
        return Err(MontageError::InvalidCropRatio {
            ratio: crop_ratio,
            reason: "must be in (0, 1]".into(),
        });
    }
    let grid = check_grid(images.len(), config.grid)?;

    let first = images
        .files
        .first()
        .ok_or_else(|| ScanError::NoImagesFound(images.root.clone()))?;
    let dims = backend.identify(first)?;
    let side = square_size(dims.width, crop_ratio);
    if side == 0 {
        return Err(MontageError::InvalidCropRatio {
            ratio: crop_ratio,
            reason: format!(
                "crop of {} ({}px wide) would be empty",
                first.display(),
                dims.width
            ),
        });
    }
    let cell = CellSize {
        width: side,
        height: side,
    };

    let dimensions =
        canvas_size(cell, config.border_size, grid).ok_or(MontageError::CanvasTooLarge {
            crop_ratio,
            grid,
            cell,
            border: config.border_size,
        })?;

    Ok(MontagePlan {
        crop_ratio,
        grid,
        cell,
        dimensions,
    })
}

fn check_grid(count: usize, explicit: Option<GridSpec>) -> Result<GridSpec, MontageError> {
    resolve_grid(count, explicit).ok_or_else(|| {
        let grid = explicit.unwrap_or_else(|| GridSpec::new(0, 0));
        MontageError::InvalidGridSpec {
            columns: grid.columns,
            rows: grid.rows,
            images: count,
        }
    })
}

/// Compose the montage canvas for one plan, brightness included.
pub fn build_montage(
    backend: &impl ImageBackend,
    images: &ImageList,
    plan: &MontagePlan,
    config: &MontageConfig,
    events: Option<&Sender<MontageEvent>>,
) -> Result<RgbImage, MontageError> {
    let (width, height) = plan.dimensions;
    let mut canvas = blank_canvas(width, height, config.border_rgb()?);

    emit(
        events,
        MontageEvent::MontageStarted {
            crop_ratio: plan.crop_ratio,
            grid: plan.grid,
            cell: plan.cell,
            dimensions: plan.dimensions,
        },
    );

    for (index, path) in images.files.iter().enumerate() {
        let decoded = backend.decode(path)?;
        let cropped = crop_center_square(&decoded, plan.crop_ratio).ok_or_else(|| {
            MontageError::InvalidCropRatio {
                ratio: plan.crop_ratio,
                reason: format!(
                    "crop of {} ({}px wide) would be empty",
                    path.display(),
                    decoded.width()
                ),
            }
        })?;
        drop(decoded);

        let actual = cropped.dimensions();
        let expected = (plan.cell.width, plan.cell.height);
        let resized = actual != expected;
        let tile = match (resized, config.cell_fit) {
            (false, _) => cropped,
            (true, CellFit::Resize) => fit_to_cell(cropped, plan.cell),
            (true, CellFit::Strict) => {
                return Err(MontageError::DimensionMismatch {
                    path: path.clone(),
                    expected,
                    actual,
                });
            }
        };

        let (x, y) = cell_origin(index, plan.cell, config.border_size, plan.grid);
        paste(&mut canvas, &tile, x, y);

        emit(
            events,
            MontageEvent::ImagePlaced {
                index: index + 1,
                source_path: path.clone(),
                x,
                y,
                resized,
            },
        );
    }

    adjust_brightness(&mut canvas, config.brightness());
    Ok(canvas)
}

/// Render and write one montage per configured crop ratio.
///
/// Every ratio is planned first, so layout errors (bad grid, empty crop,
/// oversized canvas) leave the filesystem untouched. The output directory is
/// then created (recursively, idempotently). Montages already written stay on
/// disk if a later ratio fails while decoding.
pub fn render_all(
    backend: &impl ImageBackend,
    images: &ImageList,
    output_dir: &Path,
    config: &MontageConfig,
    events: Option<Sender<MontageEvent>>,
) -> Result<Manifest, MontageError> {
    config.validate()?;
    check_grid(images.len(), config.grid)?;
    let plans = config
        .crop_ratios
        .iter()
        .map(|&ratio| plan_montage(backend, images, ratio, config))
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(output_dir).map_err(|source| MontageError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut manifest = Manifest::default();
    for plan in plans {
        let crop_ratio = plan.crop_ratio;
        let canvas = build_montage(backend, images, &plan, config, events.as_ref())?;

        let path = output_dir.join(montage_filename(crop_ratio));
        backend.encode_jpeg(&canvas, &path, config.quality())?;

        emit(
            events.as_ref(),
            MontageEvent::MontageSaved {
                crop_ratio,
                path: path.clone(),
            },
        );
        manifest.push(MontageOutput {
            crop_ratio,
            path,
            grid: plan.grid,
            cell: plan.cell,
            dimensions: plan.dimensions,
        });
    }

    Ok(manifest)
}

/// Run the whole pipeline on an input directory with the production backend.
///
/// Scans first, so an input without images fails before the output directory
/// exists.
pub fn run(
    input_dir: &Path,
    config: &MontageConfig,
    events: Option<Sender<MontageEvent>>,
) -> Result<Manifest, MontageError> {
    let images = scan::scan(input_dir)?;
    let output_dir = output_directory(input_dir, config);
    render_all(&RustBackend::new(), &images, &output_dir, config, events)
}
