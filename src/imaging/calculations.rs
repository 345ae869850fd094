//! Pure geometry for cropping and tiling.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::types::{CellSize, CropBox, GridSpec};

/// Side length of the square crop: `floor(width * ratio)`.
pub fn square_size(width: u32, ratio: f64) -> u32 {
    (width as f64 * ratio).floor() as u32
}

/// Calculate the centered square crop box for an image.
///
/// The side length is `floor(width * ratio)`. Offsets use floor division so
/// that `right - left == bottom - top == side` for every input, including
/// squares taller than the image (negative `top`).
///
/// # Examples
/// ```
/// # use colony_crop::imaging::calculations::crop_box;
/// let b = crop_box(100, 80, 0.5);
/// assert_eq!((b.left, b.top, b.right, b.bottom), (25, 15, 75, 65));
/// ```
pub fn crop_box(width: u32, height: u32, ratio: f64) -> CropBox {
    let side = square_size(width, ratio) as i64;
    let (w, h) = (width as i64, height as i64);
    CropBox {
        left: (w - side).div_euclid(2),
        top: (h - side).div_euclid(2),
        right: (w + side).div_euclid(2),
        bottom: (h + side).div_euclid(2),
    }
}

/// Smallest near-square grid that holds `count` images.
///
/// `columns = ceil(sqrt(count))`, `rows = ceil(count / columns)`.
/// A count of zero is treated as one.
pub fn auto_grid(count: usize) -> GridSpec {
    let count = count.max(1) as u64;
    let mut columns = (count as f64).sqrt() as u64;
    // Float sqrt may land one off for large counts; settle on the exact ceiling.
    while columns * columns < count {
        columns += 1;
    }
    while columns > 1 && (columns - 1) * (columns - 1) >= count {
        columns -= 1;
    }
    let rows = count.div_ceil(columns);
    GridSpec::new(columns as u32, rows as u32)
}

/// Resolve the grid for `count` images, honoring an explicit override.
///
/// Returns `None` when the override has fewer cells than images.
pub fn resolve_grid(count: usize, explicit: Option<GridSpec>) -> Option<GridSpec> {
    match explicit {
        Some(grid) if grid.columns == 0 || grid.rows == 0 => None,
        Some(grid) if grid.capacity() < count as u64 => None,
        Some(grid) => Some(grid),
        None => Some(auto_grid(count)),
    }
}

/// Canvas dimensions: `((cell_w + border) * columns - border, (cell_h + border) * rows - border)`.
///
/// Returns `None` when either side overflows `u32` or the RGB8 buffer would
/// not fit in memory addressable by `usize`.
pub fn canvas_size(cell: CellSize, border: u32, grid: GridSpec) -> Option<(u32, u32)> {
    let side = |cell_side: u32, count: u32| {
        cell_side
            .checked_add(border)?
            .checked_mul(count)?
            .checked_sub(border)
    };
    let width = side(cell.width, grid.columns)?;
    let height = side(cell.height, grid.rows)?;

    let bytes = u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(3)?;
    usize::try_from(bytes).ok()?;
    Some((width, height))
}

/// Top-left corner of the cell at `index` (row-major order).
pub fn cell_origin(index: usize, cell: CellSize, border: u32, grid: GridSpec) -> (u32, u32) {
    let columns = grid.columns.max(1) as usize;
    let x = (index % columns) as u32 * (cell.width + border);
    let y = (index / columns) as u32 * (cell.height + border);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(w: u32, h: u32) -> CellSize {
        CellSize {
            width: w,
            height: h,
        }
    }

    // =========================================================================
    // crop_box tests
    // =========================================================================

    #[test]
    fn crop_quarter_of_square_image() {
        let b = crop_box(100, 100, 0.25);
        assert_eq!((b.left, b.top, b.right, b.bottom), (37, 37, 62, 62));
        assert_eq!(b.width(), 25);
        assert_eq!(b.height(), 25);
    }

    #[test]
    fn crop_is_square_and_centered_for_odd_sizes() {
        for (w, h, r) in [(101, 77, 0.3), (640, 480, 0.9), (33, 500, 0.25), (7, 7, 1.0)] {
            let b = crop_box(w, h, r);
            let side = square_size(w, r);
            assert_eq!(b.width(), side, "{w}x{h}@{r}");
            assert_eq!(b.height(), side, "{w}x{h}@{r}");
            // Centered: left + right == width (within rounding)
            assert!((b.left + b.right - w as i64).abs() <= 1, "{w}x{h}@{r}");
        }
    }

    #[test]
    fn crop_taller_than_image_has_negative_top() {
        // 100x50 at 0.9 → side 90, extends 20px above and below
        let b = crop_box(100, 50, 0.9);
        assert_eq!((b.left, b.top, b.right, b.bottom), (5, -20, 95, 70));
    }

    #[test]
    fn crop_floor_division_on_negative_odd_offset() {
        // (51 - 90) / 2 floors to -20, not -19
        let b = crop_box(100, 51, 0.9);
        assert_eq!(b.top, -20);
        assert_eq!(b.bottom, 70);
        assert_eq!(b.height(), 90);
    }

    #[test]
    fn square_size_floors() {
        assert_eq!(square_size(99, 0.25), 24);
        assert_eq!(square_size(3, 0.25), 0);
    }

    // =========================================================================
    // Grid tests
    // =========================================================================

    #[test]
    fn auto_grid_values() {
        assert_eq!(auto_grid(1), GridSpec::new(1, 1));
        assert_eq!(auto_grid(2), GridSpec::new(2, 1));
        assert_eq!(auto_grid(4), GridSpec::new(2, 2));
        assert_eq!(auto_grid(5), GridSpec::new(3, 2));
        assert_eq!(auto_grid(10), GridSpec::new(4, 3));
        assert_eq!(auto_grid(16), GridSpec::new(4, 4));
        assert_eq!(auto_grid(17), GridSpec::new(5, 4));
    }

    #[test]
    fn auto_grid_always_fits() {
        for n in 1..=500usize {
            let grid = auto_grid(n);
            let expected_cols = (n as f64).sqrt().ceil() as u32;
            assert_eq!(grid.columns, expected_cols, "n={n}");
            assert_eq!(grid.rows, (n as u32).div_ceil(expected_cols), "n={n}");
            assert!(grid.capacity() >= n as u64, "n={n}");
        }
    }

    #[test]
    fn resolve_grid_accepts_large_enough_override() {
        assert_eq!(
            resolve_grid(6, Some(GridSpec::new(6, 1))),
            Some(GridSpec::new(6, 1))
        );
    }

    #[test]
    fn resolve_grid_rejects_small_override() {
        assert_eq!(resolve_grid(7, Some(GridSpec::new(3, 2))), None);
        assert_eq!(resolve_grid(1, Some(GridSpec::new(0, 2))), None);
    }

    #[test]
    fn resolve_grid_without_override_is_auto() {
        assert_eq!(resolve_grid(9, None), Some(GridSpec::new(3, 3)));
    }

    // =========================================================================
    // Canvas and placement tests
    // =========================================================================

    #[test]
    fn canvas_size_accounts_for_inner_borders() {
        assert_eq!(
            canvas_size(cell(25, 25), 2, GridSpec::new(2, 2)),
            Some((52, 52))
        );
        assert_eq!(
            canvas_size(cell(30, 20), 5, GridSpec::new(3, 2)),
            Some((100, 45))
        );
    }

    #[test]
    fn canvas_overflow_is_none() {
        assert_eq!(
            canvas_size(cell(25, 25), u32::MAX / 2, GridSpec::new(2, 2)),
            None
        );
        assert_eq!(
            canvas_size(cell(25, 25), 2, GridSpec::new(4_000_000_000, 1)),
            None
        );
        assert_eq!(canvas_size(cell(u32::MAX, 1), 1, GridSpec::new(1, 1)), None);
    }

    #[test]
    fn canvas_single_cell_has_no_border() {
        assert_eq!(
            canvas_size(cell(90, 90), 10, GridSpec::new(1, 1)),
            Some((90, 90))
        );
    }

    #[test]
    fn cell_origin_row_major() {
        let grid = GridSpec::new(3, 2);
        let c = cell(10, 20);
        assert_eq!(cell_origin(0, c, 2, grid), (0, 0));
        assert_eq!(cell_origin(1, c, 2, grid), (12, 0));
        assert_eq!(cell_origin(2, c, 2, grid), (24, 0));
        assert_eq!(cell_origin(3, c, 2, grid), (0, 22));
        assert_eq!(cell_origin(5, c, 2, grid), (24, 22));
    }
}
