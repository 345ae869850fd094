//! In-memory pixel operations.
//!
//! These functions combine the pure [`calculations`](super::calculations)
//! with pixel buffers. None of them touch the filesystem.

use super::calculations::crop_box;
use super::params::Brightness;
use crate::types::CellSize;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Crop the centered square whose side is `floor(width * ratio)`.
///
/// The result is always `side x side`. Where the square extends past the
/// top or bottom of a landscape image, the missing rows are black.
/// Returns `None` when the side would be zero pixels.
pub fn crop_center_square(img: &DynamicImage, ratio: f64) -> Option<RgbImage> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let b = crop_box(width, height, ratio);
    let side = b.width();
    if side == 0 {
        return None;
    }

    let inside_left = b.left.max(0);
    let inside_top = b.top.max(0);
    let inside_right = b.right.min(width as i64);
    let inside_bottom = b.bottom.min(height as i64);
    if inside_left == b.left
        && inside_top == b.top
        && inside_right == b.right
        && inside_bottom == b.bottom
    {
        return Some(imageops::crop_imm(&rgb, b.left as u32, b.top as u32, side, side).to_image());
    }

    let mut out = RgbImage::from_pixel(side, b.height(), Rgb([0, 0, 0]));
    if inside_right > inside_left && inside_bottom > inside_top {
        let visible = imageops::crop_imm(
            &rgb,
            inside_left as u32,
            inside_top as u32,
            (inside_right - inside_left) as u32,
            (inside_bottom - inside_top) as u32,
        )
        .to_image();
        imageops::replace(
            &mut out,
            &visible,
            inside_left - b.left,
            inside_top - b.top,
        );
    }
    Some(out)
}

/// Resize `img` to exactly the cell size, or return it unchanged if it already fits.
pub fn fit_to_cell(img: RgbImage, cell: CellSize) -> RgbImage {
    if img.dimensions() == (cell.width, cell.height) {
        return img;
    }
    imageops::resize(&img, cell.width, cell.height, FilterType::Lanczos3)
}

/// Allocate a canvas filled with `color`.
pub fn blank_canvas(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Overwrite the canvas region at `(x, y)` with `tile`.
///
/// Pixels that fall outside the canvas are clipped.
pub fn paste(canvas: &mut RgbImage, tile: &RgbImage, x: u32, y: u32) {
    imageops::replace(canvas, tile, x as i64, y as i64);
}

/// Multiply every channel by the brightness factor, clamping to `[0, 255]`.
pub fn adjust_brightness(canvas: &mut RgbImage, brightness: Brightness) {
    if brightness.is_identity() {
        return;
    }
    let factor = brightness.factor();
    for pixel in canvas.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (*channel as f32 * factor).clamp(0.0, 255.0) as u8;
        }
    }
}
