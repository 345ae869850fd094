//! Shared test utilities: synthetic image files and input directories.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = setup_image_dir(&["a.jpg", "b.png"], 100, 100);
//! let images = scan(tmp.path()).unwrap();
//! ```

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;
use tempfile::TempDir;

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid RGBA PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    img.save(path).unwrap();
}

/// Write a synthetic image, picking the encoder from the extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        create_test_png(path, width, height);
    } else {
        create_test_jpeg(path, width, height);
    }
}

/// Temp directory holding one synthetic image per name, all the same size.
pub fn setup_image_dir(names: &[&str], width: u32, height: u32) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        create_test_image(&tmp.path().join(name), width, height);
    }
    tmp
}
