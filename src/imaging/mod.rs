//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` (PNG, JPEG) |
//! | **Center square crop** | `imageops::crop_imm` + black fill outside the source |
//! | **Paste** | `imageops::replace` |
//! | **Brightness** | per-channel multiply, clamped |
//! | **Encode** | `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop and grid geometry (unit testable)
//! - **Parameters**: Quality, brightness and cell-fit settings
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for decode/encode
//! - **Operations**: In-memory pixel operations used by the montage builder

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use params::{Brightness, CellFit, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
