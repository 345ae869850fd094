//! Input directory scanning.
//!
//! Stage 1 of the montage pipeline. Lists the image files directly inside the
//! input directory (no recursion), keeping only the extensions the imaging
//! backend decodes, and sorts them by filename so every run tiles the images
//! in the same order.
//!
//! ```text
//! photos/
//! ├── a.jpg          ✓
//! ├── B.PNG          ✓  (extension match is case-insensitive)
//! ├── c.jpeg         ✓
//! ├── .png           ✓  (a bare suffix still counts)
//! ├── notes.txt      ✗
//! ├── config.toml    ✗
//! └── output/        ✗  (directories are skipped)
//! ```
//!
//! Sorting is by raw filename bytes, so uppercase names sort before lowercase.

use crate::imaging::supported_input_extensions;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No image files found in {0}")]
    NoImagesFound(PathBuf),
}

/// Image files found in the input directory, sorted by filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageList {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ImageList {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Filenames (without directory) in sorted order.
    pub fn filenames(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Suffix match on the lowercased filename, so a bare `.png` counts too
/// (`Path::extension` treats it as a stem with no extension).
fn is_supported_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    supported_input_extensions()
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

/// Scan `root` for image files.
///
/// Fails with [`ScanError::NoImagesFound`] if no file matches; nothing is
/// created on disk either way.
pub fn scan(root: &Path) -> Result<ImageList, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_supported_image(&path) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, path));
    }

    if entries.is_empty() {
        return Err(ScanError::NoImagesFound(root.to_path_buf()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(ImageList {
        root: root.to_path_buf(),
        files: entries.into_iter().map(|(_, path)| path).collect(),
    })
}
