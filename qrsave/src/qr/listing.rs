//! Directory scan behind `list_generated_qrcodes`

use crate::error::{QrSaveError, Result};
use crate::qr::naming;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The part of a sidecar shown in listings
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MetadataPreview {
    /// Encoded payload
    #[serde(default)]
    pub content: String,
    /// Generation timestamp, if recorded
    #[serde(default)]
    pub generated_date: Option<String>,
}

/// One `qr_*.png` found in the directory
#[derive(Debug, Clone, PartialEq)]
pub struct ListedImage {
    /// File name
    pub filename: String,
    /// File size
    pub size_bytes: u64,
    /// Whether a matching `_metadata.json` exists
    pub has_metadata: bool,
    /// Sidecar details; `None` when absent or unreadable
    pub metadata: Option<MetadataPreview>,
}

/// Result of scanning an output directory
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryListing {
    /// Directory as the caller spelled it
    pub directory: PathBuf,
    /// Generated images sorted by file name
    pub images: Vec<ListedImage>,
    /// Number of `*_metadata.json` files, matched or not
    pub metadata_files: usize,
}

impl DirectoryListing {
    /// Whether no generated images were found
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Scan `directory` (non-recursively) for generated images and sidecars.
///
/// Unreadable or malformed sidecars are tolerated: the image is still listed
/// with `has_metadata` set and no preview.
pub fn list_generated(directory: &Path) -> Result<DirectoryListing> {
    if !directory.exists() {
        return Err(QrSaveError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut found_images = Vec::new();
    let mut sidecars = HashMap::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        // display name only; files are reached through the entry's own path
        let name = entry.file_name().to_string_lossy().into_owned();
        if naming::is_generated_image(&name) {
            match entry.metadata() {
                Ok(meta) => found_images.push((name, meta.len())),
                Err(e) => tracing::warn!("Skipping {}: {}", entry.path().display(), e),
            }
        } else if naming::is_metadata_file(&name) {
            sidecars.insert(name, entry.into_path());
        }
    }
    found_images.sort();

    let images: Vec<ListedImage> = found_images
        .into_iter()
        .map(|(filename, size_bytes)| {
            let sidecar = naming::metadata_filename(&filename).and_then(|m| sidecars.get(&m));
            ListedImage {
                has_metadata: sidecar.is_some(),
                metadata: sidecar.and_then(|path| read_preview(path)),
                filename,
                size_bytes,
            }
        })
        .collect();

    tracing::info!(
        "Listed {} images in {}",
        images.len(),
        directory.display()
    );
    Ok(DirectoryListing {
        directory: directory.to_path_buf(),
        images,
        metadata_files: sidecars.len(),
    })
}

fn read_preview(path: &Path) -> Option<MetadataPreview> {
    let parsed = std::fs::read_to_string(path)
        .map_err(QrSaveError::from)
        .and_then(|json| serde_json::from_str::<MetadataPreview>(&json).map_err(QrSaveError::from));
    match parsed {
        Ok(preview) => Some(preview),
        Err(e) => {
            tracing::debug!("Ignoring unreadable metadata {}: {}", path.display(), e);
            None
        }
    }
}
