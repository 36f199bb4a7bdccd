//! File naming conventions for generated output
//!
//! Every file the tools write is named here:
//!
//! - `<base>.png` for images, where `<base>` comes from [`derive_filename`]
//! - `<base>_metadata.json` for the sidecar of `<base>.png`
//! - `batch_manifest_<YYYYMMDD_HHMMSS>.json` for batch manifests
//!
//! Auto-derived names carry a one-second timestamp and are not checked for
//! collisions. Two calls in the same second with the same content prefix
//! produce the same name and the later one overwrites the earlier.

use chrono::{Local, NaiveDateTime};

/// Prefix of derived image basenames, and of files the lister treats as images
pub const IMAGE_PREFIX: &str = "qr_";
/// Image file extension
pub const IMAGE_EXTENSION: &str = ".png";
/// Suffix that replaces [`IMAGE_EXTENSION`] for the sidecar file
pub const METADATA_SUFFIX: &str = "_metadata.json";
/// Prefix of batch manifest files
pub const MANIFEST_PREFIX: &str = "batch_manifest_";
/// strftime pattern of the timestamps embedded in file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Number of leading characters of the content used in derived names
const PREVIEW_CHARS: usize = 20;

/// Derive a base filename (no directory, no extension) using the current time.
///
/// Precedence:
/// 1. a non-empty `custom` name, returned verbatim
/// 2. a non-empty `id`, returned as `qr_<id>`
/// 3. `qr_<timestamp>_<content slug>`
pub fn derive_filename(content: &str, custom: &str, id: &str) -> String {
    derive_filename_at(content, custom, id, Local::now().naive_local())
}

/// [`derive_filename`] with an explicit clock reading
pub fn derive_filename_at(content: &str, custom: &str, id: &str, now: NaiveDateTime) -> String {
    if !custom.is_empty() {
        return custom.to_string();
    }
    if !id.is_empty() {
        return format!("{IMAGE_PREFIX}{id}");
    }
    format!(
        "{IMAGE_PREFIX}{}_{}",
        timestamp_slug(now),
        content_slug(content)
    )
}

/// Format a clock reading as `YYYYMMDD_HHMMSS`
pub fn timestamp_slug(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Filename-safe preview of the first 20 characters of `content`.
///
/// Keeps alphanumerics, spaces, hyphens and underscores, trims the ends and
/// turns the remaining spaces into underscores. May be empty.
pub fn content_slug(content: &str) -> String {
    let kept: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim().replace(' ', "_")
}

/// `<base>.png`
pub fn image_filename(base: &str) -> String {
    format!("{base}{IMAGE_EXTENSION}")
}

/// Sidecar name for an image file name: `x.png` → `x_metadata.json`.
///
/// Returns `None` when `image` does not end in `.png`.
pub fn metadata_filename(image: &str) -> Option<String> {
    image
        .strip_suffix(IMAGE_EXTENSION)
        .map(|stem| format!("{stem}{METADATA_SUFFIX}"))
}

/// `batch_manifest_<YYYYMMDD_HHMMSS>.json`
pub fn manifest_filename(now: NaiveDateTime) -> String {
    format!("{MANIFEST_PREFIX}{}.json", timestamp_slug(now))
}

/// Whether a directory entry name is a generated image (`qr_*.png`)
pub fn is_generated_image(name: &str) -> bool {
    name.starts_with(IMAGE_PREFIX) && name.ends_with(IMAGE_EXTENSION)
}

/// Whether a directory entry name is a sidecar (`*_metadata.json`)
pub fn is_metadata_file(name: &str) -> bool {
    name.ends_with(METADATA_SUFFIX)
}
