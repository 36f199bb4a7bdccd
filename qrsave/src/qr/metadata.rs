//! JSON sidecar files written next to generated images

use crate::error::{ErrorContext, Result};
use crate::qr::naming::{IMAGE_EXTENSION, METADATA_SUFFIX};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Format of `generated_date` / `batch_date`: local time with microseconds
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Knob values recorded for a single-item generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleParameters {
    /// Error correction letter exactly as the caller sent it
    pub error_correction: String,
    /// Size knob
    pub size: u32,
    /// Quiet zone in modules
    pub border: u32,
    /// Rendered module size in pixels (`2 * size`)
    pub box_size: u32,
}

/// Knob values recorded for one item of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchParameters {
    /// Caller supplied item id
    pub id: String,
    /// Free-form tag, echoed only
    #[serde(rename = "type")]
    pub kind: String,
    /// Error correction letter exactly as the caller sent it
    pub error_correction: String,
    /// Size knob
    pub size: u32,
}

/// Parameters object stored in a sidecar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationParameters {
    /// Written by `generate_and_save_qrcode`
    Single(SingleParameters),
    /// Written by `batch_generate_qrcodes`
    Batch(BatchParameters),
}

impl From<SingleParameters> for GenerationParameters {
    fn from(value: SingleParameters) -> Self {
        Self::Single(value)
    }
}

impl From<BatchParameters> for GenerationParameters {
    fn from(value: BatchParameters) -> Self {
        Self::Batch(value)
    }
}

/// Sidecar document describing how an image was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// When the sidecar was written
    pub generated_date: String,
    /// Encoded payload, verbatim
    pub content: String,
    /// Caller knobs
    pub parameters: GenerationParameters,
    /// Path of the image, as composed from the caller's output directory
    pub png_file: String,
    /// Image size at the time the sidecar was written (0 if it was missing)
    pub file_size_bytes: u64,
}

/// Format a clock reading as an ISO-8601 local timestamp
pub fn iso_timestamp(now: NaiveDateTime) -> String {
    now.format(ISO_TIMESTAMP_FORMAT).to_string()
}

/// Sidecar path for an image path: `dir/x.png` → `dir/x_metadata.json`.
///
/// Only the final `.png` of the file name is replaced; a name without it
/// simply gets the suffix appended.
pub fn metadata_path_for(png_path: &Path) -> PathBuf {
    let name = png_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(IMAGE_EXTENSION).unwrap_or(&name);
    png_path.with_file_name(format!("{stem}{METADATA_SUFFIX}"))
}

/// Write `value` as 2-space indented UTF-8 JSON
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the sidecar for `png_path` and return its path
pub fn save_metadata(
    png_path: &Path,
    content: &str,
    parameters: impl Into<GenerationParameters>,
) -> Result<PathBuf> {
    let file_size_bytes = std::fs::metadata(png_path).map(|m| m.len()).unwrap_or(0);
    let metadata = Metadata {
        generated_date: iso_timestamp(Local::now().naive_local()),
        content: content.to_string(),
        parameters: parameters.into(),
        png_file: png_path.to_string_lossy().into_owned(),
        file_size_bytes,
    };

    let metadata_path = metadata_path_for(png_path);
    write_json_pretty(&metadata_path, &metadata)?;
    tracing::debug!("Wrote metadata {}", metadata_path.display());
    Ok(metadata_path)
}

/// Read a sidecar back
pub fn load_metadata(path: &Path) -> Result<Metadata> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> SingleParameters {
        SingleParameters {
            error_correction: "M".to_string(),
            size: 5,
            border: 4,
            box_size: 10,
        }
    }

    #[test]
    fn test_metadata_path_replaces_extension() {
        assert_eq!(
            metadata_path_for(Path::new("./qr_output/qr_a.png")),
            PathBuf::from("./qr_output/qr_a_metadata.json")
        );
        assert_eq!(
            metadata_path_for(Path::new("out.png.d/qr_b.png")),
            PathBuf::from("out.png.d/qr_b_metadata.json")
        );
    }

    #[test]
    fn test_save_and_load_single_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("test_qr.png");
        std::fs::write(&png, [1u8, 2, 3]).unwrap();

        let path = save_metadata(&png, "Test file operations", single()).unwrap();
        assert_eq!(path, dir.path().join("test_qr_metadata.json"));

        let metadata = load_metadata(&path).unwrap();
        assert_eq!(metadata.content, "Test file operations");
        assert_eq!(metadata.parameters, GenerationParameters::Single(single()));
        assert_eq!(metadata.file_size_bytes, 3);
        assert_eq!(metadata.png_file, png.to_string_lossy());
    }

    #[test]
    fn test_batch_parameters_round_trip_with_type_key() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("qr_url_test.png");
        std::fs::write(&png, [0u8; 10]).unwrap();
        let params = BatchParameters {
            id: "url_test".to_string(),
            kind: "url".to_string(),
            error_correction: "H".to_string(),
            size: 7,
        };

        let path = save_metadata(&png, "https://example.com", params.clone()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["parameters"]["type"], "url");
        assert_eq!(raw["parameters"]["id"], "url_test");

        let metadata = load_metadata(&path).unwrap();
        assert_eq!(metadata.parameters, GenerationParameters::Batch(params));
    }

    #[test]
    fn test_missing_image_records_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("never_written.png");

        let path = save_metadata(&png, "x", single()).unwrap();
        assert_eq!(load_metadata(&path).unwrap().file_size_bytes, 0);
    }

    #[test]
    fn test_json_is_pretty_with_snake_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("qr_keys.png");
        std::fs::write(&png, b"png").unwrap();

        let path = save_metadata(&png, "keys", single()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("{\n  \"generated_date\": "));
        for key in ["\"content\"", "\"parameters\"", "\"png_file\"", "\"file_size_bytes\"", "\"box_size\""] {
            assert!(text.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_iso_timestamp_format() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 16)
            .unwrap()
            .and_hms_micro_opt(12, 0, 1, 42)
            .unwrap();
        assert_eq!(iso_timestamp(now), "2025-06-16T12:00:01.000042");
    }
}
