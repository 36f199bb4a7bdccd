//! Batch generation with per-item isolation and an aggregate manifest

use crate::config::ToolDefaults;
use crate::error::{ErrorContext, QrSaveError, Result};
use crate::qr::encoder::{self, ErrorCorrection, RenderOptions};
use crate::qr::generate::validate_dimension;
use crate::qr::metadata::{self, iso_timestamp, BatchParameters};
use crate::qr::naming;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Quiet zone used for batch images unless configured otherwise
pub const DEFAULT_BATCH_BORDER: u32 = 4;

fn default_kind() -> String {
    "general".to_string()
}

/// One entry of a batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BatchItem {
    /// Caller supplied identifier, used in names and summaries
    #[serde(default)]
    pub id: String,
    /// Payload; an empty payload skips the item
    #[serde(default)]
    pub content: String,
    /// Base filename override
    #[serde(default)]
    pub filename: String,
    /// Free-form tag echoed into metadata and manifest
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

impl BatchItem {
    /// An item with the given id and content and no overrides
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            filename: String::new(),
            kind: default_kind(),
        }
    }
}

/// Input of the batch generator
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    /// Items in processing order
    pub items: Vec<BatchItem>,
    /// Directory receiving every file of the batch
    pub output_directory: String,
    /// Error correction letter shared by all items
    pub error_correction: String,
    /// Size knob shared by all items
    pub size: u32,
    /// Quiet zone shared by all items
    pub border: u32,
}

impl BatchRequest {
    /// A request for `items` with the shared knobs taken from `defaults`
    pub fn with_defaults(items: Vec<BatchItem>, defaults: &ToolDefaults) -> Self {
        Self {
            items,
            output_directory: defaults.output_directory.clone(),
            error_correction: defaults.error_correction.clone(),
            size: defaults.size,
            border: DEFAULT_BATCH_BORDER,
        }
    }
}

/// Manifest record of one generated item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Item id
    pub id: String,
    /// Item tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Image file name including `.png`
    pub filename: String,
    /// Image path
    pub filepath: String,
    /// Sidecar path
    pub metadata: String,
    /// Image size
    pub size_bytes: u64,
}

/// The `batch_manifest_<timestamp>.json` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    /// When the batch finished
    pub batch_date: String,
    /// Number of items in the request
    pub total_requested: usize,
    /// Number of items that produced files
    pub total_generated: usize,
    /// Output directory as the caller spelled it
    pub output_directory: String,
    /// Generated items in input order
    pub files: Vec<ManifestEntry>,
}

/// What happened to one batch item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Image and sidecar written
    Generated(ManifestEntry),
    /// Nothing attempted
    Skipped {
        /// Item id
        id: String,
        /// Why the item was skipped
        reason: String,
    },
    /// Generation started but failed
    Failed {
        /// Item id
        id: String,
        /// Error description
        error: String,
    },
}

impl ItemOutcome {
    /// Id of the item this outcome belongs to
    pub fn id(&self) -> &str {
        match self {
            Self::Generated(entry) => &entry.id,
            Self::Skipped { id, .. } | Self::Failed { id, .. } => id,
        }
    }
}

/// Aggregated result of a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Per-item outcomes in input order
    pub outcomes: Vec<ItemOutcome>,
    /// Path of the written manifest
    pub manifest_path: PathBuf,
    /// Output directory as the caller spelled it
    pub output_directory: String,
}

impl BatchReport {
    /// Number of items in the request
    pub fn requested(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of items that produced files
    pub fn generated(&self) -> usize {
        self.generated_entries().count()
    }

    /// Number of items skipped for missing content
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Skipped { .. }))
            .count()
    }

    /// Number of items whose generation failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Failed { .. }))
            .count()
    }

    /// Manifest entries of generated items, in input order
    pub fn generated_entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.outcomes.iter().filter_map(|o| match o {
            ItemOutcome::Generated(entry) => Some(entry),
            _ => None,
        })
    }
}

/// Generate every item of `request`, then write the manifest.
///
/// An empty item list or an out-of-range knob fails the whole call before
/// anything is written. After that, item failures are recorded in the report
/// and never stop the batch.
pub fn generate_batch(request: &BatchRequest) -> Result<BatchReport> {
    if request.items.is_empty() {
        return Err(QrSaveError::validation("No QR codes specified"));
    }
    validate_dimension("size", request.size)?;
    validate_dimension("border", request.border)?;

    let output_directory = Path::new(&request.output_directory);
    std::fs::create_dir_all(output_directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_directory.display()
        )
    })?;

    let level = ErrorCorrection::parse_lenient(&request.error_correction);
    let options = RenderOptions::full_resolution(request.size, request.border);

    let outcomes: Vec<ItemOutcome> = request
        .items
        .iter()
        .map(|item| {
            if item.content.is_empty() {
                tracing::debug!("Skipping batch item '{}': no content", item.id);
                return ItemOutcome::Skipped {
                    id: item.id.clone(),
                    reason: "No content".to_string(),
                };
            }
            match generate_item(item, request, level, options) {
                Ok(entry) => ItemOutcome::Generated(entry),
                Err(e) => {
                    tracing::warn!("Batch item '{}' failed: {}", item.id, e);
                    ItemOutcome::Failed {
                        id: item.id.clone(),
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect();

    let now = Local::now().naive_local();
    let manifest_path = write_manifest(request, &outcomes, now)?;

    let report = BatchReport {
        outcomes,
        manifest_path,
        output_directory: request.output_directory.clone(),
    };
    tracing::info!(
        "Batch complete: {} requested, {} generated, {} skipped, {} failed",
        report.requested(),
        report.generated(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

fn generate_item(
    item: &BatchItem,
    request: &BatchRequest,
    level: ErrorCorrection,
    options: RenderOptions,
) -> Result<ManifestEntry> {
    let filename = naming::derive_filename(&item.content, &item.filename, &item.id);
    let image_name = naming::image_filename(&filename);
    let filepath = Path::new(&request.output_directory).join(&image_name);

    let image = encoder::render(&item.content, level, options)?;
    encoder::write_png(&image, &filepath)?;

    let parameters = BatchParameters {
        id: item.id.clone(),
        kind: item.kind.clone(),
        error_correction: request.error_correction.clone(),
        size: request.size,
    };
    let metadata_path = metadata::save_metadata(&filepath, &item.content, parameters)?;
    let size_bytes = std::fs::metadata(&filepath)?.len();

    Ok(ManifestEntry {
        id: item.id.clone(),
        kind: item.kind.clone(),
        filename: image_name,
        filepath: filepath.to_string_lossy().into_owned(),
        metadata: metadata_path.to_string_lossy().into_owned(),
        size_bytes,
    })
}

fn write_manifest(
    request: &BatchRequest,
    outcomes: &[ItemOutcome],
    now: NaiveDateTime,
) -> Result<PathBuf> {
    let files: Vec<ManifestEntry> = outcomes
        .iter()
        .filter_map(|o| match o {
            ItemOutcome::Generated(entry) => Some(entry.clone()),
            _ => None,
        })
        .collect();

    let manifest = BatchManifest {
        batch_date: iso_timestamp(now),
        total_requested: outcomes.len(),
        total_generated: files.len(),
        output_directory: request.output_directory.clone(),
        files,
    };

    let path = Path::new(&request.output_directory).join(naming::manifest_filename(now));
    metadata::write_json_pretty(&path, &manifest)?;
    tracing::debug!("Wrote batch manifest {}", path.display());
    Ok(path)
}

/// Read a manifest back
pub fn load_manifest(path: &Path) -> Result<BatchManifest> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
