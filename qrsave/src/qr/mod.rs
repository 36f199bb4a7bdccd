//! QR code generation with on-disk persistence
//!
//! This module owns everything the tools do to the filesystem:
//!
//! - **encoder**: payload → QR matrix → black-on-white raster → PNG
//! - **naming**: base filename derivation and the `qr_` / `_metadata.json` /
//!   `batch_manifest_` naming conventions
//! - **metadata**: the JSON sidecar written next to each image
//! - **generate**: the single-item generator
//! - **batch**: the batch generator and its manifest
//! - **listing**: the directory scan behind `list_generated_qrcodes`
//!
//! There is no in-memory index. Listing always re-derives state from the
//! directory, and an image without a sidecar is a normal, tolerated state.

pub mod batch;
pub mod encoder;
pub mod generate;
pub mod listing;
pub mod metadata;
pub mod naming;

pub use batch::{generate_batch, load_manifest, BatchItem, BatchManifest, BatchReport, BatchRequest, ItemOutcome, ManifestEntry};
pub use encoder::{ErrorCorrection, RenderOptions};
pub use generate::{generate_qr_code, generate_qr_code_with, GenerationReport, GenerationRequest};
pub use listing::{list_generated, DirectoryListing, ListedImage, MetadataPreview};
pub use metadata::{load_metadata, BatchParameters, GenerationParameters, Metadata, SingleParameters};
pub use naming::derive_filename;
