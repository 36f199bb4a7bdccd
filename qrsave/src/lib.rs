//! # QrSave
//!
//! QR code generation tools for AI assistants that need the encoded images
//! saved to disk rather than only returned inline.
//!
//! ## Features
//!
//! - **Single generation**: Encode one payload, write a PNG and a JSON sidecar,
//!   optionally return an inline preview
//! - **Batch generation**: Encode many payloads in one call and write an
//!   aggregate manifest
//! - **Listing**: Re-scan an output directory and summarize what is there
//! - **MCP Support**: Model Context Protocol server integration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrsave::qr::{generate_qr_code, GenerationRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = GenerationRequest {
//!     content: "https://example.com".to_string(),
//!     ..GenerationRequest::default()
//! };
//! let report = generate_qr_code(&request)?;
//! println!("Saved {} ({} bytes)", report.filepath.display(), report.file_size_bytes);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// QR encoding, file naming, sidecar metadata and the three generators
pub mod qr;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Configuration loading and tool defaults
pub mod config;

/// Error types used throughout the library
pub mod error;

pub use config::{Config, ToolDefaults};
pub use error::{QrSaveError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Config, QrSaveError, Result, ToolDefaults};

    pub use crate::mcp::{McpServer, QrTool, ToolContext, ToolRegistry};
    pub use crate::qr::{
        generate_batch, generate_qr_code, list_generated, BatchItem, BatchReport, BatchRequest,
        DirectoryListing, ErrorCorrection, GenerationReport, GenerationRequest, ItemOutcome,
    };
}
