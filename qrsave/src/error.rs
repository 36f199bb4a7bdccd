//! Unified error handling for the QrSave library
//!
//! Every fallible operation in the library returns [`Result`]. At the MCP
//! boundary these errors are turned into text tool results instead of
//! protocol faults; see `mcp::shared_utils::McpErrorHandler`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the QrSave library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrSaveError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Directory traversal failed
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The payload could not be encoded as a QR matrix
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    /// The rendered raster could not be written as PNG
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A request field failed validation
    #[error("{0}")]
    Validation(String),

    /// Tool arguments did not match the expected shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A directory that must exist was not found
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// Description of what was being attempted
        message: String,
        /// Underlying failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl QrSaveError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the caller is at fault (as opposed to the filesystem or encoder)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidArguments(_) | Self::DirectoryNotFound(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QrSaveError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add a static context message to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add a lazily built context message to an error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| QrSaveError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| QrSaveError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}
