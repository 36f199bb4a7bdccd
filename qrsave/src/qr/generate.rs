//! Single-item generation: one payload, one PNG, one optional sidecar

use crate::config::{PreviewSettings, ToolDefaults, MAX_DIMENSION, MIN_DIMENSION};
use crate::error::{ErrorContext, QrSaveError, Result};
use crate::qr::encoder::{self, ErrorCorrection, RenderOptions};
use crate::qr::metadata::{self, SingleParameters};
use crate::qr::naming;
use std::path::{Path, PathBuf};

/// Validated input of the single-item generator
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Payload to encode; must not be empty
    pub content: String,
    /// Directory receiving the files, created if absent
    pub output_directory: String,
    /// Base filename override; empty means derive one
    pub filename: String,
    /// Error correction letter as sent; unknown letters encode at `M`
    pub error_correction: String,
    /// Size knob in 1..=20; modules are `2 * size` pixels
    pub size: u32,
    /// Quiet zone in modules, 1..=20
    pub border: u32,
    /// Write the `_metadata.json` sidecar
    pub include_metadata: bool,
    /// Render an in-memory preview for inline display
    pub display_inline: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::with_defaults(String::new(), &ToolDefaults::default())
    }
}

impl GenerationRequest {
    /// A request for `content` with every knob taken from `defaults`
    pub fn with_defaults(content: String, defaults: &ToolDefaults) -> Self {
        Self {
            content,
            output_directory: defaults.output_directory.clone(),
            filename: String::new(),
            error_correction: defaults.error_correction.clone(),
            size: defaults.size,
            border: defaults.border,
            include_metadata: defaults.include_metadata,
            display_inline: defaults.display_in_chat,
        }
    }

    /// Reject empty content and out-of-range knobs
    pub fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(QrSaveError::validation("Content cannot be empty"));
        }
        validate_dimension("size", self.size)?;
        validate_dimension("border", self.border)?;
        Ok(())
    }

    /// Error correction level used for encoding
    pub fn level(&self) -> ErrorCorrection {
        ErrorCorrection::parse_lenient(&self.error_correction)
    }

    /// Pixel width of one module in the saved image
    pub fn box_size(&self) -> u32 {
        self.size * 2
    }
}

/// Check a size/border knob is within 1..=20
pub fn validate_dimension(field: &str, value: u32) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(QrSaveError::validation(format!(
            "{field} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
        )))
    }
}

/// What a successful generation produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Base filename without extension
    pub filename: String,
    /// Path of the written PNG
    pub filepath: PathBuf,
    /// Size of the written PNG
    pub file_size_bytes: u64,
    /// Path of the sidecar, when one was written
    pub metadata_path: Option<PathBuf>,
    /// Preview PNG bytes, when an inline preview was requested
    pub preview_png: Option<Vec<u8>>,
}

/// Generate with the default preview geometry
pub fn generate_qr_code(request: &GenerationRequest) -> Result<GenerationReport> {
    generate_qr_code_with(request, &PreviewSettings::default())
}

/// Validate, write `<dir>/<name>.png`, then the sidecar and preview as requested.
///
/// Nothing is written when validation fails. If the sidecar cannot be written
/// the PNG stays on disk and the error is returned.
pub fn generate_qr_code_with(
    request: &GenerationRequest,
    preview: &PreviewSettings,
) -> Result<GenerationReport> {
    request.validate()?;

    let output_directory = Path::new(&request.output_directory);
    std::fs::create_dir_all(output_directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_directory.display()
        )
    })?;

    let filename = naming::derive_filename(&request.content, &request.filename, "");
    let filepath = output_directory.join(naming::image_filename(&filename));

    let level = request.level();
    let image = encoder::render(
        &request.content,
        level,
        RenderOptions::full_resolution(request.size, request.border),
    )?;
    encoder::write_png(&image, &filepath)?;
    let file_size_bytes = std::fs::metadata(&filepath)?.len();
    tracing::debug!("Wrote {} ({} bytes)", filepath.display(), file_size_bytes);

    let metadata_path = if request.include_metadata {
        let parameters = SingleParameters {
            error_correction: request.error_correction.clone(),
            size: request.size,
            border: request.border,
            box_size: request.box_size(),
        };
        Some(metadata::save_metadata(&filepath, &request.content, parameters)?)
    } else {
        None
    };

    let preview_png = if request.display_inline {
        let small = encoder::render(
            &request.content,
            level,
            RenderOptions {
                module_size: preview.module_size,
                border: preview.border,
            },
        )?;
        Some(encoder::encode_png(&small)?)
    } else {
        None
    };

    tracing::info!("Generated QR code {}", filepath.display());
    Ok(GenerationReport {
        filename,
        filepath,
        file_size_bytes,
        metadata_path,
        preview_png,
    })
}
