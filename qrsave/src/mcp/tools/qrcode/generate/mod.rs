//! QR code generation tool for MCP operations
//!
//! This module provides the GenerateQrCodeTool for encoding one payload and
//! saving it as a PNG file through the MCP protocol.

use crate::error::Result;
use crate::mcp::responses::create_text_and_image_response;
use crate::mcp::shared_utils::{McpErrorHandler, McpFormatter};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{parse_request, GenerateQrCodeRequest};
use crate::qr::{generate_qr_code_with, GenerationReport, GenerationRequest};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for generating and saving a single QR code
#[derive(Default)]
pub struct GenerateQrCodeTool;

impl GenerateQrCodeTool {
    /// Creates a new instance of the GenerateQrCodeTool
    pub fn new() -> Self {
        Self
    }

    fn run(
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: GenerateQrCodeRequest = parse_request(arguments)?;
        let request = request.resolve(&context.config.defaults);
        let report = generate_qr_code_with(&request, &context.config.preview)?;

        let summary = format_summary(&request, &report);
        Ok(match &report.preview_png {
            Some(png) => create_text_and_image_response(summary, png),
            None => BaseToolImpl::create_success_response(summary),
        })
    }
}

#[async_trait]
impl McpTool for GenerateQrCodeTool {
    fn name(&self) -> &'static str {
        "generate_and_save_qrcode"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "Text, URL, or data to encode in the QR code"
                },
                "output_directory": {
                    "type": "string",
                    "description": "Directory to save the PNG file",
                    "default": "./qr_output/"
                },
                "filename": {
                    "type": "string",
                    "description": "Custom filename without extension (auto-generated if not provided)"
                },
                "errorCorrectionLevel": {
                    "type": "string",
                    "enum": ["L", "M", "Q", "H"],
                    "description": "Error correction level",
                    "default": "M"
                },
                "size": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Module size factor; each module is 2 * size pixels",
                    "default": 5
                },
                "border": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Border size in modules",
                    "default": 4
                },
                "include_metadata": {
                    "type": "boolean",
                    "description": "Save a JSON metadata file alongside the PNG",
                    "default": true
                },
                "display_in_chat": {
                    "type": "boolean",
                    "description": "Also return a small preview image",
                    "default": true
                }
            },
            "required": ["content"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(McpErrorHandler::handle_result(
            Self::run(arguments, context),
            "generating QR code",
        ))
    }
}

fn format_summary(request: &GenerationRequest, report: &GenerationReport) -> String {
    let mut summary = format!(
        "✅ QR Code Generated and Saved Successfully!

📁 **File Location**: {}
📊 **File Size**: {} bytes
🔧 **Parameters**:
   - Content: {}
   - Error Correction: {}
   - Size: {}
   - Border: {}
",
        report.filepath.display(),
        report.file_size_bytes,
        McpFormatter::content_preview(&request.content),
        request.error_correction,
        request.size,
        request.border,
    );
    if let Some(metadata_path) = &report.metadata_path {
        summary.push_str(&format!("📋 **Metadata**: {}\n", metadata_path.display()));
    }
    summary
}
