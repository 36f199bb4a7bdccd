//! Batch QR code generation tool for MCP operations

use crate::error::Result;
use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{parse_request, BatchGenerateRequest};
use crate::qr::{generate_batch, BatchReport, ItemOutcome};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for generating many QR codes with one manifest
#[derive(Default)]
pub struct BatchGenerateQrCodesTool;

impl BatchGenerateQrCodesTool {
    /// Creates a new instance of the BatchGenerateQrCodesTool
    pub fn new() -> Self {
        Self
    }

    fn run(
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: BatchGenerateRequest = parse_request(arguments)?;
        let request = request.resolve(&context.config);
        let report = generate_batch(&request)?;
        Ok(BaseToolImpl::create_success_response(format_summary(&report)))
    }
}

#[async_trait]
impl McpTool for BatchGenerateQrCodesTool {
    fn name(&self) -> &'static str {
        "batch_generate_qrcodes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "qr_codes": {
                    "type": "array",
                    "description": "QR codes to generate",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Identifier for this QR code"
                            },
                            "content": {
                                "type": "string",
                                "description": "Content to encode"
                            },
                            "filename": {
                                "type": "string",
                                "description": "Custom filename without extension"
                            },
                            "type": {
                                "type": "string",
                                "description": "Tag such as url, text, email or phone",
                                "default": "general"
                            }
                        },
                        "required": ["id", "content"]
                    }
                },
                "output_directory": {
                    "type": "string",
                    "description": "Directory to save all PNG files",
                    "default": "./qr_output/"
                },
                "errorCorrectionLevel": {
                    "type": "string",
                    "enum": ["L", "M", "Q", "H"],
                    "description": "Error correction level for all QR codes",
                    "default": "M"
                },
                "size": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Module size factor for all QR codes",
                    "default": 5
                }
            },
            "required": ["qr_codes"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(McpErrorHandler::handle_result(
            Self::run(arguments, context),
            "generating QR code batch",
        ))
    }
}

fn format_outcome(outcome: &ItemOutcome) -> String {
    match outcome {
        ItemOutcome::Generated(entry) => format!("✅ Generated {}: {}", entry.id, entry.filename),
        ItemOutcome::Skipped { id, reason } => format!("❌ Skipped {id}: {reason}"),
        ItemOutcome::Failed { id, error } => format!("❌ Failed {id}: {error}"),
    }
}

fn format_summary(report: &BatchReport) -> String {
    let results: Vec<String> = report.outcomes.iter().map(format_outcome).collect();
    format!(
        "🎯 **Batch QR Code Generation Complete**

📊 **Summary**:
   - Requested: {}
   - Generated: {}
   - Skipped: {}
   - Failed: {}

📁 **Output Directory**: {}
📋 **Batch Manifest**: {}

**Results**:
{}
",
        report.requested(),
        report.generated(),
        report.skipped(),
        report.failed(),
        report.output_directory,
        report.manifest_path.display(),
        results.join("\n"),
    )
}
