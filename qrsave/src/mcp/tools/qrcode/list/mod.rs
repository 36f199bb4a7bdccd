//! Generated QR code listing tool for MCP operations

use crate::error::Result;
use crate::mcp::shared_utils::{McpErrorHandler, McpFormatter};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::{parse_request, ListQrCodesRequest};
use crate::qr::{list_generated, DirectoryListing};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing generated QR code files
#[derive(Default)]
pub struct ListQrCodesTool;

impl ListQrCodesTool {
    /// Creates a new instance of the ListQrCodesTool
    pub fn new() -> Self {
        Self
    }

    fn run(
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> Result<CallToolResult> {
        let request: ListQrCodesRequest = parse_request(arguments)?;
        let directory = request.resolve(&context.config.defaults);
        let listing = list_generated(&directory)?;
        Ok(BaseToolImpl::create_success_response(format_listing(
            &listing,
        )))
    }
}

#[async_trait]
impl McpTool for ListQrCodesTool {
    fn name(&self) -> &'static str {
        "list_generated_qrcodes"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory to scan for QR code files",
                    "default": "./qr_output/"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(McpErrorHandler::handle_result(
            Self::run(arguments, context),
            "listing QR codes",
        ))
    }
}

fn format_listing(listing: &DirectoryListing) -> String {
    let directory = listing.directory.display();
    if listing.is_empty() {
        return format!("📁 No QR code files found in {directory}");
    }

    let mut lines = vec![format!("📁 **QR Code Files in {directory}**\n")];
    for image in &listing.images {
        lines.push(format!("📄 **{}**", image.filename));
        lines.push(format!("   Size: {} bytes", image.size_bytes));
        lines.push(format!(
            "   Metadata: {}",
            McpFormatter::check_mark(image.has_metadata)
        ));
        if let Some(metadata) = &image.metadata {
            lines.push(format!(
                "   Content: {}",
                McpFormatter::content_preview(&metadata.content)
            ));
            lines.push(format!(
                "   Generated: {}",
                metadata.generated_date.as_deref().unwrap_or("Unknown")
            ));
        }
        lines.push(String::new());
    }
    lines.push(format!(
        "**Total Files**: {} PNG files, {} metadata files",
        listing.images.len(),
        listing.metadata_files
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::responses::first_text;
    use crate::qr::{ListedImage, MetadataPreview};
    use serde_json::json;
    use std::path::PathBuf;

    fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_missing_directory_is_error_result() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = ListQrCodesTool::new()
            .execute(args(json!({"directory": missing})), &ToolContext::default())
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            first_text(&result).unwrap(),
            format!("❌ Directory not found: {}", missing.display())
        );
    }

    #[tokio::test]
    async fn test_empty_directory_message() {
        let dir = tempfile::tempdir().unwrap();
        let result = ListQrCodesTool::new()
            .execute(args(json!({"directory": dir.path()})), &ToolContext::default())
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            first_text(&result).unwrap(),
            format!("📁 No QR code files found in {}", dir.path().display())
        );
    }

    #[test]
    fn test_listing_layout() {
        let listing = DirectoryListing {
            directory: PathBuf::from("./qr_output/"),
            images: vec![
                ListedImage {
                    filename: "qr_a.png".to_string(),
                    size_bytes: 120,
                    has_metadata: true,
                    metadata: Some(MetadataPreview {
                        content: "y".repeat(60),
                        generated_date: Some("2025-06-16T12:00:00.000001".to_string()),
                    }),
                },
                ListedImage {
                    filename: "qr_b.png".to_string(),
                    size_bytes: 7,
                    has_metadata: false,
                    metadata: None,
                },
            ],
            metadata_files: 1,
        };

        let expected = format!(
            "📁 **QR Code Files in ./qr_output/**\n
📄 **qr_a.png**
   Size: 120 bytes
   Metadata: ✅
   Content: {}...
   Generated: 2025-06-16T12:00:00.000001

📄 **qr_b.png**
   Size: 7 bytes
   Metadata: ❌

**Total Files**: 2 PNG files, 1 metadata files",
            "y".repeat(50)
        );
        assert_eq!(format_listing(&listing), expected);
    }

    #[test]
    fn test_missing_generated_date_shows_unknown() {
        let listing = DirectoryListing {
            directory: PathBuf::from("out"),
            images: vec![ListedImage {
                filename: "qr_c.png".to_string(),
                size_bytes: 1,
                has_metadata: true,
                metadata: Some(MetadataPreview {
                    content: "c".to_string(),
                    generated_date: None,
                }),
            }],
            metadata_files: 1,
        };
        assert!(format_listing(&listing).contains("   Generated: Unknown\n"));
    }
}
