//! Response creation utilities for MCP operations

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rmcp::model::*;

/// MIME type of inline previews
pub const PNG_MIME_TYPE: &str = "image/png";

/// Create a success response for MCP tool calls
pub fn create_success_response(message: String) -> CallToolResult {
    CallToolResult {
        content: vec![text_content(message)],
        is_error: Some(false),
    }
}

/// Create an error response for MCP tool calls
pub fn create_error_response(message: String) -> CallToolResult {
    CallToolResult {
        content: vec![text_content(message)],
        is_error: Some(true),
    }
}

/// Create a success response with a text summary followed by an inline PNG
pub fn create_text_and_image_response(message: String, png: &[u8]) -> CallToolResult {
    CallToolResult {
        content: vec![text_content(message), image_content(png)],
        is_error: Some(false),
    }
}

fn text_content(text: String) -> Content {
    Annotated::new(RawContent::Text(RawTextContent { text }), None)
}

fn image_content(png: &[u8]) -> Content {
    Annotated::new(
        RawContent::Image(RawImageContent {
            data: STANDARD.encode(png),
            mime_type: PNG_MIME_TYPE.to_string(),
        }),
        None,
    )
}

/// First text block of a tool result
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result.content.iter().find_map(|content| match &content.raw {
        RawContent::Text(text) => Some(text.text.as_str()),
        _ => None,
    })
}

/// Decoded bytes of the first image block of a tool result
pub fn first_image(result: &CallToolResult) -> Option<Vec<u8>> {
    result.content.iter().find_map(|content| match &content.raw {
        RawContent::Image(image) => STANDARD.decode(&image.data).ok(),
        _ => None,
    })
}
