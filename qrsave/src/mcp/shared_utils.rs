//! Shared utilities for MCP operations
//!
//! This module provides common functionality used across MCP tools
//! to reduce code duplication and ensure consistent behavior.

use crate::error::{QrSaveError, Result};
use crate::mcp::responses::create_error_response;
use rmcp::model::CallToolResult;
use std::error::Error as _;

/// Number of characters of payload shown in text summaries
pub const CONTENT_PREVIEW_CHARS: usize = 50;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a library error into a tool result flagged as an error.
    ///
    /// Tool failures never become protocol faults:
    /// - caller mistakes -> `Error: <message>`
    /// - missing directories -> `❌ Directory not found: <dir>`
    /// - encoder and filesystem failures -> `❌ Error <operation>: <cause chain>`
    pub fn handle_error(error: QrSaveError, operation: &str) -> CallToolResult {
        let message = match &error {
            QrSaveError::DirectoryNotFound(path) => {
                format!("❌ Directory not found: {}", path.display())
            }
            e if e.is_user_error() => format!("Error: {e}"),
            e => format!("❌ Error {operation}: {}", Self::error_chain(e)),
        };

        if error.is_user_error() {
            tracing::warn!("MCP operation '{}' rejected: {}", operation, error);
        } else {
            tracing::error!("MCP operation '{}' failed: {}", operation, error);
        }
        create_error_response(message)
    }

    /// Handle results with consistent error mapping
    pub fn handle_result(result: Result<CallToolResult>, operation: &str) -> CallToolResult {
        result.unwrap_or_else(|e| Self::handle_error(e, operation))
    }

    /// An error followed by each of its sources, separated by `: `
    pub fn error_chain(error: &QrSaveError) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.ends_with(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}

/// Formatting utilities for consistent MCP responses
pub struct McpFormatter;

impl McpFormatter {
    /// First `max_chars` characters of `content`, with `...` when truncated
    pub fn format_preview(content: &str, max_chars: usize) -> String {
        match content.char_indices().nth(max_chars) {
            None => content.to_string(),
            Some((cut, _)) => format!("{}...", &content[..cut]),
        }
    }

    /// Content preview at the standard summary width
    pub fn content_preview(content: &str) -> String {
        Self::format_preview(content, CONTENT_PREVIEW_CHARS)
    }

    /// ✅ or ❌
    pub fn check_mark(ok: bool) -> &'static str {
        if ok {
            "✅"
        } else {
            "❌"
        }
    }
}
