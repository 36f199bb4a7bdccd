//! Integration layer for calling MCP tools from CLI commands
//!
//! CLI commands go through the same tool registry an MCP client reaches, so
//! the command line and the server cannot disagree about behavior.

use qrsave::mcp::{ToolContext, ToolRegistry};
use qrsave::Config;
use rmcp::model::{CallToolResult, Tool};
use rmcp::Error as McpError;
use serde_json::Map;
use std::sync::Arc;

/// CLI-specific tool context that can execute MCP tools
pub struct CliToolContext {
    tool_registry: ToolRegistry,
    tool_context: ToolContext,
}

impl CliToolContext {
    /// Create a context whose tools apply `config`
    pub fn new(config: Config) -> Self {
        Self {
            tool_registry: ToolRegistry::new(),
            tool_context: ToolContext::new(Arc::new(config)),
        }
    }

    /// Execute an MCP tool with the given arguments
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: Map<String, serde_json::Value>,
    ) -> Result<CallToolResult, McpError> {
        self.tool_registry
            .execute(tool_name, arguments, &self.tool_context)
            .await
    }

    /// Helper to convert CLI arguments to MCP tool arguments
    pub fn create_arguments(
        &self,
        pairs: Vec<(&str, serde_json::Value)>,
    ) -> Map<String, serde_json::Value> {
        let mut args = Map::new();
        for (key, value) in pairs {
            args.insert(key.to_string(), value);
        }
        args
    }

    /// Tool definitions as served by `tools/list`
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_registry.list_tools()
    }
}

/// Utilities for formatting MCP responses for CLI display
pub mod response_formatting {
    use colored::*;
    use rmcp::model::{CallToolResult, RawContent};

    /// Whether the tool flagged its result as an error
    pub fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }

    /// Extract and format success message from MCP response
    pub fn format_success_response(result: &CallToolResult) -> String {
        if is_error(result) {
            format_error_response(result)
        } else {
            extract_text_content(result)
                .unwrap_or_else(|| "Operation completed successfully".to_string())
                .green()
                .to_string()
        }
    }

    /// Extract and format error message from MCP response
    pub fn format_error_response(result: &CallToolResult) -> String {
        extract_text_content(result)
            .unwrap_or_else(|| "An unknown error occurred".to_string())
            .red()
            .to_string()
    }

    /// Extract text content from CallToolResult
    pub fn extract_text_content(result: &CallToolResult) -> Option<String> {
        result
            .content
            .iter()
            .find_map(|content| match &content.raw {
                RawContent::Text(text_content) => Some(text_content.text.clone()),
                _ => None,
            })
    }
}
