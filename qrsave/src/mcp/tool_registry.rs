//! Tool registry for MCP operations
//!
//! The set of tools is closed: [`QrTool`] enumerates every tool the server
//! offers and is the only place a name is mapped to an implementation. The
//! registry is a thin view over that enumeration used by the server and the
//! CLI alike.

use crate::config::Config;
use crate::error::{QrSaveError, Result};
use crate::mcp::tools::qrcode::{BatchGenerateQrCodesTool, GenerateQrCodeTool, ListQrCodesTool};
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Defaults and rendering settings applied to every call
    pub config: Arc<Config>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Every tool the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrTool {
    /// `generate_and_save_qrcode`
    GenerateAndSave,
    /// `batch_generate_qrcodes`
    BatchGenerate,
    /// `list_generated_qrcodes`
    ListGenerated,
}

impl QrTool {
    /// All tools, in listing order
    pub const ALL: [QrTool; 3] = [
        QrTool::GenerateAndSave,
        QrTool::BatchGenerate,
        QrTool::ListGenerated,
    ];

    /// The implementation behind this tool
    pub fn tool(self) -> &'static dyn McpTool {
        match self {
            QrTool::GenerateAndSave => &GenerateQrCodeTool,
            QrTool::BatchGenerate => &BatchGenerateQrCodesTool,
            QrTool::ListGenerated => &ListQrCodesTool,
        }
    }

    /// Wire name of the tool
    pub fn name(self) -> &'static str {
        self.tool().name()
    }

    /// Look a tool up by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

impl std::fmt::Display for QrTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry for managing MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<QrTool>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a registry holding every tool
    pub fn new() -> Self {
        Self {
            tools: QrTool::ALL.to_vec(),
        }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&'static dyn McpTool> {
        QrTool::from_name(name)
            .filter(|tool| self.tools.contains(tool))
            .map(QrTool::tool)
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|qr_tool| {
                let tool = qr_tool.tool();
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name. An unknown name is the only protocol-level failure.
    pub async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.get_tool(name) {
            Some(tool) => {
                tracing::debug!("Executing tool {}", name);
                tool.execute(arguments, context).await
            }
            None => {
                tracing::warn!("Unknown tool requested: {}", name);
                Err(McpError::invalid_request(
                    format!("Unknown tool: {name}"),
                    None,
                ))
            }
        }
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The JSON map of arguments from the MCP request
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The parsed arguments, or `InvalidArguments` with the
    ///   deserializer's message
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<T> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| QrSaveError::InvalidArguments(e.to_string()))
    }

    /// Create a success response with text content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create an error response with the given error message
    ///
    /// # Arguments
    ///
    /// * `error` - The error message
    /// * `details` - Optional additional details
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };

        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: error_text }),
                None,
            )],
            is_error: Some(true),
        }
    }
}
