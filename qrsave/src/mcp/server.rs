//! MCP server implementation for serving the QR code tools

use crate::config::Config;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use super::tool_registry::{ToolContext, ToolRegistry};

/// Name reported to MCP clients
pub const SERVER_NAME: &str = "qrsave";

const INSTRUCTIONS: &str = "QR code generator that saves every code to disk. Use generate_and_save_qrcode to encode one payload as a PNG file with a JSON metadata file (and an optional inline preview), batch_generate_qrcodes to encode many payloads at once with a batch manifest, and list_generated_qrcodes to see what a directory already holds.";

/// MCP server for the QR code tools
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl McpServer {
    /// Create a new MCP server whose tools apply `config`
    pub fn new(config: Config) -> Self {
        Self {
            tool_registry: Arc::new(ToolRegistry::new()),
            tool_context: Arc::new(ToolContext::new(Arc::new(config))),
        }
    }

    /// The tools this server offers
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Run a tool by name as a `tools/call` request would
    pub async fn call_tool_by_name(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.tool_registry
            .execute(name, arguments, &self.tool_context)
            .await
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );
        Ok(self.get_info())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call_tool_by_name(&request.name, request.arguments.unwrap_or_default())
            .await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
