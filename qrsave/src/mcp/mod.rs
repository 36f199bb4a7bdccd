//! Model Context Protocol (MCP) server support
//!
//! This module exposes the QR code tools through the Model Context Protocol.

// Module declarations
pub mod responses;
pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;
pub mod types;

// Re-export commonly used items from submodules
pub use server::McpServer;
pub use tool_registry::{McpTool, QrTool, ToolContext, ToolRegistry};
pub use types::{BatchGenerateRequest, GenerateQrCodeRequest, ListQrCodesRequest};
