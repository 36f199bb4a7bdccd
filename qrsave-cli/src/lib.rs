//! QrSave CLI Library
//!
//! Command-line definitions, logging setup and the bridge that lets CLI
//! commands call the MCP tools in-process.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// CLI error type and exit code mapping
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Tracing subscriber setup
pub mod logging;
/// Calling MCP tools from CLI commands
pub mod mcp_integration;
/// The `generate`, `batch`, `list` and `tools` commands
pub mod qrcode;
