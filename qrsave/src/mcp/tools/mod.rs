//! MCP tool implementations
//!
//! Each tool lives in its own submodule with its implementation next to a
//! `description.md` that is served verbatim as the tool description.

pub mod qrcode;
