//! QR code tools for MCP operations
//!
//! ## Tools
//!
//! - **generate**: `generate_and_save_qrcode` writes one PNG (plus sidecar)
//!   and optionally returns an inline preview
//! - **batch**: `batch_generate_qrcodes` writes one PNG and sidecar per item
//!   plus a `batch_manifest_<timestamp>.json`
//! - **list**: `list_generated_qrcodes` scans a directory for `qr_*.png`
//!   files and inlines what their sidecars say
//!
//! All three report through text content. Failures are returned as tool
//! results flagged `is_error`, never as protocol errors.

pub mod batch;
pub mod generate;
pub mod list;

pub use batch::BatchGenerateQrCodesTool;
pub use generate::GenerateQrCodeTool;
pub use list::ListQrCodesTool;
