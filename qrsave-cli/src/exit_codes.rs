//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: The tool ran but reported an error (bad input, missing directory,
//!   failed write)
//! - 2: Usage, configuration or protocol failures

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// A tool reported an error result
pub const EXIT_WARNING: i32 = 1;

/// Hard failure before or outside tool execution
pub const EXIT_ERROR: i32 = 2;
