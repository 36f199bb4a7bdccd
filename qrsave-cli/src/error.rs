//! Error handling for the QrSave CLI
//!
//! Errors keep their cause chain and carry the exit code the process should
//! end with.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        let message = error.to_string();
        Self {
            message,
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Create a CLI error with exit code 1
    pub fn general<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_WARNING)
    }

    /// Create a CLI error with exit code 2
    pub fn validation<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();
        let mut last = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            let text = err.to_string();
            if text != last {
                result.push_str(&format!("\n  Caused by: {text}"));
            }
            last = text;
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_ERROR,
            source: Some(error.into()),
        }
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    fn cli_error(self, exit_code: i32) -> CliResult<T>;
    fn cli_general_error(self) -> CliResult<T>;
    fn cli_validation_error(self) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_error(self, exit_code: i32) -> CliResult<T> {
        self.map_err(|e| CliError::from_error(e, exit_code))
    }

    fn cli_general_error(self) -> CliResult<T> {
        self.map_err(CliError::general)
    }

    fn cli_validation_error(self) -> CliResult<T> {
        self.map_err(CliError::validation)
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed.
///
/// `Ok` carries the exit code chosen by the command itself.
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            if e.exit_code == EXIT_SUCCESS {
                EXIT_ERROR
            } else {
                e.exit_code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;

    #[test]
    fn test_from_error_keeps_source() {
        let err = CliError::validation(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert_eq!(err.to_string(), "gone");
        assert_eq!(err.full_chain(), "gone");
    }

    #[test]
    fn test_anyhow_chain_is_preserved() {
        let result: anyhow::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .context("Failed to read codes.json");
        let err: CliError = result.unwrap_err().into();
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert_eq!(err.full_chain(), "Failed to read codes.json\n  Caused by: gone");
    }

    #[test]
    fn test_handle_cli_result() {
        assert_eq!(handle_cli_result(Ok(EXIT_SUCCESS)), EXIT_SUCCESS);
        assert_eq!(handle_cli_result(Ok(EXIT_WARNING)), EXIT_WARNING);
        assert_eq!(
            handle_cli_result(Err(CliError::new("broken", EXIT_ERROR))),
            EXIT_ERROR
        );
        assert_eq!(handle_cli_result(Err(CliError::new("odd", EXIT_SUCCESS))), EXIT_ERROR);
    }

    #[test]
    fn test_into_cli_result() {
        let result: Result<(), io::Error> = Err(io::Error::other("denied"));
        let err = result.cli_general_error().unwrap_err();
        assert_eq!(err.exit_code, EXIT_WARNING);
    }
}
