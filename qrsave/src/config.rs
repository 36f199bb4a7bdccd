//! Configuration management for QrSave
//!
//! Tool defaults live here so a deployment can change, say, the default output
//! directory without every caller having to pass it. Values are loaded from an
//! optional YAML file; without one the built-in defaults apply.

use crate::error::{QrSaveError, Result};
use crate::qr::ErrorCorrection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default directory for generated files
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "./qr_output/";
/// Smallest accepted `size` / `border` value
pub const MIN_DIMENSION: u32 = 1;
/// Largest accepted `size` / `border` value
pub const MAX_DIMENSION: u32 = 20;

/// Default values applied to tool arguments the caller leaves out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolDefaults {
    /// Directory that receives PNG, metadata and manifest files
    pub output_directory: String,
    /// Error correction letter (L, M, Q or H)
    pub error_correction: String,
    /// Size knob, rendered as a module size of `2 * size` pixels
    pub size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Write a `_metadata.json` sidecar next to each image
    pub include_metadata: bool,
    /// Return an inline preview alongside the text summary
    pub display_in_chat: bool,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
            error_correction: ErrorCorrection::default().as_str().to_string(),
            size: 5,
            border: 4,
            include_metadata: true,
            display_in_chat: true,
        }
    }
}

/// Rendering settings for inline previews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewSettings {
    /// Pixel width of one module in the preview
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            module_size: 3,
            border: 2,
        }
    }
}

/// Configuration settings for the QrSave server and CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for omitted tool arguments
    pub defaults: ToolDefaults,
    /// Inline preview rendering
    pub preview: PreviewSettings,
    /// Quiet zone used for every image of a batch
    pub batch_border: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: ToolDefaults::default(),
            preview: PreviewSettings::default(),
            batch_border: 4,
        }
    }
}

impl Config {
    /// Built-in configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file, or the built-in defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    /// Load and validate configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            QrSaveError::Config(format!(
                "Failed to read configuration file {}: {e}",
                path.display()
            ))
        })?;
        let config = Self::from_yaml(&contents).map_err(|e| match e {
            QrSaveError::Yaml(source) => QrSaveError::Config(format!(
                "Invalid YAML syntax in {}: {source}",
                path.display()
            )),
            other => other,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// Sections that are left out keep their built-in values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::new()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<()> {
        let defaults = &self.defaults;
        if defaults.output_directory.trim().is_empty() {
            return Err(invalid_value(
                "defaults.output_directory",
                "",
                "Provide a directory path such as ./qr_output/",
            ));
        }
        if ErrorCorrection::from_letter(&defaults.error_correction).is_none() {
            return Err(invalid_value(
                "defaults.error_correction",
                &defaults.error_correction,
                "Use one of L, M, Q or H",
            ));
        }
        check_dimension("defaults.size", defaults.size)?;
        check_dimension("defaults.border", defaults.border)?;
        check_dimension("batch_border", self.batch_border)?;
        check_dimension("preview.border", self.preview.border)?;
        check_dimension("preview.module_size", self.preview.module_size)?;
        Ok(())
    }
}

fn check_dimension(field: &str, value: u32) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(invalid_value(
            field,
            &value.to_string(),
            &format!("Must be between {MIN_DIMENSION} and {MAX_DIMENSION}"),
        ))
    }
}

fn invalid_value(field: &str, value: &str, hint: &str) -> QrSaveError {
    QrSaveError::Config(format!(
        "Invalid configuration value for '{field}': {value}\n{hint}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_defaults_match_tool_surface() {
        let config = Config::new();
        assert_eq!(config.defaults.output_directory, "./qr_output/");
        assert_eq!(config.defaults.error_correction, "M");
        assert_eq!(config.defaults.size, 5);
        assert_eq!(config.defaults.border, 4);
        assert!(config.defaults.include_metadata);
        assert!(config.defaults.display_in_chat);
        assert_eq!(config.preview.module_size, 3);
        assert_eq!(config.preview.border, 2);
        assert_eq!(config.batch_border, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("defaults:\n  output_directory: ./codes\n  size: 8\n").unwrap();
        assert_eq!(config.defaults.output_directory, "./codes");
        assert_eq!(config.defaults.size, 8);
        assert_eq!(config.defaults.border, 4);
        assert_eq!(config.batch_border, 4);
        assert_eq!(config.preview, PreviewSettings::default());
    }

    #[test]
    fn test_empty_yaml_is_builtin() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::new());
    }

    #[test]
    fn test_out_of_range_size_rejected() {
        let err = Config::from_yaml("defaults:\n  size: 21\n").unwrap_err();
        assert!(err.to_string().contains("defaults.size"));
    }

    #[test]
    fn test_preview_module_size_bounded() {
        let err = Config::from_yaml("preview:\n  module_size: 100000\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("preview.module_size"));
        assert!(message.contains("100000"));

        assert!(Config::from_yaml("preview:\n  module_size: 0\n").is_err());
        let config = Config::from_yaml("preview:\n  module_size: 20\n").unwrap();
        assert_eq!(config.preview.module_size, 20);
    }

    #[test]
    fn test_unknown_error_correction_rejected() {
        let err = Config::from_yaml("defaults:\n  error_correction: X\n").unwrap_err();
        assert!(err.to_string().contains("L, M, Q or H"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_yaml("defaults:\n  colour: red\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_border: 2\npreview:\n  module_size: 4").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.batch_border, 2);
        assert_eq!(config.preview.module_size, 4);
        assert_eq!(config.preview.border, 2);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, QrSaveError::Config(_)));
    }

    #[test]
    fn test_load_without_path_is_builtin() {
        assert_eq!(Config::load(None).unwrap(), Config::new());
    }
}
