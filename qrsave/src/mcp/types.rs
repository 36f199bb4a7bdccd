//! Request types for MCP operations
//!
//! Every field a caller may omit is an `Option`; the omitted ones are filled
//! in from [`ToolDefaults`] when a request is resolved. Keys follow the
//! snake_case spelling, with camelCase accepted as an alias. When a caller
//! sends more than one spelling of the same key, [`canonicalize_keys`] keeps
//! the preferred one.

use crate::config::{Config, ToolDefaults};
use crate::error::Result;
use crate::mcp::tool_registry::BaseToolImpl;
use crate::qr::{BatchItem, BatchRequest, GenerationRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Accepted spellings of each argument, preferred spelling first
const KEY_SPELLINGS: &[&[&str]] = &[
    &["output_directory", "outputDirectory"],
    &["errorCorrectionLevel", "error_correction", "errorCorrection"],
    &["include_metadata", "includeMetadata"],
    &["display_in_chat", "displayInChat"],
    &["qr_codes", "qrCodes"],
];

/// Fold every spelling of a key onto its preferred spelling.
///
/// If several spellings are present, the value under the earliest one in
/// the preference order is kept and the others are dropped.
pub fn canonicalize_keys(mut arguments: Map<String, Value>) -> Map<String, Value> {
    for spellings in KEY_SPELLINGS {
        let Some((preferred, alternatives)) = spellings.split_first() else {
            continue;
        };
        let mut chosen = arguments.remove(*preferred);
        for alternative in alternatives {
            if let Some(value) = arguments.remove(*alternative) {
                chosen.get_or_insert(value);
            }
        }
        if let Some(value) = chosen {
            arguments.insert((*preferred).to_string(), value);
        }
    }
    arguments
}

/// Parse tool arguments into a request type after folding key spellings
pub fn parse_request<T: DeserializeOwned>(arguments: Map<String, Value>) -> Result<T> {
    BaseToolImpl::parse_arguments(canonicalize_keys(arguments))
}

/// Arguments of `generate_and_save_qrcode`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GenerateQrCodeRequest {
    /// Payload to encode
    #[serde(default)]
    pub content: String,
    /// Directory receiving the files
    #[serde(default, alias = "outputDirectory")]
    pub output_directory: Option<String>,
    /// Base filename override
    #[serde(default)]
    pub filename: Option<String>,
    /// Error correction letter
    #[serde(
        default,
        rename = "errorCorrectionLevel",
        alias = "errorCorrection",
        alias = "error_correction"
    )]
    pub error_correction: Option<String>,
    /// Size knob, 1..=20
    #[serde(default)]
    pub size: Option<u32>,
    /// Quiet zone, 1..=20
    #[serde(default)]
    pub border: Option<u32>,
    /// Write the `_metadata.json` sidecar
    #[serde(default, alias = "includeMetadata")]
    pub include_metadata: Option<bool>,
    /// Return an inline preview
    #[serde(default, alias = "displayInChat")]
    pub display_in_chat: Option<bool>,
}

impl GenerateQrCodeRequest {
    /// Fill omitted fields from `defaults`
    pub fn resolve(self, defaults: &ToolDefaults) -> GenerationRequest {
        GenerationRequest {
            content: self.content,
            output_directory: self
                .output_directory
                .unwrap_or_else(|| defaults.output_directory.clone()),
            filename: self.filename.unwrap_or_default(),
            error_correction: self
                .error_correction
                .unwrap_or_else(|| defaults.error_correction.clone()),
            size: self.size.unwrap_or(defaults.size),
            border: self.border.unwrap_or(defaults.border),
            include_metadata: self.include_metadata.unwrap_or(defaults.include_metadata),
            display_inline: self.display_in_chat.unwrap_or(defaults.display_in_chat),
        }
    }
}

/// Arguments of `batch_generate_qrcodes`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct BatchGenerateRequest {
    /// Items to generate, in order
    #[serde(default, alias = "qrCodes")]
    pub qr_codes: Vec<BatchItem>,
    /// Directory receiving the files
    #[serde(default, alias = "outputDirectory")]
    pub output_directory: Option<String>,
    /// Error correction letter shared by all items
    #[serde(
        default,
        rename = "errorCorrectionLevel",
        alias = "errorCorrection",
        alias = "error_correction"
    )]
    pub error_correction: Option<String>,
    /// Size knob shared by all items
    #[serde(default)]
    pub size: Option<u32>,
}

impl BatchGenerateRequest {
    /// Fill omitted fields from the configuration
    pub fn resolve(self, config: &Config) -> BatchRequest {
        let defaults = &config.defaults;
        BatchRequest {
            items: self.qr_codes,
            output_directory: self
                .output_directory
                .unwrap_or_else(|| defaults.output_directory.clone()),
            error_correction: self
                .error_correction
                .unwrap_or_else(|| defaults.error_correction.clone()),
            size: self.size.unwrap_or(defaults.size),
            border: config.batch_border,
        }
    }
}

/// Arguments of `list_generated_qrcodes`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListQrCodesRequest {
    /// Directory to scan
    #[serde(default)]
    pub directory: Option<String>,
}

impl ListQrCodesRequest {
    /// The directory to scan, defaulting to the output directory
    pub fn resolve(self, defaults: &ToolDefaults) -> PathBuf {
        PathBuf::from(
            self.directory
                .unwrap_or_else(|| defaults.output_directory.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_defaults_applied() {
        let request: GenerateQrCodeRequest =
            serde_json::from_value(json!({"content": "hi"})).unwrap();
        let resolved = request.resolve(&ToolDefaults::default());
        assert_eq!(resolved, GenerationRequest {
            content: "hi".to_string(),
            ..GenerationRequest::default()
        });
    }

    #[test]
    fn test_snake_case_and_camel_case_keys() {
        let snake: GenerateQrCodeRequest = serde_json::from_value(json!({
            "content": "x",
            "output_directory": "/tmp/a",
            "errorCorrectionLevel": "H",
            "include_metadata": false,
            "display_in_chat": false
        }))
        .unwrap();
        let camel: GenerateQrCodeRequest = serde_json::from_value(json!({
            "content": "x",
            "outputDirectory": "/tmp/a",
            "errorCorrection": "H",
            "includeMetadata": false,
            "displayInChat": false
        }))
        .unwrap();

        let defaults = ToolDefaults::default();
        let snake = snake.resolve(&defaults);
        assert_eq!(snake, camel.resolve(&defaults));
        assert_eq!(snake.output_directory, "/tmp/a");
        assert_eq!(snake.error_correction, "H");
        assert!(!snake.include_metadata);
        assert!(!snake.display_inline);
    }

    #[test]
    fn test_both_spellings_keep_preferred_key() {
        let arguments = match json!({
            "content": "x",
            "output_directory": "/tmp/snake",
            "outputDirectory": "/tmp/camel",
            "errorCorrection": "L",
            "error_correction": "Q",
            "displayInChat": false
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let request: GenerateQrCodeRequest = parse_request(arguments).unwrap();
        assert_eq!(request.output_directory.as_deref(), Some("/tmp/snake"));
        assert_eq!(request.error_correction.as_deref(), Some("Q"));
        assert_eq!(request.display_in_chat, Some(false));
    }

    #[test]
    fn test_canonicalize_keeps_other_keys() {
        let mut arguments = Map::new();
        arguments.insert("qrCodes".to_string(), json!([]));
        arguments.insert("size".to_string(), json!(3));

        let canonical = canonicalize_keys(arguments);
        assert_eq!(canonical.len(), 2);
        assert_eq!(canonical["qr_codes"], json!([]));
        assert_eq!(canonical["size"], json!(3));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: std::result::Result<GenerateQrCodeRequest, _> =
            serde_json::from_value(json!({"content": "x", "size": "big"}));
        assert!(result.is_err());
        let result: std::result::Result<GenerateQrCodeRequest, _> =
            serde_json::from_value(json!({"content": "x", "size": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_resolve_uses_batch_border() {
        let request: BatchGenerateRequest = serde_json::from_value(json!({
            "qr_codes": [{"id": "a", "content": "x", "type": "url"}],
            "size": 7
        }))
        .unwrap();
        let config = Config {
            batch_border: 6,
            ..Config::default()
        };

        let resolved = request.resolve(&config);
        assert_eq!(resolved.size, 7);
        assert_eq!(resolved.border, 6);
        assert_eq!(resolved.items[0].kind, "url");
        assert_eq!(resolved.output_directory, "./qr_output/");
    }

    #[test]
    fn test_batch_camel_case_items_key() {
        let request: BatchGenerateRequest =
            serde_json::from_value(json!({"qrCodes": [{"id": "a", "content": "x"}]})).unwrap();
        assert_eq!(request.qr_codes.len(), 1);
    }

    #[test]
    fn test_list_directory_default() {
        let request = ListQrCodesRequest::default();
        assert_eq!(
            request.resolve(&ToolDefaults::default()),
            PathBuf::from("./qr_output/")
        );
    }

    #[test]
    fn test_derived_schema_lists_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(GenerateQrCodeRequest)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("content"));
        assert!(properties.contains_key("errorCorrectionLevel"));
        assert!(properties.contains_key("output_directory"));
    }
}
