//! QR code commands that run the MCP tools in-process

use crate::cli::ErrorCorrectionArg;
use crate::error::{CliError, CliResult, IntoCliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use crate::mcp_integration::{response_formatting, CliToolContext};
use anyhow::{bail, Context};
use colored::*;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Options of `qrsave generate`
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub content: String,
    pub output_dir: Option<String>,
    pub filename: Option<String>,
    pub error_correction: Option<ErrorCorrectionArg>,
    pub size: Option<u32>,
    pub border: Option<u32>,
    pub no_metadata: bool,
}

/// Options of `qrsave batch`
#[derive(Debug)]
pub struct BatchOptions {
    pub file: PathBuf,
    pub output_dir: Option<String>,
    pub error_correction: Option<ErrorCorrectionArg>,
    pub size: Option<u32>,
}

pub async fn run_generate(context: &CliToolContext, options: GenerateOptions) -> CliResult<i32> {
    let mut pairs = vec![
        ("content", json!(options.content)),
        ("include_metadata", json!(!options.no_metadata)),
        // a terminal has nowhere to show the preview
        ("display_in_chat", json!(false)),
    ];
    if let Some(dir) = options.output_dir {
        pairs.push(("output_directory", json!(dir)));
    }
    if let Some(filename) = options.filename {
        pairs.push(("filename", json!(filename)));
    }
    if let Some(level) = options.error_correction {
        pairs.push(("errorCorrectionLevel", json!(level.as_str())));
    }
    if let Some(size) = options.size {
        pairs.push(("size", json!(size)));
    }
    if let Some(border) = options.border {
        pairs.push(("border", json!(border)));
    }

    let args = context.create_arguments(pairs);
    call_and_print(context, "generate_and_save_qrcode", args).await
}

pub async fn run_batch(context: &CliToolContext, options: BatchOptions) -> CliResult<i32> {
    let mut args = load_batch_arguments(&options.file)?;
    if let Some(dir) = options.output_dir {
        args.remove("outputDirectory");
        args.insert("output_directory".to_string(), json!(dir));
    }
    if let Some(level) = options.error_correction {
        args.remove("errorCorrection");
        args.remove("error_correction");
        args.insert("errorCorrectionLevel".to_string(), json!(level.as_str()));
    }
    if let Some(size) = options.size {
        args.insert("size".to_string(), json!(size));
    }

    call_and_print(context, "batch_generate_qrcodes", args).await
}

pub async fn run_list(context: &CliToolContext, directory: Option<String>) -> CliResult<i32> {
    let pairs = directory
        .map(|dir| vec![("directory", json!(dir))])
        .unwrap_or_default();
    let args = context.create_arguments(pairs);
    call_and_print(context, "list_generated_qrcodes", args).await
}

pub fn run_tools(context: &CliToolContext, schema: bool) -> CliResult<i32> {
    let tools = context.list_tools();
    if schema {
        let json = serde_json::to_string_pretty(&tools).cli_validation_error()?;
        println!("{json}");
        return Ok(EXIT_SUCCESS);
    }

    for tool in &tools {
        let summary = tool
            .description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or_default();
        println!("{}  {}", tool.name.bold(), summary);
    }
    Ok(EXIT_SUCCESS)
}

/// Read a batch file holding either an array of items or a full
/// `batch_generate_qrcodes` argument object.
pub fn load_batch_arguments(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Invalid JSON in batch file {}", path.display()))?;

    match value {
        Value::Array(items) => {
            let mut args = Map::new();
            args.insert("qr_codes".to_string(), Value::Array(items));
            Ok(args)
        }
        Value::Object(args) => Ok(args),
        _ => bail!(
            "Batch file {} must hold an array of QR codes or an object with a qr_codes array",
            path.display()
        ),
    }
}

async fn call_and_print(
    context: &CliToolContext,
    tool_name: &str,
    args: Map<String, Value>,
) -> CliResult<i32> {
    let result = context
        .execute_tool(tool_name, args)
        .await
        .map_err(|e| CliError::new(e.message.to_string(), EXIT_ERROR))?;

    if response_formatting::is_error(&result) {
        eprintln!("{}", response_formatting::format_error_response(&result));
        tracing::debug!("{} reported an error", tool_name);
        Ok(EXIT_WARNING)
    } else {
        println!("{}", response_formatting::format_success_response(&result));
        Ok(EXIT_SUCCESS)
    }
}
