use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;

/// Error correction level accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ErrorCorrectionArg {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrectionArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qrsave")]
#[command(version)]
#[command(about = "Generate QR codes as PNG files, from the shell or as an MCP server")]
#[command(long_about = "
qrsave generates QR codes and saves them to disk as PNG files, each with a
JSON metadata file describing how it was produced. The same tools are served
over the Model Context Protocol (MCP) so an assistant can call them.

Example usage:
  qrsave serve                                  # Run as MCP server over stdio
  qrsave generate \"https://example.com\"         # Write ./qr_output/qr_<timestamp>_httpsexamplecom.png
  qrsave batch --file codes.json                # Generate many codes and a batch manifest
  qrsave list ./qr_output/                      # Show what has been generated
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// YAML configuration file with tool defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file used by `serve` (default: ~/.qrsave/mcp.log)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs qrsave as an MCP server on stdin/stdout. The server exposes three tools:

- generate_and_save_qrcode
- batch_generate_qrcodes
- list_generated_qrcodes

Logs are written to ~/.qrsave/mcp.log (or --log-file) because stdout carries
the protocol.

Example:
  qrsave serve
  qrsave --config qrsave.yaml serve
")]
    Serve,
    /// Generate one QR code and save it as PNG
    #[command(long_about = "
Encodes CONTENT as a QR code and writes <output-dir>/<filename>.png, plus
<filename>_metadata.json unless --no-metadata is given.

Examples:
  qrsave generate \"Hello World!\"
  qrsave generate \"https://example.com\" --filename website -e H --size 8
")]
    Generate {
        /// Text, URL or data to encode
        content: String,

        /// Directory to save files in
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Base filename without extension
        #[arg(short, long)]
        filename: Option<String>,

        /// Error correction level
        #[arg(short, long, value_enum, ignore_case = true)]
        error_correction: Option<ErrorCorrectionArg>,

        /// Module size factor (1-20); modules are 2 * size pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Quiet zone width in modules (1-20)
        #[arg(short, long)]
        border: Option<u32>,

        /// Do not write the metadata file
        #[arg(long)]
        no_metadata: bool,
    },
    /// Generate many QR codes from a JSON file
    #[command(long_about = "
Reads a JSON file holding either an array of items or an object with a
`qr_codes` array (plus optional `output_directory`, `errorCorrectionLevel`
and `size`). Each item has `id`, `content`, and optional `filename` and
`type`. Command line options override values from the file.

Example codes.json:
  [
    {\"id\": \"site\", \"content\": \"https://example.com\", \"type\": \"url\"},
    {\"id\": \"mail\", \"content\": \"mailto:team@example.com\", \"type\": \"email\"}
  ]

Example:
  qrsave batch --file codes.json --output-dir ./codes/
")]
    Batch {
        /// JSON file describing the batch
        #[arg(long, value_name = "PATH")]
        file: PathBuf,

        /// Directory to save files in
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Error correction level for every item
        #[arg(short, long, value_enum, ignore_case = true)]
        error_correction: Option<ErrorCorrectionArg>,

        /// Module size factor for every item (1-20)
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// List generated QR codes in a directory
    List {
        /// Directory to scan (default: the configured output directory)
        directory: Option<String>,
    },
    /// Show the tools offered over MCP
    Tools {
        /// Print full tool definitions, including input schemas, as JSON
        #[arg(long)]
        schema: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    #[allow(dead_code)]
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["qrsave", "--help"]);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["qrsave", "--version"]);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from_args(["qrsave"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_serve_subcommand() {
        let cli = Cli::try_parse_from_args(["qrsave", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_cli_generate_subcommand() {
        let cli = Cli::try_parse_from_args([
            "qrsave",
            "generate",
            "Hello",
            "--filename",
            "hello",
            "-e",
            "h",
            "--size",
            "8",
            "--no-metadata",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Generate {
                content,
                output_dir,
                filename,
                error_correction,
                size,
                border,
                no_metadata,
            }) => {
                assert_eq!(content, "Hello");
                assert!(output_dir.is_none());
                assert_eq!(filename.as_deref(), Some("hello"));
                assert_eq!(error_correction, Some(ErrorCorrectionArg::H));
                assert_eq!(size, Some(8));
                assert!(border.is_none());
                assert!(no_metadata);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_generate_requires_content() {
        let result = Cli::try_parse_from_args(["qrsave", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_batch_requires_file() {
        assert!(Cli::try_parse_from_args(["qrsave", "batch"]).is_err());
        let cli = Cli::try_parse_from_args(["qrsave", "batch", "--file", "codes.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Batch { .. })));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from_args([
            "qrsave",
            "list",
            "./out",
            "--config",
            "qrsave.yaml",
            "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("qrsave.yaml")));
        match cli.command {
            Some(Commands::List { directory }) => assert_eq!(directory.as_deref(), Some("./out")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
