use std::process;

use clap::CommandFactory;
use qrsave::Config;
use qrsave_cli::cli::{Cli, Commands};
use qrsave_cli::error::handle_cli_result;
use qrsave_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use qrsave_cli::logging;
use qrsave_cli::mcp_integration::CliToolContext;
use qrsave_cli::qrcode::{self, BatchOptions, GenerateOptions};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let Some(command) = cli.command else {
        let code = match Cli::command().print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_ERROR,
        };
        process::exit(code);
    };

    let level = logging::log_level(cli.quiet, cli.debug, cli.verbose);
    if matches!(command, Commands::Serve) {
        let log_file = cli.log_file.unwrap_or_else(logging::default_log_path);
        logging::init_logging(level, Some(&log_file));
    } else {
        logging::init_logging(level, None);
    }
    colored::control::set_override(Cli::should_use_color());

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_ERROR);
        }
    };

    let exit_code = match command {
        Commands::Serve => {
            tracing::info!("Starting MCP server");
            run_server(config).await
        }
        command => run_tool_command(command, config).await,
    };

    process::exit(exit_code);
}

async fn run_server(config: Config) -> i32 {
    match serve(config).await {
        Ok(()) => {
            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {:#}", e);
            EXIT_WARNING
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    use anyhow::Context;
    use qrsave::mcp::McpServer;
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;

    let server = McpServer::new(config);
    let running = serve_server(server, stdio())
        .await
        .context("Failed to start MCP server on stdio")?;
    tracing::info!("MCP server started successfully");

    tokio::select! {
        quit = running.waiting() => {
            let reason = quit.context("MCP server task failed")?;
            tracing::info!("MCP client disconnected: {:?}", reason);
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown signal received");
        }
    }
    Ok(())
}

async fn run_tool_command(command: Commands, config: Config) -> i32 {
    let context = CliToolContext::new(config);
    let result = match command {
        Commands::Generate {
            content,
            output_dir,
            filename,
            error_correction,
            size,
            border,
            no_metadata,
        } => {
            tracing::debug!("Running generate command");
            qrcode::run_generate(
                &context,
                GenerateOptions {
                    content,
                    output_dir,
                    filename,
                    error_correction,
                    size,
                    border,
                    no_metadata,
                },
            )
            .await
        }
        Commands::Batch {
            file,
            output_dir,
            error_correction,
            size,
        } => {
            tracing::debug!("Running batch command with {}", file.display());
            qrcode::run_batch(
                &context,
                BatchOptions {
                    file,
                    output_dir,
                    error_correction,
                    size,
                },
            )
            .await
        }
        Commands::List { directory } => {
            tracing::debug!("Running list command");
            qrcode::run_list(&context, directory).await
        }
        Commands::Tools { schema } => qrcode::run_tools(&context, schema),
        Commands::Serve => unreachable!("serve is dispatched before tool commands"),
    };
    handle_cli_result(result)
}
