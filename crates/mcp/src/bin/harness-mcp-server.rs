// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use harness_mcp::config::{Cli, Command, StdioArgs};
use harness_mcp::{build_registry, init_toolsets, McpServer, ServerConfig};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Stdio(args) => run_stdio(args).await,
    }
}

async fn run_stdio(args: StdioArgs) -> Result<()> {
    let config = ServerConfig::resolve(args)?;
    init_tracing(&config)?;

    tracing::info!(
        base_url = %config.base_url,
        read_only = config.read_only,
        toolsets = ?config.toolsets,
        "Harness MCP Server starting..."
    );

    let client = Arc::new(config.client()?);
    let toolsets = init_toolsets(client, &config)?;
    let registry = build_registry(&toolsets);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    tokio::select! {
        result = server.serve(tokio::io::stdin(), tokio::io::stdout()) => result?,
        _ = shutdown_signal() => tracing::info!("Shutting down server..."),
    }

    Ok(())
}

/// Logs go to stderr or the configured file; stdout carries the protocol.
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let default_filter = if config.debug { "debug" } else { "harness=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
