//! Tripscape - Travel booking support backend
//!
//! Serves the travel chat API and the live-agent WebSocket endpoints that
//! pair waiting customers with support agents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripscape::{config::TripscapeConfig, server};

#[derive(Parser)]
#[command(name = "tripscape")]
#[command(author = "Tripscape Team")]
#[command(version)]
#[command(about = "Travel booking support backend")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TRIPSCAPE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the backend server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tripscape={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => TripscapeConfig::load(path)?,
        None => TripscapeConfig::default(),
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn run_server(
    mut config: TripscapeConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Tripscape backend");

    // Chat collaborators (hosted model, knowledge store, catalog matcher)
    // are wired in by the embedding deployment; without them the chat
    // endpoint answers with a degraded reply while live-agent support
    // remains fully functional.
    let state = Arc::new(server::AppState::new(config));
    server::serve(state).await?;

    Ok(())
}

fn show_config(config: Option<&TripscapeConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
