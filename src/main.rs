//! Aries Bridge - a thin REST front for a Hyperledger Aries agent's admin API

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aries_bridge::agent::{AgentClient, AgentService};
use aries_bridge::api::{self, AppState};
use aries_bridge::config::Config;

#[derive(Parser)]
#[command(name = "aries-bridge")]
#[command(about = "REST front for a Hyperledger Aries agent's admin API")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Agent admin API URL (overrides config)
        #[arg(long)]
        agent_url: Option<String>,
    },

    /// Print the agent status
    Status,

    /// List agent connections
    Connections,

    /// Write a default config file
    Init {
        /// Where to write it (default: user config directory)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("aries_bridge={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    match cli.command {
        Commands::Init { path } => {
            let path = path.unwrap_or(config_path);
            if path.exists() {
                anyhow::bail!("Config already exists at {}", path.display());
            }

            Config::default().save(&path)?;
            println!("✓ Config written to {}", path.display());
        }

        Commands::Serve { port, agent_url } => {
            let mut config = Config::load_from(&config_path)?;
            if let Some(url) = agent_url {
                config.agent.admin_url = url;
                config.validate()?;
            }
            let port = port.unwrap_or(config.http_port);

            let client = AgentClient::new(&config.agent);
            tracing::info!("Forwarding to agent at {}", client.base_url());

            let router = api::create_router(AppState::new(Arc::new(client)));
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

            println!("Aries bridge running at http://localhost:{}", port);
            println!("  API:      http://localhost:{}/api/aries/...", port);
            println!("  API Docs: http://localhost:{}/api/docs", port);
            println!("  Health:   http://localhost:{}/health", port);

            let shutdown = CancellationToken::new();
            tokio::spawn({
                let shutdown = shutdown.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::info!("Shutting down");
                    }
                    shutdown.cancel();
                }
            });

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await?;
        }

        Commands::Status => {
            let config = Config::load_from(&config_path)?;
            let status = AgentClient::new(&config.agent).get_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }

        Commands::Connections => {
            let config = Config::load_from(&config_path)?;
            let connections = AgentClient::new(&config.agent).get_connections().await?;
            println!("{}", serde_json::to_string_pretty(&connections)?);
        }
    }

    Ok(())
}
