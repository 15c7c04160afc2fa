// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use synthcore_mcp::{ConfigOverrides, McpServer, ServerConfig, ServerError};

#[derive(Parser, Debug)]
#[command(name = "synthcore-mcp")]
#[command(about = "Synthcore cognitive architecture MCP server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "SYNTHCORE_CONFIG", default_value = "synthcore.toml")]
    config: PathBuf,

    /// Server name reported during initialize
    #[arg(long, env = "SERVER_NAME")]
    server_name: Option<String>,

    /// Server version reported during initialize
    #[arg(long, env = "SERVER_VERSION")]
    server_version: Option<String>,

    /// Minimum acceptable agent resonance
    #[arg(long, env = "MIN_RESONANCE_THRESHOLD")]
    min_resonance: Option<f64>,

    /// Maximum acceptable agent ethical drift
    #[arg(long, env = "MAX_ETHICAL_DRIFT")]
    max_ethical_drift: Option<f64>,

    /// Maximum acceptable agent reflexive instability
    #[arg(long, env = "MAX_REFLEXIVE_INSTABILITY")]
    max_reflexive_instability: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synthcore=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("Synthcore MCP Server starting...");

    let config = ServerConfig::load(&args.config)?.with_overrides(ConfigOverrides {
        server_name: args.server_name,
        server_version: args.server_version,
        min_resonance: args.min_resonance,
        max_ethical_drift: args.max_ethical_drift,
        max_reflexive_instability: args.max_reflexive_instability,
    });

    let server = McpServer::new(&config);

    match server.run().await {
        Ok(()) => Ok(()),
        Err(ServerError::Validation { violations }) => {
            tracing::error!(
                "Refusing to serve: {} agent(s) outside thresholds",
                violations.len()
            );
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
