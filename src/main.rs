//! API gateway binary.
//!
//! Loads configuration (`.env`, optional TOML file, environment), connects to
//! every backend service, then serves HTTP until SIGINT/SIGTERM. Any startup
//! failure, including an unreachable backend, exits non-zero.

use std::path::PathBuf;

use api_gateway::lifecycle::{self, Shutdown};
use api_gateway::observability::logging;
use clap::Parser;

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "REST/JSON gateway for the company and position services", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = lifecycle::load_config(cli.config.as_deref())?;
    logging::init(&config);

    tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = %config.environment,
        http_port = config.http_port,
        company = %config.services.company,
        position = %config.services.position,
        profession = %config.services.profession,
        attribute = %config.services.attribute,
        "Configuration loaded"
    );

    let gateway = match lifecycle::start(config).await {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(address = %gateway.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    gateway.server.run(gateway.listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
