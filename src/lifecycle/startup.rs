//! Startup orchestration.
//!
//! Fail fast: any startup error is fatal. Subsystems initialize in order
//! (metrics, backend connections, listener) and the listener binds last, so
//! no traffic is accepted while a backend is missing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{loader, ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::services::{ConnectError, ConnectionPool, ServiceRegistry};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),
}

/// A gateway ready to serve: connected registry, bound listener.
pub struct Gateway {
    pub server: HttpServer,
    pub listener: TcpListener,
}

impl Gateway {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Load and validate configuration: optional TOML file, then environment.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, StartupError> {
    Ok(loader::load(path)?)
}

/// Connect every backend, then bind the HTTP listener.
pub async fn start(config: GatewayConfig) -> Result<Gateway, StartupError> {
    if config.metrics.enabled {
        let addr: SocketAddr = config
            .metrics
            .address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let mut pool = ConnectionPool::new(Duration::from_secs(config.timeouts.connect_secs));
    let registry = ServiceRegistry::connect(&config.services, &mut pool).await?;

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(Arc::new(config), Arc::new(registry));
    Ok(Gateway { server, listener })
}
