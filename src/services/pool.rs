//! Backend connection pool.
//!
//! # Responsibilities
//! - Dial each distinct backend endpoint exactly once, at startup
//! - Hand out shared channel handles to the clients built on top
//!
//! The pool is only mutated while the registry is being built. Afterwards it
//! is frozen behind an `Arc` and read without locks.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, Endpoint};

use crate::services::BackendEndpoint;

/// Failure to establish a backend connection.
#[derive(Debug, Error)]
#[error("failed to connect to backend {endpoint}: {source}")]
pub struct ConnectError {
    pub endpoint: BackendEndpoint,
    #[source]
    pub source: tonic::transport::Error,
}

/// Long-lived connections keyed by backend endpoint.
#[derive(Debug)]
pub struct ConnectionPool {
    connections: HashMap<BackendEndpoint, Channel>,
    connect_timeout: Duration,
}

impl ConnectionPool {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            connections: HashMap::new(),
            connect_timeout,
        }
    }

    /// Return the connection for `endpoint`, dialing it on first use.
    ///
    /// Repeated calls with an equal endpoint return a handle to the same
    /// underlying connection. Dialing is eager: the returned channel is
    /// already connected.
    pub async fn connect(&mut self, endpoint: &BackendEndpoint) -> Result<Channel, ConnectError> {
        if let Some(channel) = self.connections.get(endpoint) {
            tracing::debug!(endpoint = %endpoint, "Reusing backend connection");
            return Ok(channel.clone());
        }

        let channel = Endpoint::from_shared(endpoint.uri())
            .map_err(|source| ConnectError {
                endpoint: endpoint.clone(),
                source,
            })?
            .connect_timeout(self.connect_timeout)
            .connect()
            .await
            .map_err(|source| ConnectError {
                endpoint: endpoint.clone(),
                source,
            })?;

        tracing::info!(endpoint = %endpoint, "Connected to backend");
        self.connections.insert(endpoint.clone(), channel.clone());
        Ok(channel)
    }

    /// Number of distinct connections established.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
