//! Backend endpoint identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address of one backend RPC service instance.
///
/// Two endpoints are the same connection target exactly when host and port
/// compare equal; the connection pool keys on this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BackendEndpoint {
    pub host: String,
    pub port: u16,
}

impl BackendEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// URI used to dial the endpoint (plaintext HTTP/2).
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for BackendEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
