//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files and
//! serialization back out through `GET /config`.

use serde::{Deserialize, Serialize};

use crate::services::{BackendEndpoint, ResourceKind};

/// Root configuration for the API gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Deployment environment (develop, staging, production).
    pub environment: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// HTTP listen port.
    pub http_port: u16,

    /// Backend RPC endpoints, one per resource family.
    pub services: ServicesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Optional admission gate in front of backend calls.
    pub admission: Option<AdmissionConfig>,

    /// Prometheus exporter settings.
    pub metrics: MetricsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            environment: "develop".to_string(),
            log_level: "debug".to_string(),
            http_port: 8080,
            services: ServicesConfig::default(),
            timeouts: TimeoutConfig::default(),
            admission: None,
            metrics: MetricsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }

    /// True when running in the production environment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Backend endpoint per resource family.
///
/// Position, profession and attribute are served by the same backend
/// process, so by default they share one endpoint (and one connection).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub company: BackendEndpoint,
    pub position: BackendEndpoint,
    pub profession: BackendEndpoint,
    pub attribute: BackendEndpoint,
}

impl ServicesConfig {
    /// Endpoint configured for the given resource family.
    pub fn endpoint(&self, kind: ResourceKind) -> &BackendEndpoint {
        match kind {
            ResourceKind::Company => &self.company,
            ResourceKind::Position => &self.position,
            ResourceKind::Profession => &self.profession,
            ResourceKind::Attribute => &self.attribute,
        }
    }

    pub(crate) fn endpoint_mut(&mut self, kind: ResourceKind) -> &mut BackendEndpoint {
        match kind {
            ResourceKind::Company => &mut self.company,
            ResourceKind::Position => &mut self.position,
            ResourceKind::Profession => &mut self.profession,
            ResourceKind::Attribute => &mut self.attribute,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        let position = BackendEndpoint::new("localhost", 9102);
        Self {
            company: BackendEndpoint::new("localhost", 9105),
            profession: position.clone(),
            attribute: position.clone(),
            position,
        }
    }
}

/// Timeout configuration for backend connections and calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for one inbound request's backend call, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// What the admission gate does when every permit is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionPolicy {
    /// Wait for a permit, bounded by the request deadline.
    #[default]
    Queue,
    /// Fail immediately with 503.
    Reject,
}

/// Bounded admission gate around backend calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdmissionConfig {
    /// Maximum concurrent backend calls.
    pub max_in_flight: usize,

    #[serde(default)]
    pub policy: AdmissionPolicy,
}

/// Metrics exporter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus scrape endpoint.
    pub enabled: bool,

    /// Metrics endpoint bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "0.0.0.0:9090".to_string(),
        }
    }
}
