//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::services::ResourceKind;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { key: String, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { key, value } => {
                write!(f, "Invalid value {:?} for environment variable {}", value, key)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: optional TOML file, then environment overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let base = match path {
        Some(path) => read_file(path)?,
        None => GatewayConfig::default(),
    };
    let config = apply_env(base, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment variables on top of `config`.
///
/// `lookup` returns the raw value of a variable, or `None` when unset. Numeric
/// variables that are set but do not parse are an error, never a default.
pub fn apply_env<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(environment) = lookup("ENVIRONMENT") {
        config.environment = environment;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.log_level = level;
    }
    if let Some(port) = lookup("HTTP_PORT") {
        // Accept the ":8080" listen-address form as well as a bare port.
        config.http_port = parse_var("HTTP_PORT", port.trim_start_matches(':'))?;
    }

    // Profession and attribute live in the position service; unless they were
    // configured separately they follow wherever position points.
    let position_before = config.services.position.clone();
    apply_endpoint_env(&mut config, ResourceKind::Position, &lookup)?;
    for kind in [ResourceKind::Profession, ResourceKind::Attribute] {
        if *config.services.endpoint(kind) == position_before {
            *config.services.endpoint_mut(kind) = config.services.position.clone();
        }
    }
    for kind in [ResourceKind::Company, ResourceKind::Profession, ResourceKind::Attribute] {
        apply_endpoint_env(&mut config, kind, &lookup)?;
    }

    if let Some(secs) = lookup("CONNECT_TIMEOUT_SECS") {
        config.timeouts.connect_secs = parse_var("CONNECT_TIMEOUT_SECS", &secs)?;
    }
    if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
        config.timeouts.request_secs = parse_var("REQUEST_TIMEOUT_SECS", &secs)?;
    }
    if let Some(enabled) = lookup("METRICS_ENABLED") {
        config.metrics.enabled = parse_var("METRICS_ENABLED", &enabled)?;
    }
    if let Some(address) = lookup("METRICS_ADDRESS") {
        config.metrics.address = address;
    }

    Ok(config)
}

fn apply_endpoint_env<F>(
    config: &mut GatewayConfig,
    kind: ResourceKind,
    lookup: &F,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = kind.env_prefix();
    let endpoint = config.services.endpoint_mut(kind);
    if let Some(host) = lookup(&format!("{prefix}_SERVICE_HOST")) {
        endpoint.host = host;
    }
    let port_key = format!("{prefix}_SERVICE_PORT");
    if let Some(port) = lookup(&port_key) {
        endpoint.port = parse_var(&port_key, &port)?;
    }
    Ok(())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        key: key.to_string(),
        value: value.to_string(),
    })
}
