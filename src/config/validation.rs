//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. Every violation is reported,
//! not just the first.

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::schema::GatewayConfig;
use crate::services::ResourceKind;

const ENVIRONMENTS: [&str; 3] = ["develop", "staging", "production"];

/// Upper bound for any configured timeout (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a configuration, returning all problems found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !ENVIRONMENTS.contains(&config.environment.as_str()) {
        errors.push(ValidationError::new(
            "environment",
            format!("must be one of {}", ENVIRONMENTS.join(", ")),
        ));
    }
    if EnvFilter::try_new(&config.log_level).is_err() {
        errors.push(ValidationError::new("log_level", "not a valid log filter"));
    }
    if config.http_port == 0 {
        errors.push(ValidationError::new("http_port", "must be non-zero"));
    }

    for kind in ResourceKind::ALL {
        let endpoint = config.services.endpoint(kind);
        if endpoint.host.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("services.{}.host", kind.name()),
                "must not be empty",
            ));
        }
        if endpoint.port == 0 {
            errors.push(ValidationError::new(
                format!("services.{}.port", kind.name()),
                "must be non-zero",
            ));
        }
    }

    for (field, secs) in [
        ("timeouts.connect_secs", config.timeouts.connect_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        } else if secs > MAX_TIMEOUT_SECS {
            errors.push(ValidationError::new(
                field,
                format!("must not exceed {MAX_TIMEOUT_SECS} seconds"),
            ));
        }
    }
    if let Some(admission) = &config.admission {
        if admission.max_in_flight == 0 {
            errors.push(ValidationError::new(
                "admission.max_in_flight",
                "must be greater than zero",
            ));
        }
    }
    if config.metrics.enabled && config.metrics.address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new("metrics.address", "not a socket address"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::AdmissionConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let mut config = GatewayConfig::default();
        config.environment = "qa".to_string();
        config.services.attribute.host = String::new();
        config.services.company.port = 0;
        config.timeouts.request_secs = 0;
        config.admission = Some(AdmissionConfig {
            max_in_flight: 0,
            policy: Default::default(),
        });

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "environment",
                "services.company.port",
                "services.attribute.host",
                "timeouts.request_secs",
                "admission.max_in_flight",
            ]
        );
    }

    #[test]
    fn oversized_timeouts_are_rejected() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = u64::MAX;
        config.timeouts.connect_secs = MAX_TIMEOUT_SECS + 1;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["timeouts.connect_secs", "timeouts.request_secs"]);

        config.timeouts.request_secs = MAX_TIMEOUT_SECS;
        config.timeouts.connect_secs = MAX_TIMEOUT_SECS;
        assert!(validate_config(&config).is_ok());
    }
}
