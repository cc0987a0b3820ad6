//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (optional, via dotenvy)
//!     → config file (TOML, optional)
//!     → loader.rs (deserialize, overlay environment variables)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the handlers and `GET /config`
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never mutated afterwards
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    AdmissionConfig, AdmissionPolicy, GatewayConfig, MetricsConfig, ServicesConfig, TimeoutConfig,
};
