//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and dispatcher produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (JSON in production)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - The request ID rides on every HTTP span and every backend call
//! - Metrics are cheap no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
