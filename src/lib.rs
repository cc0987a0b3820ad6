//! REST/JSON edge gateway in front of the company and position gRPC services.
//!
//! # Architecture Overview
//!
//! ```text
//!   HTTP client
//!       │  POST/GET/PUT/DELETE /v1/{company,position,profession,attribute}
//!       ▼
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ http::server   route table + middleware                      │
//!   │   └─ handlers  translate ─▶ dispatch ─▶ envelope             │
//!   │                              │                               │
//!   │ services::registry   one ResourceClient<R> per family        │
//!   │ services::pool       one channel per distinct host:port      │
//!   └──────────────────────────────┼───────────────────────────────┘
//!                                  ▼
//!                company_service / position_service (gRPC)
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod services;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use services::ServiceRegistry;
