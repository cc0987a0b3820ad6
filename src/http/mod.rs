//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware)
//!     → request.rs (request ID, per-request deadline)
//!     → handlers.rs (generic per-operation handler)
//!     → translate.rs (body / query / path → backend request)
//!     → dispatch.rs (one backend call, classified)
//!     → response.rs (envelope + log event)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod translate;

pub use dispatch::Dispatcher;
pub use request::{RequestContext, X_REQUEST_ID};
pub use response::{ApiError, ErrorKind, ResponseEnvelope};
pub use server::{build_router, AppState, HttpServer};
