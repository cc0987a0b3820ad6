//! Request identity and per-request context.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the client did not send one
//! - Carry the request ID and the backend-call deadline to the dispatcher
//!
//! # Design Decisions
//! - Request ID is assigned by the outermost layer, before tracing starts
//! - The deadline is fixed when the handler starts, not when the call starts

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue, Request},
};
use tokio::time::Instant;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::validation::MAX_TIMEOUT_SECS;
use crate::http::server::AppState;

/// Header carrying the request ID, inbound, outbound and to backends.
pub const X_REQUEST_ID: &str = "x-request-id";

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Longest deadline a request can carry.
pub const MAX_DEADLINE: Duration = Duration::from_secs(MAX_TIMEOUT_SECS);

/// Request-scoped context handed to the dispatcher.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub deadline: Instant,
}

impl RequestContext {
    /// The deadline is `timeout` from now, capped at [`MAX_DEADLINE`].
    pub fn new(request_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: Instant::now() + timeout.min(MAX_DEADLINE),
        }
    }

    /// Time left before the deadline (zero once it has passed).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        Ok(Self::new(request_id, state.dispatcher.request_timeout()))
    }
}
