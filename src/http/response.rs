//! Response envelope and error classification.
//!
//! Every gateway response, success or failure, leaves through this module as
//! a [`ResponseEnvelope`]: `{code, message, data}` or `{code, message, error}`.
//! The envelope's `code` is always the HTTP status written to the wire, and
//! the matching log event is emitted here before the response is returned.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::Operation;

/// Uniform JSON wrapper for every gateway response.
///
/// Exactly one of `data` and `error` is populated; the constructors are the
/// only way to build one.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<T> {
    code: u16,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ResponseEnvelope<T> {
    pub fn success(status: StatusCode, message: &'static str, data: T) -> Self {
        Self {
            code: status.as_u16(),
            message,
            data: Some(data),
            error: None,
        }
    }
}

impl ResponseEnvelope<()> {
    pub fn failure(status: StatusCode, message: &'static str, error: String) -> Self {
        Self {
            code: status.as_u16(),
            message,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Why a request produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The inbound request could not be translated (bad JSON, bad query param).
    ClientInput,
    /// The backend call failed, for any reason.
    BackendCall,
    /// The admission gate turned the request away.
    Overloaded,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
            ErrorKind::BackendCall => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A classified request failure.
///
/// `message` is the short static description shown to clients; `cause` is
/// the underlying error text, reported in the envelope's `error` field.
#[derive(Debug, Error)]
#[error("{message}: {cause}")]
pub struct ApiError {
    kind: ErrorKind,
    message: &'static str,
    cause: String,
}

impl ApiError {
    pub fn client_input(message: &'static str, cause: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::ClientInput,
            message,
            cause: cause.to_string(),
        }
    }

    pub fn backend_call(message: &'static str, status: &tonic::Status) -> Self {
        let cause = if status.message().is_empty() {
            status.code().description().to_string()
        } else {
            status.message().to_string()
        };
        Self {
            kind: ErrorKind::BackendCall,
            message,
            cause,
        }
    }

    pub fn overloaded(cause: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Overloaded,
            message: "gateway overloaded",
            cause: cause.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        tracing::error!(code = status.as_u16(), error = %self.cause, "{}", self.message);
        ResponseEnvelope::failure(status, self.message, self.cause).into_response()
    }
}

/// Wrap a successful payload, logging it at info.
pub fn ok<T>(status: StatusCode, message: &'static str, data: T) -> Response
where
    T: Serialize + fmt::Debug,
{
    tracing::info!(code = status.as_u16(), response = ?data, "{}", message);
    ResponseEnvelope::success(status, message, data).into_response()
}

/// Render the outcome of a resource operation.
///
/// Reads succeed with `200 "OK"`, writes with `201 "ok"`.
pub fn respond<T>(operation: Operation, result: Result<T, ApiError>) -> Response
where
    T: Serialize + fmt::Debug,
{
    match result {
        Ok(data) if operation.is_read() => ok(StatusCode::OK, "OK", data),
        Ok(data) => ok(StatusCode::CREATED, "ok", data),
        Err(err) => err.into_response(),
    }
}
