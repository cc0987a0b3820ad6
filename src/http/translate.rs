//! Request translation: inbound HTTP request → backend request shape.
//!
//! Translation is structural only. Bodies are decoded as-is, list queries get
//! their defaults, identifiers are copied verbatim. No trimming, no casing,
//! no cross-field checks.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::http::response::ApiError;
use crate::services::{Pagination, ResourceId};

pub const BIND_JSON_FAILED: &str = "error while binding json";
pub const QUERY_PARAM_FAILED: &str = "error while parsing query param";
pub const PATH_PARAM_FAILED: &str = "error while parsing path param";

const DEFAULT_LIMIT: i32 = 10;
const DEFAULT_OFFSET: i32 = 0;

/// Raw list query. Values stay strings so "absent" and "present but
/// invalid" can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub search: Option<String>,
}

impl PageQuery {
    /// Apply defaults and parse. An invalid `limit` or `offset` is rejected,
    /// never replaced by its default.
    pub fn into_pagination(self) -> Result<Pagination, ApiError> {
        Ok(Pagination {
            limit: parse_param("limit", self.limit, DEFAULT_LIMIT)?,
            offset: parse_param("offset", self.offset, DEFAULT_OFFSET)?,
            search: self.search.unwrap_or_default(),
        })
    }
}

fn parse_param(key: &str, raw: Option<String>, default: i32) -> Result<i32, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: i32 = raw
        .parse()
        .map_err(|e| ApiError::client_input(QUERY_PARAM_FAILED, format!("{key}: {e}")))?;
    if value < 0 {
        return Err(ApiError::client_input(
            QUERY_PARAM_FAILED,
            format!("{key}: must not be negative"),
        ));
    }
    Ok(value)
}

/// Translate a list query into pagination parameters.
pub fn pagination(query: Result<Query<PageQuery>, QueryRejection>) -> Result<Pagination, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::client_input(QUERY_PARAM_FAILED, e.body_text()))?;
    query.into_pagination()
}

/// Take the identifier from the path, verbatim.
pub fn resource_id(path: Result<Path<String>, PathRejection>) -> Result<ResourceId, ApiError> {
    path.map(|Path(id)| ResourceId(id))
        .map_err(|e| ApiError::client_input(PATH_PARAM_FAILED, e.body_text()))
}

/// Decode a JSON body into the backend request shape.
pub fn bind_json<T: DeserializeOwned>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::client_input(BIND_JSON_FAILED, e.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ErrorKind;

    fn query(limit: Option<&str>, offset: Option<&str>, search: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(String::from),
            offset: offset.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn absent_parameters_take_defaults() {
        let page = query(None, None, None).into_pagination().unwrap();
        assert_eq!(page, Pagination { limit: 10, offset: 0, search: String::new() });
    }

    #[test]
    fn present_parameters_are_used() {
        let page = query(Some("5"), Some("20"), Some("eng")).into_pagination().unwrap();
        assert_eq!(page, Pagination { limit: 5, offset: 20, search: "eng".to_string() });
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        let err = query(Some("abc"), None, None).into_pagination().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientInput);
        assert_eq!(err.message(), QUERY_PARAM_FAILED);
        assert!(err.cause().starts_with("limit:"));
    }

    #[test]
    fn empty_offset_is_rejected_not_defaulted() {
        let err = query(None, Some(""), None).into_pagination().unwrap_err();
        assert!(err.cause().starts_with("offset:"));
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = query(Some("-1"), None, None).into_pagination().unwrap_err();
        assert_eq!(err.cause(), "limit: must not be negative");
    }

    #[test]
    fn search_is_not_normalized() {
        let page = query(None, None, Some("  Eng ")).into_pagination().unwrap();
        assert_eq!(page.search, "  Eng ");
    }
}
