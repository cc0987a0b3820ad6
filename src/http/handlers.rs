//! HTTP handlers.
//!
//! One generic handler per operation serves all four resource families:
//! translate → dispatch → envelope. The route table in `server.rs`
//! instantiates them once per family.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::RequestContext;
use crate::http::response::{self, respond};
use crate::http::server::AppState;
use crate::http::translate::{self, PageQuery};
use crate::services::{Operation, Resource};

/// `POST /v1/{resource}`
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<R::CreateRequest>, JsonRejection>,
) -> Response {
    let request = match translate::bind_json(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let client = state.registry.resource::<R>();
    let result = state
        .dispatcher
        .dispatch(&ctx, R::KIND, Operation::Create, request, |req| client.create(req))
        .await;
    respond(Operation::Create, result)
}

/// `GET /v1/{resource}?search=&limit=&offset=`
pub async fn get_all<R: Resource>(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let request = match translate::pagination(query) {
        Ok(page) => R::GetAllRequest::from(page),
        Err(err) => return err.into_response(),
    };
    let client = state.registry.resource::<R>();
    let result = state
        .dispatcher
        .dispatch(&ctx, R::KIND, Operation::GetAll, request, |req| client.get_all(req))
        .await;
    respond(Operation::GetAll, result)
}

/// `GET /v1/{resource}/{id}`
pub async fn get_by_id<R: Resource>(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let request = match translate::resource_id(path) {
        Ok(id) => R::GetByIdRequest::from(id),
        Err(err) => return err.into_response(),
    };
    let client = state.registry.resource::<R>();
    let result = state
        .dispatcher
        .dispatch(&ctx, R::KIND, Operation::GetById, request, |req| client.get_by_id(req))
        .await;
    respond(Operation::GetById, result)
}

/// `PUT /v1/{resource}`
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<R::UpdateRequest>, JsonRejection>,
) -> Response {
    let request = match translate::bind_json(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let client = state.registry.resource::<R>();
    let result = state
        .dispatcher
        .dispatch(&ctx, R::KIND, Operation::Update, request, |req| client.update(req))
        .await;
    respond(Operation::Update, result)
}

/// `DELETE /v1/{resource}`
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<R::DeleteRequest>, JsonRejection>,
) -> Response {
    let request = match translate::bind_json(body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let client = state.registry.resource::<R>();
    let result = state
        .dispatcher
        .dispatch(&ctx, R::KIND, Operation::Delete, request, |req| client.delete(req))
        .await;
    respond(Operation::Delete, result)
}

/// `GET /v1/ping`
pub async fn ping() -> Response {
    response::ok(StatusCode::OK, "OK", "pong")
}

/// `GET /config`
pub async fn get_config(State(state): State<AppState>) -> Response {
    response::ok(StatusCode::OK, "OK", state.config.as_ref().clone())
}
