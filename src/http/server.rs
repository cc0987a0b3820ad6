//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route table (four resource families × five operations, plus
//!   ping and config)
//! - Wire up middleware (request ID, tracing, CORS, panic recovery)
//! - Serve on a bound listener until shutdown is signalled

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::dispatch::Dispatcher;
use crate::http::handlers;
use crate::http::request::{request_id_header, MakeRequestUuid};
use crate::http::response::ResponseEnvelope;
use crate::services::{
    AttributeService, CompanyService, PositionService, ProfessionService, Resource,
    ServiceRegistry,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub registry: Arc<ServiceRegistry>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(config: Arc<GatewayConfig>, registry: Arc<ServiceRegistry>) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(&config));
        Self {
            config,
            registry,
            dispatcher,
        }
    }

    /// Replace the dispatcher (e.g. to shorten the request deadline).
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Arc::new(dispatcher);
        self
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an already-connected registry.
    pub fn new(config: Arc<GatewayConfig>, registry: Arc<ServiceRegistry>) -> Self {
        let state = AppState::new(config, registry);
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Routes for one resource family under `/v1`.
fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/{}", R::KIND.name());
    let item = format!("/{}/{{id}}", R::KIND.name());
    Router::new()
        .route(
            &collection,
            post(handlers::create::<R>)
                .get(handlers::get_all::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
        .route(&item, get(handlers::get_by_id::<R>))
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/ping", get(handlers::ping))
        .merge(resource_routes::<CompanyService>())
        .merge(resource_routes::<PositionService>())
        .merge(resource_routes::<ProfessionService>())
        .merge(resource_routes::<AttributeService>());

    Router::new()
        .route("/config", get(handlers::get_config))
        .nest("/v1", v1)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(code = 500, error = %detail, "Handler panicked");
    ResponseEnvelope::failure(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", detail)
        .into_response()
}
