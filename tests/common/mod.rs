//! Shared utilities for gateway integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_gateway::config::GatewayConfig;
use api_gateway::http::{build_router, AppState, Dispatcher};
use api_gateway::services::{
    AttributeService, CompanyService, Operation, PositionService, ProfessionService, Resource,
    ResourceClient, RpcFuture, ServiceRegistry,
};
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request as HttpRequest, StatusCode};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tonic::{Request, Response, Status};
use tower::ServiceExt;

/// Canned responses for each operation of family `R`.
pub struct Responses<R: Resource> {
    pub create: R::CreateResponse,
    pub get_all: R::GetAllResponse,
    pub get_by_id: R::GetByIdResponse,
    pub update: R::UpdateResponse,
    pub delete: R::DeleteResponse,
}

impl<R: Resource> Default for Responses<R> {
    fn default() -> Self {
        Self {
            create: Default::default(),
            get_all: Default::default(),
            get_by_id: Default::default(),
            update: Default::default(),
            delete: Default::default(),
        }
    }
}

/// In-memory backend for one family. Records every call it receives.
pub struct MockClient<R: Resource> {
    pub responses: Mutex<Responses<R>>,
    failure: Mutex<Option<Status>>,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<Operation>>,
    request_ids: Mutex<Vec<Option<String>>>,
    pub last_create: Mutex<Option<R::CreateRequest>>,
    pub last_get_all: Mutex<Option<R::GetAllRequest>>,
    pub last_get_by_id: Mutex<Option<R::GetByIdRequest>>,
    pub last_update: Mutex<Option<R::UpdateRequest>>,
    pub last_delete: Mutex<Option<R::DeleteRequest>>,
    cancelled: Arc<AtomicBool>,
}

impl<R: Resource> Default for MockClient<R> {
    fn default() -> Self {
        Self {
            responses: Mutex::new(Responses::default()),
            failure: Mutex::new(None),
            delay: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            request_ids: Mutex::new(Vec::new()),
            last_create: Mutex::new(None),
            last_get_all: Mutex::new(None),
            last_get_by_id: Mutex::new(None),
            last_update: Mutex::new(None),
            last_delete: Mutex::new(None),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<R: Resource> MockClient<R> {
    /// Make every call fail with `status`.
    pub fn fail_with(&self, status: Status) {
        *self.failure.lock().unwrap() = Some(status);
    }

    /// Make every call take `delay` before answering.
    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn request_ids(&self) -> Vec<Option<String>> {
        self.request_ids.lock().unwrap().clone()
    }

    /// True once an in-flight call was dropped before it finished.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn record<T>(&self, operation: Operation, request: &Request<T>) {
        self.calls.lock().unwrap().push(operation);
        let id = request
            .metadata()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.request_ids.lock().unwrap().push(id);
    }

    fn answer<T: Send + 'static>(&self, response: T) -> RpcFuture<'_, T> {
        let failure = self.failure.lock().unwrap().clone();
        let delay = *self.delay.lock().unwrap();
        let mut guard = CancelGuard {
            finished: false,
            cancelled: self.cancelled.clone(),
        };
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            guard.finished = true;
            match failure {
                Some(status) => Err(status),
                None => Ok(Response::new(response)),
            }
        })
    }
}

struct CancelGuard {
    finished: bool,
    cancelled: Arc<AtomicBool>,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.cancelled.store(true, Ordering::SeqCst);
        }
    }
}

impl<R: Resource> ResourceClient<R> for MockClient<R> {
    fn create(&self, request: Request<R::CreateRequest>) -> RpcFuture<'_, R::CreateResponse> {
        self.record(Operation::Create, &request);
        *self.last_create.lock().unwrap() = Some(request.into_inner());
        let response = self.responses.lock().unwrap().create.clone();
        self.answer(response)
    }

    fn get_all(&self, request: Request<R::GetAllRequest>) -> RpcFuture<'_, R::GetAllResponse> {
        self.record(Operation::GetAll, &request);
        *self.last_get_all.lock().unwrap() = Some(request.into_inner());
        let response = self.responses.lock().unwrap().get_all.clone();
        self.answer(response)
    }

    fn get_by_id(&self, request: Request<R::GetByIdRequest>) -> RpcFuture<'_, R::GetByIdResponse> {
        self.record(Operation::GetById, &request);
        *self.last_get_by_id.lock().unwrap() = Some(request.into_inner());
        let response = self.responses.lock().unwrap().get_by_id.clone();
        self.answer(response)
    }

    fn update(&self, request: Request<R::UpdateRequest>) -> RpcFuture<'_, R::UpdateResponse> {
        self.record(Operation::Update, &request);
        *self.last_update.lock().unwrap() = Some(request.into_inner());
        let response = self.responses.lock().unwrap().update.clone();
        self.answer(response)
    }

    fn delete(&self, request: Request<R::DeleteRequest>) -> RpcFuture<'_, R::DeleteResponse> {
        self.record(Operation::Delete, &request);
        *self.last_delete.lock().unwrap() = Some(request.into_inner());
        let response = self.responses.lock().unwrap().delete.clone();
        self.answer(response)
    }
}

/// One mock backend per family.
#[derive(Default)]
pub struct Mocks {
    pub company: Arc<MockClient<CompanyService>>,
    pub position: Arc<MockClient<PositionService>>,
    pub profession: Arc<MockClient<ProfessionService>>,
    pub attribute: Arc<MockClient<AttributeService>>,
}

impl Mocks {
    pub fn registry(&self) -> ServiceRegistry {
        ServiceRegistry::from_clients(
            self.company.clone(),
            self.position.clone(),
            self.profession.clone(),
            self.attribute.clone(),
        )
    }

    /// Total backend calls across all families.
    pub fn total_calls(&self) -> usize {
        self.company.calls().len()
            + self.position.calls().len()
            + self.profession.calls().len()
            + self.attribute.calls().len()
    }

    pub fn state(&self) -> AppState {
        self.state_with_config(GatewayConfig::default())
    }

    pub fn state_with_config(&self, config: GatewayConfig) -> AppState {
        AppState::new(Arc::new(config), Arc::new(self.registry()))
    }

    pub fn router(&self) -> Router {
        build_router(self.state())
    }

    pub fn router_with_config(&self, config: GatewayConfig) -> Router {
        build_router(self.state_with_config(config))
    }

    /// Router whose requests expire after `timeout`.
    pub fn router_with_timeout(&self, timeout: Duration) -> Router {
        let config = GatewayConfig::default();
        let dispatcher = Dispatcher::new(&config).with_request_timeout(timeout);
        build_router(self.state().with_dispatcher(dispatcher))
    }
}

/// Response parts captured from a oneshot request.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Send one request through `router` without a network listener.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = HttpRequest::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    TestResponse { status, headers, body }
}

/// Raw TCP listener that counts accepted connections. It answers every
/// connection with an empty HTTP/2 SETTINGS frame and keeps it open.
pub async fn counting_listener() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let settings = [0u8, 0, 0, 4, 0, 0, 0, 0, 0];
                let _ = socket.write_all(&settings).await;
                let mut buf = [0u8; 1024];
                while let Ok(n) = socket.read(&mut buf).await {
                    if n == 0 {
                        break;
                    }
                }
            });
        }
    });

    (addr, accepted)
}

/// An address nothing is listening on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
