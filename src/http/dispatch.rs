//! Backend call dispatch.
//!
//! # Responsibilities
//! - Make exactly one backend call per inbound request (no retry, no fan-out)
//! - Bind the call to the request: gRPC timeout, request-ID metadata, and a
//!   local deadline race
//! - Classify every failure as a backend-call error
//! - Record per-call metrics
//!
//! Cancellation comes for free from ownership: when the client goes away the
//! handler future is dropped, which drops the in-flight call and its permit.

use std::time::{Duration, Instant};

use tonic::{Request, Status};

use crate::config::GatewayConfig;
use crate::http::request::{RequestContext, X_REQUEST_ID};
use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::security::AdmissionGate;
use crate::services::{Operation, ResourceKind, RpcFuture};

/// Invokes backend operations on behalf of handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    request_timeout: Duration,
    admission: Option<AdmissionGate>,
}

impl Dispatcher {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            admission: config.admission.as_ref().map(AdmissionGate::new),
        }
    }

    /// Override the per-request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Call `call` once with `message`, bounded by the context's deadline.
    pub async fn dispatch<'a, Req, Resp>(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        operation: Operation,
        message: Req,
        call: impl FnOnce(Request<Req>) -> RpcFuture<'a, Resp>,
    ) -> Result<Resp, ApiError> {
        let failure = kind.failure_message(operation);
        let started = Instant::now();

        let _permit = match &self.admission {
            Some(gate) => match gate.admit(ctx.deadline).await {
                Ok(permit) => Some(permit),
                Err(e) => {
                    let err = ApiError::overloaded(e);
                    metrics::record_dispatch(kind, operation, err.kind().status().as_u16(), started);
                    return Err(err);
                }
            },
            None => None,
        };

        let mut request = Request::new(message);
        request.set_timeout(ctx.remaining());
        if let Ok(value) = ctx.request_id.parse() {
            request.metadata_mut().insert(X_REQUEST_ID, value);
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            resource = %kind,
            operation = operation.name(),
            "Dispatching backend call"
        );

        let result = match tokio::time::timeout_at(ctx.deadline, call(request)).await {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(ApiError::backend_call(failure, &status)),
            Err(_elapsed) => Err(ApiError::backend_call(
                failure,
                &Status::deadline_exceeded("backend call exceeded the request deadline"),
            )),
        };

        let status = match &result {
            Ok(_) if operation.is_read() => 200,
            Ok(_) => 201,
            Err(err) => err.kind().status().as_u16(),
        };
        metrics::record_dispatch(kind, operation, status, started);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdmissionConfig, AdmissionPolicy};
    use crate::http::response::ErrorKind;
    use ::metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;
    use tonic::Response;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&GatewayConfig::default())
    }

    #[tokio::test]
    async fn success_unwraps_the_response() {
        let ctx = RequestContext::new("req-1", Duration::from_secs(1));
        let out = dispatcher()
            .dispatch(&ctx, ResourceKind::Company, Operation::GetById, 7u32, |req| {
                Box::pin(async move { Ok(Response::new(req.into_inner() * 2)) })
            })
            .await
            .unwrap();
        assert_eq!(out, 14);
    }

    #[tokio::test]
    async fn request_carries_timeout_and_request_id() {
        let ctx = RequestContext::new("req-2", Duration::from_secs(5));
        let out = dispatcher()
            .dispatch(&ctx, ResourceKind::Position, Operation::GetAll, (), |req| {
                let id = req
                    .metadata()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                let has_timeout = req.metadata().get("grpc-timeout").is_some();
                Box::pin(async move { Ok(Response::new((id, has_timeout))) })
            })
            .await
            .unwrap();
        assert_eq!(out, (Some("req-2".to_string()), true));
    }

    #[tokio::test]
    async fn status_errors_are_backend_failures() {
        let ctx = RequestContext::new("req-3", Duration::from_secs(1));
        let err = dispatcher()
            .dispatch(&ctx, ResourceKind::Attribute, Operation::Delete, (), |_req| {
                Box::pin(async { Err::<Response<()>, _>(Status::not_found("missing")) })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendCall);
        assert_eq!(err.message(), "error while updating attribute");
        assert_eq!(err.cause(), "missing");
    }

    #[tokio::test]
    async fn slow_backend_hits_the_deadline() {
        let ctx = RequestContext::new("req-4", Duration::from_millis(20));
        let err = dispatcher()
            .dispatch(&ctx, ResourceKind::Company, Operation::GetAll, (), |_req| {
                Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok(Response::new(()))
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BackendCall);
        assert_eq!(err.cause(), "backend call exceeded the request deadline");
    }

    #[tokio::test]
    async fn full_reject_gate_returns_overloaded() {
        let mut config = GatewayConfig::default();
        config.admission = Some(AdmissionConfig {
            max_in_flight: 1,
            policy: AdmissionPolicy::Reject,
        });
        let dispatcher = Dispatcher::new(&config);
        let gate = dispatcher.admission.clone().unwrap();
        let ctx = RequestContext::new("req-5", Duration::from_secs(1));
        let _held = gate.admit(ctx.deadline).await.unwrap();

        let recorder = StatusRecorder::default();
        let _local = ::metrics::set_default_local_recorder(&recorder);

        let mut called = false;
        let err = dispatcher
            .dispatch(&ctx, ResourceKind::Company, Operation::Create, (), |_req| {
                called = true;
                Box::pin(async { Ok(Response::new(())) })
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overloaded);
        assert!(!called);
        assert_eq!(recorder.statuses(), vec!["503".to_string()]);
    }

    /// Captures the `status` label of every counter registration.
    #[derive(Default)]
    struct StatusRecorder(Mutex<Vec<String>>);

    impl StatusRecorder {
        fn statuses(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Recorder for StatusRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            if let Some(label) = key.labels().find(|l| l.key() == "status") {
                self.0.lock().unwrap().push(label.value().to_string());
            }
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }
}
