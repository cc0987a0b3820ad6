//! Generic backend client.
//!
//! [`ResourceClient`] is the one interface every family's backend is reached
//! through. [`GrpcClient`] implements it over a shared tonic [`Channel`]; tests
//! substitute in-memory implementations.

use std::marker::PhantomData;

use futures_util::future::BoxFuture;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

use crate::services::resource::{Resource, RpcMessage};

/// Result of one unary backend call.
pub type RpcFuture<'a, T> = BoxFuture<'a, Result<Response<T>, Status>>;

/// The five operations of a resource family's backend.
pub trait ResourceClient<R: Resource>: Send + Sync {
    fn create(&self, request: Request<R::CreateRequest>) -> RpcFuture<'_, R::CreateResponse>;

    fn get_all(&self, request: Request<R::GetAllRequest>) -> RpcFuture<'_, R::GetAllResponse>;

    fn get_by_id(&self, request: Request<R::GetByIdRequest>) -> RpcFuture<'_, R::GetByIdResponse>;

    fn update(&self, request: Request<R::UpdateRequest>) -> RpcFuture<'_, R::UpdateResponse>;

    fn delete(&self, request: Request<R::DeleteRequest>) -> RpcFuture<'_, R::DeleteResponse>;
}

/// gRPC client for family `R`, multiplexed over a shared channel.
///
/// Cloning the channel is cheap; every clone drives the same HTTP/2
/// connection.
pub struct GrpcClient<R> {
    channel: Channel,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> GrpcClient<R> {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            _resource: PhantomData,
        }
    }

    async fn unary<Req, Resp>(
        &self,
        request: Request<Req>,
        path: &'static str,
    ) -> Result<Response<Resp>, Status>
    where
        Req: RpcMessage,
        Resp: RpcMessage,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("backend {} not ready: {}", R::KIND, e)))?;
        let codec = tonic_prost::ProstCodec::default();
        grpc.unary(request, PathAndQuery::from_static(path), codec).await
    }
}

impl<R: Resource> ResourceClient<R> for GrpcClient<R> {
    fn create(&self, request: Request<R::CreateRequest>) -> RpcFuture<'_, R::CreateResponse> {
        Box::pin(self.unary(request, R::METHODS.create))
    }

    fn get_all(&self, request: Request<R::GetAllRequest>) -> RpcFuture<'_, R::GetAllResponse> {
        Box::pin(self.unary(request, R::METHODS.get_all))
    }

    fn get_by_id(&self, request: Request<R::GetByIdRequest>) -> RpcFuture<'_, R::GetByIdResponse> {
        Box::pin(self.unary(request, R::METHODS.get_by_id))
    }

    fn update(&self, request: Request<R::UpdateRequest>) -> RpcFuture<'_, R::UpdateResponse> {
        Box::pin(self.unary(request, R::METHODS.update))
    }

    fn delete(&self, request: Request<R::DeleteRequest>) -> RpcFuture<'_, R::DeleteResponse> {
        Box::pin(self.unary(request, R::METHODS.delete))
    }
}
