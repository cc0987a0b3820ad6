//! Backend service subsystem.
//!
//! # Data Flow
//! ```text
//! ServicesConfig (one BackendEndpoint per family)
//!     → pool.rs (dial each distinct endpoint once)
//!     → client.rs (GrpcClient<R> over the shared channel)
//!     → registry.rs (one handle per family, immutable)
//!     → handlers resolve `registry.resource::<R>()` per request
//! ```
//!
//! # Design Decisions
//! - All families share one five-operation interface, `ResourceClient<R>`
//! - Message contracts live next to their family (company.rs, position.rs, ...)
//! - Connections are eager; nothing dials on the request path

pub mod attribute;
pub mod client;
pub mod company;
pub mod endpoint;
pub mod pool;
pub mod position;
pub mod profession;
pub mod registry;
pub mod resource;

pub use attribute::AttributeService;
pub use client::{GrpcClient, ResourceClient, RpcFuture};
pub use company::CompanyService;
pub use endpoint::BackendEndpoint;
pub use pool::{ConnectError, ConnectionPool};
pub use position::PositionService;
pub use profession::ProfessionService;
pub use registry::ServiceRegistry;
pub use resource::{
    Operation, Pagination, Resource, ResourceId, ResourceKind, RpcMessage, ServiceMethods,
};
