//! Resource families and the contract each one exposes.
//!
//! Every family speaks the same five operations. [`Resource`] ties a family to
//! its message types and gRPC method paths so the client, dispatcher and
//! handlers can be written once, generically.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::services::client::ResourceClient;
use crate::services::ServiceRegistry;

/// Tag for each resource family the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Company,
    Position,
    Profession,
    Attribute,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Company,
        ResourceKind::Position,
        ResourceKind::Profession,
        ResourceKind::Attribute,
    ];

    /// Lowercase name, used in routes, config keys and log fields.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Company => "company",
            ResourceKind::Position => "position",
            ResourceKind::Profession => "profession",
            ResourceKind::Attribute => "attribute",
        }
    }

    /// Prefix of the `<PREFIX>_SERVICE_HOST` / `_PORT` variables.
    pub fn env_prefix(self) -> &'static str {
        match self {
            ResourceKind::Company => "COMPANY",
            ResourceKind::Position => "POSITION",
            ResourceKind::Profession => "PROFESSION",
            ResourceKind::Attribute => "ATTRIBUTE",
        }
    }

    /// Static message reported when `operation` fails at the backend.
    pub fn failure_message(self, operation: Operation) -> &'static str {
        use Operation::*;
        use ResourceKind::*;
        match (self, operation) {
            (Company, Create) => "error while creating company",
            (Company, GetAll) => "error getting all companies",
            (Company, GetById) => "error getting company",
            (Company, Update | Delete) => "error while updating company",

            (Position, Create) => "error while creating position",
            (Position, GetAll) => "error getting all positions",
            (Position, GetById) => "error getting position",
            (Position, Update) => "error while updating position",
            (Position, Delete) => "error while deleting position",

            (Profession, Create) => "error while creating profession",
            (Profession, GetAll) => "error getting all professions",
            (Profession, GetById) => "error getting profession",
            (Profession, Update | Delete) => "error while updating profession",

            (Attribute, Create) => "error while creating attribute",
            (Attribute, GetAll) => "error getting all attributes",
            (Attribute, GetById) => "error getting attribute",
            (Attribute, Update | Delete) => "error while updating attribute",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five operations every family supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    GetAll,
    GetById,
    Update,
    Delete,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::GetAll => "get_all",
            Operation::GetById => "get_by_id",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Reads answer 200; writes answer 201.
    pub fn is_read(self) -> bool {
        matches!(self, Operation::GetAll | Operation::GetById)
    }
}

/// Fully-qualified gRPC method paths of one backend service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceMethods {
    pub create: &'static str,
    pub get_all: &'static str,
    pub get_by_id: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl ServiceMethods {
    pub fn path(&self, operation: Operation) -> &'static str {
        match operation {
            Operation::Create => self.create,
            Operation::GetAll => self.get_all,
            Operation::GetById => self.get_by_id,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Builds `ServiceMethods` for a service whose methods are named
/// `Create`, `GetAll`, `GetById`, `Update` and `Delete`.
macro_rules! service_methods {
    ($service:literal) => {
        $crate::services::ServiceMethods {
            create: concat!("/", $service, "/Create"),
            get_all: concat!("/", $service, "/GetAll"),
            get_by_id: concat!("/", $service, "/GetById"),
            update: concat!("/", $service, "/Update"),
            delete: concat!("/", $service, "/Delete"),
        }
    };
}
pub(crate) use service_methods;

/// List query shared by every family's `GetAll`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i32,
    pub offset: i32,
    pub search: String,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            search: String::new(),
        }
    }
}

/// Identifier token for `GetById`, copied verbatim from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId(pub String);

/// A protobuf message exchanged with a backend.
pub trait RpcMessage: prost::Message + fmt::Debug + Default + Clone + 'static {}

impl<T> RpcMessage for T where T: prost::Message + fmt::Debug + Default + Clone + 'static {}

/// A resource family: its tag, backend method paths and message contracts.
pub trait Resource: Sized + Send + Sync + 'static {
    const KIND: ResourceKind;
    const METHODS: ServiceMethods;

    type CreateRequest: RpcMessage + DeserializeOwned;
    type CreateResponse: RpcMessage + Serialize;
    type GetAllRequest: RpcMessage + From<Pagination>;
    type GetAllResponse: RpcMessage + Serialize;
    type GetByIdRequest: RpcMessage + From<ResourceId>;
    type GetByIdResponse: RpcMessage + Serialize;
    type UpdateRequest: RpcMessage + DeserializeOwned;
    type UpdateResponse: RpcMessage + Serialize;
    type DeleteRequest: RpcMessage + DeserializeOwned;
    type DeleteResponse: RpcMessage + Serialize;

    /// This family's handle in the registry.
    fn client(registry: &ServiceRegistry) -> &Arc<dyn ResourceClient<Self>>;
}
