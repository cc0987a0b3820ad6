//! Profession family: `position_service.ProfessionService`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::client::ResourceClient;
use crate::services::resource::{
    service_methods, Pagination, Resource, ResourceId, ResourceKind, ServiceMethods,
};
use crate::services::ServiceRegistry;

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Profession {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateProfessionRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllProfessionRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllProfessionResponse {
    #[prost(message, repeated, tag = "1")]
    pub professions: Vec<Profession>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetByIdProfessionRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProfessionRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteProfessionRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct DeleteProfessionResponse {}

impl From<Pagination> for GetAllProfessionRequest {
    fn from(page: Pagination) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            search: page.search,
        }
    }
}

impl From<ResourceId> for GetByIdProfessionRequest {
    fn from(ResourceId(id): ResourceId) -> Self {
        Self { id }
    }
}

/// Marker for the profession family.
pub struct ProfessionService;

impl Resource for ProfessionService {
    const KIND: ResourceKind = ResourceKind::Profession;
    const METHODS: ServiceMethods = service_methods!("position_service.ProfessionService");

    type CreateRequest = CreateProfessionRequest;
    type CreateResponse = Profession;
    type GetAllRequest = GetAllProfessionRequest;
    type GetAllResponse = GetAllProfessionResponse;
    type GetByIdRequest = GetByIdProfessionRequest;
    type GetByIdResponse = Profession;
    type UpdateRequest = UpdateProfessionRequest;
    type UpdateResponse = Profession;
    type DeleteRequest = DeleteProfessionRequest;
    type DeleteResponse = DeleteProfessionResponse;

    fn client(registry: &ServiceRegistry) -> &Arc<dyn ResourceClient<Self>> {
        &registry.profession
    }
}
