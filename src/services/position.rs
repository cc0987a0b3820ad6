//! Position family: `position_service.PositionService`.
//!
//! Unlike the other families, position identifies records with a dedicated
//! `PositionId` message, used for get-by-id, delete and every write response.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::client::ResourceClient;
use crate::services::resource::{
    service_methods, Pagination, Resource, ResourceId, ResourceKind, ServiceMethods,
};
use crate::services::ServiceRegistry;

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionId {
    #[prost(string, tag = "1")]
    pub id: String,
}

/// Attribute value attached to a position.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionAttribute {
    #[prost(string, tag = "1")]
    pub attribute_id: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub profession_id: String,
    #[prost(string, tag = "4")]
    pub company_id: String,
    #[prost(message, repeated, tag = "5")]
    pub position_attributes: Vec<PositionAttribute>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePositionRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub profession_id: String,
    #[prost(string, tag = "3")]
    pub company_id: String,
    #[prost(message, repeated, tag = "4")]
    pub position_attributes: Vec<PositionAttribute>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllPositionRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllPositionResponse {
    #[prost(message, repeated, tag = "1")]
    pub positions: Vec<Position>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePositionRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub profession_id: String,
    #[prost(string, tag = "4")]
    pub company_id: String,
    #[prost(message, repeated, tag = "5")]
    pub position_attributes: Vec<PositionAttribute>,
}

impl From<Pagination> for GetAllPositionRequest {
    fn from(page: Pagination) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            search: page.search,
        }
    }
}

impl From<ResourceId> for PositionId {
    fn from(ResourceId(id): ResourceId) -> Self {
        Self { id }
    }
}

/// Marker for the position family.
pub struct PositionService;

impl Resource for PositionService {
    const KIND: ResourceKind = ResourceKind::Position;
    const METHODS: ServiceMethods = service_methods!("position_service.PositionService");

    type CreateRequest = CreatePositionRequest;
    type CreateResponse = PositionId;
    type GetAllRequest = GetAllPositionRequest;
    type GetAllResponse = GetAllPositionResponse;
    type GetByIdRequest = PositionId;
    type GetByIdResponse = Position;
    type UpdateRequest = UpdatePositionRequest;
    type UpdateResponse = PositionId;
    type DeleteRequest = PositionId;
    type DeleteResponse = PositionId;

    fn client(registry: &ServiceRegistry) -> &Arc<dyn ResourceClient<Self>> {
        &registry.position
    }
}
