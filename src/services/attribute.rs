//! Attribute family: `position_service.AttributeService`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::client::ResourceClient;
use crate::services::resource::{
    service_methods, Pagination, Resource, ResourceId, ResourceKind, ServiceMethods,
};
use crate::services::ServiceRegistry;

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub attribute_type: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAttributeRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub attribute_type: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllAttributeRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllAttributeResponse {
    #[prost(message, repeated, tag = "1")]
    pub attributes: Vec<Attribute>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetByIdAttributeRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateAttributeRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub attribute_type: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteAttributeRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct DeleteAttributeResponse {}

impl From<Pagination> for GetAllAttributeRequest {
    fn from(page: Pagination) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            search: page.search,
        }
    }
}

impl From<ResourceId> for GetByIdAttributeRequest {
    fn from(ResourceId(id): ResourceId) -> Self {
        Self { id }
    }
}

/// Marker for the attribute family.
pub struct AttributeService;

impl Resource for AttributeService {
    const KIND: ResourceKind = ResourceKind::Attribute;
    const METHODS: ServiceMethods = service_methods!("position_service.AttributeService");

    type CreateRequest = CreateAttributeRequest;
    type CreateResponse = Attribute;
    type GetAllRequest = GetAllAttributeRequest;
    type GetAllResponse = GetAllAttributeResponse;
    type GetByIdRequest = GetByIdAttributeRequest;
    type GetByIdResponse = Attribute;
    type UpdateRequest = UpdateAttributeRequest;
    type UpdateResponse = Attribute;
    type DeleteRequest = DeleteAttributeRequest;
    type DeleteResponse = DeleteAttributeResponse;

    fn client(registry: &ServiceRegistry) -> &Arc<dyn ResourceClient<Self>> {
        &registry.attribute
    }
}
