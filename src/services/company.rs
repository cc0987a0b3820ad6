//! Company family: `company_service.CompanyService`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::client::ResourceClient;
use crate::services::resource::{
    service_methods, Pagination, Resource, ResourceId, ResourceKind, ServiceMethods,
};
use crate::services::ServiceRegistry;

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCompanyRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllCompanyRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
    #[prost(string, tag = "3")]
    pub search: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetAllCompanyResponse {
    #[prost(message, repeated, tag = "1")]
    pub companies: Vec<Company>,
    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GetByIdCompanyRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateCompanyRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteCompanyRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct DeleteCompanyResponse {}

impl From<Pagination> for GetAllCompanyRequest {
    fn from(page: Pagination) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            search: page.search,
        }
    }
}

impl From<ResourceId> for GetByIdCompanyRequest {
    fn from(ResourceId(id): ResourceId) -> Self {
        Self { id }
    }
}

/// Marker for the company family.
pub struct CompanyService;

impl Resource for CompanyService {
    const KIND: ResourceKind = ResourceKind::Company;
    const METHODS: ServiceMethods = service_methods!("company_service.CompanyService");

    type CreateRequest = CreateCompanyRequest;
    type CreateResponse = Company;
    type GetAllRequest = GetAllCompanyRequest;
    type GetAllResponse = GetAllCompanyResponse;
    type GetByIdRequest = GetByIdCompanyRequest;
    type GetByIdResponse = Company;
    type UpdateRequest = UpdateCompanyRequest;
    type UpdateResponse = Company;
    type DeleteRequest = DeleteCompanyRequest;
    type DeleteResponse = DeleteCompanyResponse;

    fn client(registry: &ServiceRegistry) -> &Arc<dyn ResourceClient<Self>> {
        &registry.company
    }
}
