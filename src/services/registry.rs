//! Service registry: one client handle per resource family.

use std::sync::Arc;

use crate::config::ServicesConfig;
use crate::services::client::{GrpcClient, ResourceClient};
use crate::services::pool::{ConnectError, ConnectionPool};
use crate::services::{
    AttributeService, CompanyService, PositionService, ProfessionService, Resource, ResourceKind,
};

/// Typed backend clients, built once at startup and never mutated.
///
/// Handles are shared (`Arc`) and every field is read-only after
/// construction, so concurrent handlers read it without locking.
pub struct ServiceRegistry {
    pub(crate) company: Arc<dyn ResourceClient<CompanyService>>,
    pub(crate) position: Arc<dyn ResourceClient<PositionService>>,
    pub(crate) profession: Arc<dyn ResourceClient<ProfessionService>>,
    pub(crate) attribute: Arc<dyn ResourceClient<AttributeService>>,
    connections: usize,
}

impl ServiceRegistry {
    /// Dial every configured backend through `pool` and build the clients.
    ///
    /// Families configured with the same endpoint share one connection. Any
    /// connection failure aborts construction.
    pub async fn connect(
        services: &ServicesConfig,
        pool: &mut ConnectionPool,
    ) -> Result<Self, ConnectError> {
        let company = pool.connect(services.endpoint(ResourceKind::Company)).await?;
        let position = pool.connect(services.endpoint(ResourceKind::Position)).await?;
        let profession = pool.connect(services.endpoint(ResourceKind::Profession)).await?;
        let attribute = pool.connect(services.endpoint(ResourceKind::Attribute)).await?;

        tracing::info!(connections = pool.len(), "Service registry ready");

        Ok(Self {
            company: Arc::new(GrpcClient::<CompanyService>::new(company)),
            position: Arc::new(GrpcClient::<PositionService>::new(position)),
            profession: Arc::new(GrpcClient::<ProfessionService>::new(profession)),
            attribute: Arc::new(GrpcClient::<AttributeService>::new(attribute)),
            connections: pool.len(),
        })
    }

    /// Build a registry from already-constructed clients.
    pub fn from_clients(
        company: Arc<dyn ResourceClient<CompanyService>>,
        position: Arc<dyn ResourceClient<PositionService>>,
        profession: Arc<dyn ResourceClient<ProfessionService>>,
        attribute: Arc<dyn ResourceClient<AttributeService>>,
    ) -> Self {
        Self {
            company,
            position,
            profession,
            attribute,
            connections: 0,
        }
    }

    /// Client handle for family `R`.
    pub fn resource<R: Resource>(&self) -> &Arc<dyn ResourceClient<R>> {
        R::client(self)
    }

    /// Number of distinct backend connections behind the clients.
    pub fn connections(&self) -> usize {
        self.connections
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("connections", &self.connections)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RpcFuture;
    use tonic::{Request, Response, Status};

    /// Fails every call with its own label, so the caller can tell who answered.
    struct Labelled(&'static str);

    impl Labelled {
        fn answer<T: Send + 'static>(&self) -> RpcFuture<'_, T> {
            let label = self.0;
            Box::pin(async move { Err::<Response<T>, _>(Status::unknown(label)) })
        }
    }

    impl<R: Resource> ResourceClient<R> for Labelled {
        fn create(&self, _: Request<R::CreateRequest>) -> RpcFuture<'_, R::CreateResponse> {
            self.answer()
        }
        fn get_all(&self, _: Request<R::GetAllRequest>) -> RpcFuture<'_, R::GetAllResponse> {
            self.answer()
        }
        fn get_by_id(&self, _: Request<R::GetByIdRequest>) -> RpcFuture<'_, R::GetByIdResponse> {
            self.answer()
        }
        fn update(&self, _: Request<R::UpdateRequest>) -> RpcFuture<'_, R::UpdateResponse> {
            self.answer()
        }
        fn delete(&self, _: Request<R::DeleteRequest>) -> RpcFuture<'_, R::DeleteResponse> {
            self.answer()
        }
    }

    fn registry() -> ServiceRegistry {
        ServiceRegistry::from_clients(
            Arc::new(Labelled("company")),
            Arc::new(Labelled("position")),
            Arc::new(Labelled("profession")),
            Arc::new(Labelled("attribute")),
        )
    }

    #[tokio::test]
    async fn resource_selects_the_family_client() {
        let registry = registry();

        let status = registry
            .resource::<ProfessionService>()
            .get_all(Request::new(Default::default()))
            .await
            .unwrap_err();
        assert_eq!(status.message(), "profession");

        let status = registry
            .resource::<CompanyService>()
            .delete(Request::new(Default::default()))
            .await
            .unwrap_err();
        assert_eq!(status.message(), "company");
    }

    #[test]
    fn clients_built_without_a_pool_report_no_connections() {
        assert_eq!(registry().connections(), 0);
    }
}
