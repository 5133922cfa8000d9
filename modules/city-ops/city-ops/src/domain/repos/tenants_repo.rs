use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, Tenant, TenantFilter};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Tenants are never deleted; they are disabled through `is_active`.
#[async_trait]
pub trait TenantsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Tenant>, DomainError>;

    async fn list_page(
        &self,
        filter: &TenantFilter,
        page: PageRequest,
    ) -> Result<Page<Tenant>, DomainError>;

    async fn create(&self, tenant: Tenant) -> Result<Tenant, DomainError>;

    async fn update(&self, tenant: Tenant) -> Result<Tenant, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Id of the tenant owning `domain`, if any.
    async fn find_id_by_domain(&self, domain: &str) -> Result<Option<Uuid>, DomainError>;
}
