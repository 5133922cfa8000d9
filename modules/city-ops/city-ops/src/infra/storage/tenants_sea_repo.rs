use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, Tenant, TenantFilter};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::TenantsRepository;
use crate::infra::storage::db::{db_err, fetch_page, unique_err};
use crate::infra::storage::entity::tenant::{Column, Entity as TenantEntity};
use crate::infra::storage::mapper::tenant_active;

/// SeaORM-backed `TenantsRepository`.
#[derive(Clone)]
pub struct SeaTenantsRepository {
    db: DatabaseConnection,
}

impl SeaTenantsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantsRepository for SeaTenantsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Tenant>, DomainError> {
        let found = TenantEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(Tenant::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &TenantFilter,
        page: PageRequest,
    ) -> Result<Page<Tenant>, DomainError> {
        let cond = Condition::all().add_option(filter.is_active.map(|v| Column::IsActive.eq(v)));
        let (rows, total) =
            fetch_page(&self.db, TenantEntity::find().filter(cond), Column::Id, page).await?;
        let items = rows
            .into_iter()
            .map(Tenant::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, tenant: Tenant) -> Result<Tenant, DomainError> {
        tenant_active(&tenant)?
            .insert(&self.db)
            .await
            .map_err(unique_err("domain"))?;
        Ok(tenant)
    }

    async fn update(&self, tenant: Tenant) -> Result<Tenant, DomainError> {
        tenant_active(&tenant)?
            .update(&self.db)
            .await
            .map_err(unique_err("domain"))?;
        Ok(tenant)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = TenantEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_id_by_domain(&self, domain: &str) -> Result<Option<Uuid>, DomainError> {
        let found = TenantEntity::find()
            .filter(Column::Domain.eq(domain))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(|m| m.id))
    }
}
