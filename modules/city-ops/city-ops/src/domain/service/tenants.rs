use std::sync::Arc;

use city_ops_sdk::{NewTenant, Page, Tenant, TenantFilter, TenantPatch};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, page_request};
use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::TenantsRepository;
use crate::domain::validation;

pub struct TenantsService {
    repo: Arc<dyn TenantsRepository>,
    config: CityOpsConfig,
}

impl TenantsService {
    #[must_use]
    pub fn new(repo: Arc<dyn TenantsRepository>, config: CityOpsConfig) -> Self {
        Self { repo, config }
    }

    async fn ensure_domain_free(&self, domain: &str, owner: Option<Uuid>) -> Result<(), DomainError> {
        match self.repo.find_id_by_domain(domain).await? {
            Some(id) if Some(id) != owner => Err(DomainError::conflict(
                "domain",
                format!("Tenant with domain '{domain}' already exists"),
            )),
            _ => Ok(()),
        }
    }

    /// # Errors
    /// `NotFound` when no tenant has this id.
    pub async fn get(&self, id: Uuid) -> Result<Tenant, DomainError> {
        tracing::debug!(%id, "Getting tenant by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tenant", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &TenantFilter,
        params: PageParams,
    ) -> Result<Page<Tenant>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(count = page.items.len(), total = page.info.total, "Listed tenants");
        Ok(page)
    }

    /// # Errors
    /// `Validation` on bad fields, `Conflict` when the domain is taken.
    pub async fn create(&self, new: NewTenant) -> Result<Tenant, DomainError> {
        tracing::info!(domain = %new.domain, "Creating tenant");
        validation::new_tenant(&new)?;
        self.ensure_domain_free(&new.domain, None).await?;

        let tenant = Tenant {
            id: Uuid::now_v7(),
            name: new.name,
            domain: new.domain,
            settings: new.settings,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let tenant = self.repo.create(tenant).await?;
        tracing::info!(id = %tenant.id, "Created tenant");
        Ok(tenant)
    }

    /// # Errors
    /// `NotFound`, `Validation` or `Conflict`.
    pub async fn update(&self, id: Uuid, patch: TenantPatch) -> Result<Tenant, DomainError> {
        tracing::info!(%id, "Updating tenant");
        validation::tenant_patch(&patch)?;
        let mut current = self.get(id).await?;

        if let Some(domain) = patch.domain {
            if domain != current.domain {
                self.ensure_domain_free(&domain, Some(id)).await?;
            }
            current.domain = domain;
        }
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(settings) = patch.settings {
            current.settings = settings;
        }
        if let Some(is_active) = patch.is_active {
            current.is_active = is_active;
        }
        current.updated_at = Some(OffsetDateTime::now_utc());

        self.repo.update(current).await
    }
}
