use std::sync::Arc;

use city_ops_sdk::{Alert, AlertFilter, AlertPatch, NewAlert, Page};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, ensure_tenant_exists, page_request};
use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{AlertsRepository, TenantsRepository};
use crate::domain::validation;

pub struct AlertsService {
    repo: Arc<dyn AlertsRepository>,
    tenants: Arc<dyn TenantsRepository>,
    config: CityOpsConfig,
}

impl AlertsService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn AlertsRepository>,
        tenants: Arc<dyn TenantsRepository>,
        config: CityOpsConfig,
    ) -> Self {
        Self {
            repo,
            tenants,
            config,
        }
    }

    /// # Errors
    /// `NotFound` when no alert has this id.
    pub async fn get(&self, id: Uuid) -> Result<Alert, DomainError> {
        tracing::debug!(%id, "Getting alert by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Alert", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &AlertFilter,
        params: PageParams,
    ) -> Result<Page<Alert>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(count = page.items.len(), total = page.info.total, "Listed alerts");
        Ok(page)
    }

    /// # Errors
    /// `Validation` on bad fields or unknown tenant.
    pub async fn create(&self, new: NewAlert) -> Result<Alert, DomainError> {
        tracing::info!(tenant_id = %new.tenant_id, severity = %new.severity, "Creating alert");
        validation::new_alert(&new)?;
        ensure_tenant_exists(self.tenants.as_ref(), new.tenant_id).await?;

        let alert = Alert {
            id: Uuid::now_v7(),
            kind: new.kind,
            title: new.title,
            message: new.message,
            severity: new.severity,
            location: new.location,
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
            tenant_id: new.tenant_id,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let alert = self.repo.create(alert).await?;
        tracing::info!(id = %alert.id, "Created alert");
        Ok(alert)
    }

    /// After the patch is applied, an acknowledged alert always has
    /// `acknowledged_at`; an unacknowledged one has neither timestamp nor acknowledger.
    /// Naming an acknowledger for an alert that stays unacknowledged is rejected.
    ///
    /// # Errors
    /// `NotFound` or `Validation`.
    pub async fn update(&self, id: Uuid, patch: AlertPatch) -> Result<Alert, DomainError> {
        tracing::info!(%id, "Updating alert");
        validation::alert_patch(&patch)?;
        let mut current = self.get(id).await?;
        let now = OffsetDateTime::now_utc();

        let names_acknowledger = matches!(patch.acknowledged_by, Some(Some(_)));
        if names_acknowledger && !patch.acknowledged.unwrap_or(current.acknowledged) {
            return Err(DomainError::validation(
                "acknowledged_by",
                "can only be set on an acknowledged alert",
            ));
        }

        if let Some(kind) = patch.kind {
            current.kind = kind;
        }
        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(message) = patch.message {
            current.message = message;
        }
        if let Some(severity) = patch.severity {
            current.severity = severity;
        }
        if let Some(location) = patch.location {
            current.location = location;
        }
        if let Some(by) = patch.acknowledged_by {
            current.acknowledged_by = by;
        }
        if let Some(acknowledged) = patch.acknowledged {
            current.acknowledged = acknowledged;
        }

        if current.acknowledged {
            current.acknowledged_at.get_or_insert(now);
        } else {
            current.acknowledged_at = None;
            current.acknowledged_by = None;
        }
        current.updated_at = Some(now);

        self.repo.update(current).await
    }

    /// # Errors
    /// `NotFound` when no alert has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::info!(%id, "Deleting alert");
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Alert", id))
        }
    }
}
