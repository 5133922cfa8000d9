use std::sync::Arc;

use city_ops_sdk::{Incident, IncidentFilter, IncidentPatch, IncidentStatus, NewIncident, Page};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, ensure_tenant_exists, page_request};
use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{IncidentsRepository, TenantsRepository};
use crate::domain::validation;

pub struct IncidentsService {
    repo: Arc<dyn IncidentsRepository>,
    tenants: Arc<dyn TenantsRepository>,
    config: CityOpsConfig,
}

/// Keeps first occurrences, preserving order.
fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

impl IncidentsService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn IncidentsRepository>,
        tenants: Arc<dyn TenantsRepository>,
        config: CityOpsConfig,
    ) -> Self {
        Self {
            repo,
            tenants,
            config,
        }
    }

    fn check_transition(&self, from: IncidentStatus, to: IncidentStatus) -> Result<(), DomainError> {
        if self.config.enforce_transitions && !from.can_transition_to(to) {
            return Err(DomainError::validation(
                "status",
                format!("cannot move incident from '{from}' to '{to}'"),
            ));
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` when no incident has this id.
    pub async fn get(&self, id: Uuid) -> Result<Incident, DomainError> {
        tracing::debug!(%id, "Getting incident by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Incident", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &IncidentFilter,
        params: PageParams,
    ) -> Result<Page<Incident>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(count = page.items.len(), total = page.info.total, "Listed incidents");
        Ok(page)
    }

    /// New incidents start as `reported` with `reported_at` set to creation time.
    ///
    /// # Errors
    /// `Validation` on bad fields or unknown tenant.
    pub async fn create(&self, new: NewIncident) -> Result<Incident, DomainError> {
        tracing::info!(
            tenant_id = %new.tenant_id,
            kind = %new.kind,
            severity = %new.severity,
            "Creating incident"
        );
        validation::new_incident(&new)?;
        ensure_tenant_exists(self.tenants.as_ref(), new.tenant_id).await?;

        let now = OffsetDateTime::now_utc();
        let incident = Incident {
            id: Uuid::now_v7(),
            title: new.title,
            description: new.description,
            kind: new.kind,
            severity: new.severity,
            status: IncidentStatus::Reported,
            location: new.location,
            assigned_to: None,
            assets_involved: dedup_ids(new.assets_involved),
            tags: new.tags,
            metadata: new.metadata,
            tenant_id: new.tenant_id,
            reported_at: now,
            resolved_at: None,
            created_at: now,
            updated_at: None,
        };
        let incident = self.repo.create(incident).await?;
        tracing::info!(id = %incident.id, "Created incident");
        Ok(incident)
    }

    /// Status is a free overwrite unless `enforce_transitions` is on.
    /// Moving to `resolved`/`closed` stamps `resolved_at`; reopening clears it.
    ///
    /// # Errors
    /// `NotFound` or `Validation`.
    pub async fn update(&self, id: Uuid, patch: IncidentPatch) -> Result<Incident, DomainError> {
        tracing::info!(%id, "Updating incident");
        validation::incident_patch(&patch)?;
        let mut current = self.get(id).await?;
        let now = OffsetDateTime::now_utc();

        if let Some(next) = patch.status {
            self.check_transition(current.status, next)?;
            if next.is_finished() {
                current.resolved_at.get_or_insert(now);
            } else {
                current.resolved_at = None;
            }
            if next != current.status {
                tracing::info!(%id, from = %current.status, to = %next, "Incident status changed");
            }
            current.status = next;
        }
        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(kind) = patch.kind {
            current.kind = kind;
        }
        if let Some(severity) = patch.severity {
            current.severity = severity;
        }
        if let Some(location) = patch.location {
            current.location = location;
        }
        if let Some(assigned_to) = patch.assigned_to {
            current.assigned_to = assigned_to;
        }
        if let Some(assets) = patch.assets_involved {
            current.assets_involved = dedup_ids(assets);
        }
        if let Some(tags) = patch.tags {
            current.tags = tags;
        }
        if let Some(metadata) = patch.metadata {
            current.metadata = metadata;
        }
        current.updated_at = Some(now);

        self.repo.update(current).await
    }

    /// # Errors
    /// `NotFound` when no incident has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::info!(%id, "Deleting incident");
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Incident", id))
        }
    }
}
