use std::sync::Arc;

use city_ops_sdk::{
    NewRecommendation, Page, Recommendation, RecommendationFilter, RecommendationPatch,
    RecommendationStatus,
};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, page_request};
use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{IncidentsRepository, RecommendationsRepository};
use crate::domain::validation;

pub struct RecommendationsService {
    repo: Arc<dyn RecommendationsRepository>,
    incidents: Arc<dyn IncidentsRepository>,
    config: CityOpsConfig,
}

impl RecommendationsService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn RecommendationsRepository>,
        incidents: Arc<dyn IncidentsRepository>,
        config: CityOpsConfig,
    ) -> Self {
        Self {
            repo,
            incidents,
            config,
        }
    }

    async fn ensure_incident_exists(&self, incident_id: Option<Uuid>) -> Result<(), DomainError> {
        if let Some(id) = incident_id
            && !self.incidents.exists(id).await?
        {
            return Err(DomainError::validation(
                "incident_id",
                format!("incident {id} does not exist"),
            ));
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` when no recommendation has this id.
    pub async fn get(&self, id: Uuid) -> Result<Recommendation, DomainError> {
        tracing::debug!(%id, "Getting recommendation by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Recommendation", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &RecommendationFilter,
        params: PageParams,
    ) -> Result<Page<Recommendation>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(
            count = page.items.len(),
            total = page.info.total,
            "Listed recommendations"
        );
        Ok(page)
    }

    /// # Errors
    /// `Validation` on bad fields, out-of-range confidence or unknown incident.
    pub async fn create(&self, new: NewRecommendation) -> Result<Recommendation, DomainError> {
        tracing::info!(kind = %new.kind, confidence = new.confidence, "Creating recommendation");
        validation::new_recommendation(&new)?;
        self.ensure_incident_exists(new.incident_id).await?;

        let rec = Recommendation {
            id: Uuid::now_v7(),
            incident_id: new.incident_id,
            kind: new.kind,
            title: new.title,
            description: new.description,
            rationale: new.rationale,
            confidence: new.confidence,
            actions: new.actions,
            status: RecommendationStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let rec = self.repo.create(rec).await?;
        tracing::info!(id = %rec.id, "Created recommendation");
        Ok(rec)
    }

    /// # Errors
    /// `NotFound` or `Validation`.
    pub async fn update(
        &self,
        id: Uuid,
        patch: RecommendationPatch,
    ) -> Result<Recommendation, DomainError> {
        tracing::info!(%id, "Updating recommendation");
        validation::recommendation_patch(&patch)?;
        let mut current = self.get(id).await?;

        if let Some(incident_id) = patch.incident_id {
            self.ensure_incident_exists(incident_id).await?;
            current.incident_id = incident_id;
        }
        if let Some(kind) = patch.kind {
            current.kind = kind;
        }
        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(rationale) = patch.rationale {
            current.rationale = rationale;
        }
        if let Some(confidence) = patch.confidence {
            current.confidence = confidence;
        }
        if let Some(actions) = patch.actions {
            current.actions = actions;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = Some(OffsetDateTime::now_utc());

        self.repo.update(current).await
    }

    /// # Errors
    /// `NotFound` when no recommendation has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::info!(%id, "Deleting recommendation");
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Recommendation", id))
        }
    }
}
