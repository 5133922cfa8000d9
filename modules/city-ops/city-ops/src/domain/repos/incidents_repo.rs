use async_trait::async_trait;
use city_ops_sdk::{Incident, IncidentFilter, Page, PageRequest};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Incident rows and their `incident_assets` links are always written together.
#[async_trait]
pub trait IncidentsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Incident>, DomainError>;

    async fn list_page(
        &self,
        filter: &IncidentFilter,
        page: PageRequest,
    ) -> Result<Page<Incident>, DomainError>;

    async fn create(&self, incident: Incident) -> Result<Incident, DomainError>;

    async fn update(&self, incident: Incident) -> Result<Incident, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError>;
}
