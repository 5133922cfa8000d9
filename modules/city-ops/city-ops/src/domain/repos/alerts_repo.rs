use async_trait::async_trait;
use city_ops_sdk::{Alert, AlertFilter, Page, PageRequest};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[async_trait]
pub trait AlertsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Alert>, DomainError>;

    async fn list_page(
        &self,
        filter: &AlertFilter,
        page: PageRequest,
    ) -> Result<Page<Alert>, DomainError>;

    async fn create(&self, alert: Alert) -> Result<Alert, DomainError>;

    async fn update(&self, alert: Alert) -> Result<Alert, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
