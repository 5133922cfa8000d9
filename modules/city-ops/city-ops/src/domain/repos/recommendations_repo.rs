use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, Recommendation, RecommendationFilter};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[async_trait]
pub trait RecommendationsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Recommendation>, DomainError>;

    async fn list_page(
        &self,
        filter: &RecommendationFilter,
        page: PageRequest,
    ) -> Result<Page<Recommendation>, DomainError>;

    async fn create(&self, rec: Recommendation) -> Result<Recommendation, DomainError>;

    async fn update(&self, rec: Recommendation) -> Result<Recommendation, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
