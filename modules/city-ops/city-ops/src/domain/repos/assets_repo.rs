use async_trait::async_trait;
use city_ops_sdk::{Asset, AssetFilter, Page, PageRequest};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[async_trait]
pub trait AssetsRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Asset>, DomainError>;

    async fn list_page(
        &self,
        filter: &AssetFilter,
        page: PageRequest,
    ) -> Result<Page<Asset>, DomainError>;

    async fn create(&self, asset: Asset) -> Result<Asset, DomainError>;

    async fn update(&self, asset: Asset) -> Result<Asset, DomainError>;

    /// Removes the asset and its incident associations.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
