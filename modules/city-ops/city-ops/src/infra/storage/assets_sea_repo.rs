use async_trait::async_trait;
use city_ops_sdk::{Asset, AssetFilter, Page, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::AssetsRepository;
use crate::infra::storage::db::{db_err, fetch_page};
use crate::infra::storage::entity::asset::{Column, Entity as AssetEntity};
use crate::infra::storage::mapper::asset_active;

/// SeaORM-backed `AssetsRepository`.
#[derive(Clone)]
pub struct SeaAssetsRepository {
    db: DatabaseConnection,
}

impl SeaAssetsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssetsRepository for SeaAssetsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Asset>, DomainError> {
        let found = AssetEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(Asset::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &AssetFilter,
        page: PageRequest,
    ) -> Result<Page<Asset>, DomainError> {
        let cond = Condition::all()
            .add_option(filter.kind.clone().map(|k| Column::AssetType.eq(k)))
            .add_option(filter.status.map(|s| Column::Status.eq(s.as_str())))
            .add_option(filter.tenant_id.map(|t| Column::TenantId.eq(t)));
        let (rows, total) =
            fetch_page(&self.db, AssetEntity::find().filter(cond), Column::Id, page).await?;
        let items = rows
            .into_iter()
            .map(Asset::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, asset: Asset) -> Result<Asset, DomainError> {
        asset_active(&asset)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(asset)
    }

    async fn update(&self, asset: Asset) -> Result<Asset, DomainError> {
        asset_active(&asset)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(asset)
    }

    /// Incidents referencing the asset keep their `assets_involved` entries.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = AssetEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
