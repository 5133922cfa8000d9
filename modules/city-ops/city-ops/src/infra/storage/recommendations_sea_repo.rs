use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, Recommendation, RecommendationFilter};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::RecommendationsRepository;
use crate::infra::storage::db::{db_err, fetch_page};
use crate::infra::storage::entity::recommendation::{Column, Entity as RecommendationEntity};
use crate::infra::storage::mapper::recommendation_active;

/// SeaORM-backed `RecommendationsRepository`.
#[derive(Clone)]
pub struct SeaRecommendationsRepository {
    db: DatabaseConnection,
}

impl SeaRecommendationsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendationsRepository for SeaRecommendationsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Recommendation>, DomainError> {
        let found = RecommendationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(Recommendation::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &RecommendationFilter,
        page: PageRequest,
    ) -> Result<Page<Recommendation>, DomainError> {
        let cond = Condition::all()
            .add_option(filter.status.map(|s| Column::Status.eq(s.as_str())))
            .add_option(filter.kind.clone().map(|k| Column::RecommendationType.eq(k)))
            .add_option(filter.incident_id.map(|i| Column::IncidentId.eq(i)));
        let (rows, total) = fetch_page(
            &self.db,
            RecommendationEntity::find().filter(cond),
            Column::Id,
            page,
        )
        .await?;
        let items = rows
            .into_iter()
            .map(Recommendation::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, rec: Recommendation) -> Result<Recommendation, DomainError> {
        recommendation_active(&rec)?
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rec)
    }

    async fn update(&self, rec: Recommendation) -> Result<Recommendation, DomainError> {
        recommendation_active(&rec)?
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rec)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = RecommendationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
