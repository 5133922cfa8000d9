use async_trait::async_trait;
use city_ops_sdk::{Alert, AlertFilter, Page, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::AlertsRepository;
use crate::infra::storage::db::{db_err, fetch_page};
use crate::infra::storage::entity::alert::{Column, Entity as AlertEntity};
use crate::infra::storage::mapper::alert_active;

/// SeaORM-backed `AlertsRepository`.
#[derive(Clone)]
pub struct SeaAlertsRepository {
    db: DatabaseConnection,
}

impl SeaAlertsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertsRepository for SeaAlertsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Alert>, DomainError> {
        let found = AlertEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(Alert::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &AlertFilter,
        page: PageRequest,
    ) -> Result<Page<Alert>, DomainError> {
        let cond = Condition::all()
            .add_option(filter.severity.map(|s| Column::Severity.eq(s.as_str())))
            .add_option(filter.kind.clone().map(|k| Column::AlertType.eq(k)))
            .add_option(filter.acknowledged.map(|a| Column::Acknowledged.eq(a)))
            .add_option(filter.tenant_id.map(|t| Column::TenantId.eq(t)));
        let (rows, total) =
            fetch_page(&self.db, AlertEntity::find().filter(cond), Column::Id, page).await?;
        let items = rows
            .into_iter()
            .map(Alert::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, alert: Alert) -> Result<Alert, DomainError> {
        alert_active(&alert)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(alert)
    }

    async fn update(&self, alert: Alert) -> Result<Alert, DomainError> {
        alert_active(&alert)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(alert)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = AlertEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
