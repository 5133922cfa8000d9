use std::collections::HashMap;

use async_trait::async_trait;
use city_ops_sdk::{Incident, IncidentFilter, Page, PageRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::IncidentsRepository;
use crate::infra::storage::db::{db_err, fetch_page};
use crate::infra::storage::entity::incident::{self, Column, Entity as IncidentEntity};
use crate::infra::storage::entity::incident_asset;
use crate::infra::storage::mapper::{incident_active, incident_from_row};

/// SeaORM-backed `IncidentsRepository`.
///
/// `assets_involved` is stored in `incident_assets`, one row per asset with
/// its list position, and is rewritten as a whole on every update.
#[derive(Clone)]
pub struct SeaIncidentsRepository {
    db: DatabaseConnection,
}

impl SeaIncidentsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Asset ids per incident, in stored order.
    async fn load_assets(&self, ids: Vec<Uuid>) -> Result<HashMap<Uuid, Vec<Uuid>>, DomainError> {
        let mut by_incident: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        if ids.is_empty() {
            return Ok(by_incident);
        }
        let links = incident_asset::Entity::find()
            .filter(incident_asset::Column::IncidentId.is_in(ids))
            .order_by_asc(incident_asset::Column::IncidentId)
            .order_by_asc(incident_asset::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        for link in links {
            by_incident
                .entry(link.incident_id)
                .or_default()
                .push(link.asset_id);
        }
        Ok(by_incident)
    }

    fn into_incident(
        model: incident::Model,
        assets: &mut HashMap<Uuid, Vec<Uuid>>,
    ) -> Result<Incident, DomainError> {
        let linked = assets.remove(&model.id).unwrap_or_default();
        incident_from_row(model, linked)
    }
}

async fn write_links<C: ConnectionTrait>(conn: &C, incident: &Incident) -> Result<(), DomainError> {
    if incident.assets_involved.is_empty() {
        return Ok(());
    }
    let mut links = Vec::with_capacity(incident.assets_involved.len());
    for (position, asset_id) in incident.assets_involved.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| DomainError::validation("assets_involved", "too many assets"))?;
        links.push(incident_asset::ActiveModel {
            incident_id: Set(incident.id),
            asset_id: Set(*asset_id),
            position: Set(position),
        });
    }
    incident_asset::Entity::insert_many(links)
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

async fn clear_links<C: ConnectionTrait>(conn: &C, incident_id: Uuid) -> Result<(), DomainError> {
    incident_asset::Entity::delete_many()
        .filter(incident_asset::Column::IncidentId.eq(incident_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

#[async_trait]
impl IncidentsRepository for SeaIncidentsRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Incident>, DomainError> {
        let Some(model) = IncidentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let mut assets = self.load_assets(vec![id]).await?;
        Self::into_incident(model, &mut assets).map(Some)
    }

    async fn list_page(
        &self,
        filter: &IncidentFilter,
        page: PageRequest,
    ) -> Result<Page<Incident>, DomainError> {
        let cond = Condition::all()
            .add_option(filter.status.map(|s| Column::Status.eq(s.as_str())))
            .add_option(filter.severity.map(|s| Column::Severity.eq(s.as_str())))
            .add_option(filter.kind.map(|k| Column::IncidentType.eq(k.as_str())))
            .add_option(filter.tenant_id.map(|t| Column::TenantId.eq(t)));
        let (rows, total) =
            fetch_page(&self.db, IncidentEntity::find().filter(cond), Column::Id, page).await?;

        let mut assets = self.load_assets(rows.iter().map(|m| m.id).collect()).await?;
        let items = rows
            .into_iter()
            .map(|m| Self::into_incident(m, &mut assets))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn create(&self, incident: Incident) -> Result<Incident, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        incident_active(&incident)?
            .insert(&txn)
            .await
            .map_err(db_err)?;
        write_links(&txn, &incident).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(incident)
    }

    async fn update(&self, incident: Incident) -> Result<Incident, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        incident_active(&incident)?
            .update(&txn)
            .await
            .map_err(db_err)?;
        clear_links(&txn, incident.id).await?;
        write_links(&txn, &incident).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(incident)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        clear_links(&txn, id).await?;
        let result = IncidentEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let count = IncidentEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}
