use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incidents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub incident_type: String,
    pub severity: String,
    pub status: String,
    pub longitude: f64,
    pub latitude: f64,
    pub assigned_to: Option<Uuid>,
    pub tags: Json,
    pub metadata: Json,
    pub tenant_id: Uuid,
    pub reported_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::incident_asset::Entity")]
    IncidentAsset,
}

impl Related<super::incident_asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentAsset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
