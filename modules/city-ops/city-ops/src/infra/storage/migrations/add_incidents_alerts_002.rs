//! Incidents with their asset links, alerts and recommendations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Incidents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Incidents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Incidents::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Incidents::Description).text().not_null())
                    .col(ColumnDef::new(Incidents::IncidentType).string_len(64).not_null())
                    .col(ColumnDef::new(Incidents::Severity).string_len(32).not_null())
                    .col(ColumnDef::new(Incidents::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Incidents::Longitude).double().not_null())
                    .col(ColumnDef::new(Incidents::Latitude).double().not_null())
                    .col(ColumnDef::new(Incidents::AssignedTo).uuid())
                    .col(ColumnDef::new(Incidents::Tags).json().not_null())
                    .col(ColumnDef::new(Incidents::Metadata).json().not_null())
                    .col(ColumnDef::new(Incidents::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Incidents::ReportedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incidents::ResolvedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Incidents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incidents::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_incidents_tenant_status")
                    .table(Incidents::Table)
                    .col(Incidents::TenantId)
                    .col(Incidents::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IncidentAssets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IncidentAssets::IncidentId).uuid().not_null())
                    .col(ColumnDef::new(IncidentAssets::AssetId).uuid().not_null())
                    .col(ColumnDef::new(IncidentAssets::Position).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(IncidentAssets::IncidentId)
                            .col(IncidentAssets::AssetId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_incident_assets_asset_id")
                    .table(IncidentAssets::Table)
                    .col(IncidentAssets::AssetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alerts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alerts::AlertType).string_len(100).not_null())
                    .col(ColumnDef::new(Alerts::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Alerts::Message).text().not_null())
                    .col(ColumnDef::new(Alerts::Severity).string_len(32).not_null())
                    .col(ColumnDef::new(Alerts::Longitude).double())
                    .col(ColumnDef::new(Alerts::Latitude).double())
                    .col(
                        ColumnDef::new(Alerts::Acknowledged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alerts::AcknowledgedBy).uuid())
                    .col(ColumnDef::new(Alerts::AcknowledgedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Alerts::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Alerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alerts::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Recommendations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recommendations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recommendations::IncidentId).uuid())
                    .col(
                        ColumnDef::new(Recommendations::RecommendationType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Recommendations::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Recommendations::Description).text().not_null())
                    .col(ColumnDef::new(Recommendations::Rationale).text().not_null())
                    .col(ColumnDef::new(Recommendations::Confidence).double().not_null())
                    .col(ColumnDef::new(Recommendations::Actions).json().not_null())
                    .col(
                        ColumnDef::new(Recommendations::Status)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Recommendations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Recommendations::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Recommendations::Table.into_iden(),
            Alerts::Table.into_iden(),
            IncidentAssets::Table.into_iden(),
            Incidents::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Incidents {
    Table,
    Id,
    Title,
    Description,
    IncidentType,
    Severity,
    Status,
    Longitude,
    Latitude,
    AssignedTo,
    Tags,
    Metadata,
    TenantId,
    ReportedAt,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum IncidentAssets {
    Table,
    IncidentId,
    AssetId,
    Position,
}

#[derive(DeriveIden)]
enum Alerts {
    Table,
    Id,
    AlertType,
    Title,
    Message,
    Severity,
    Longitude,
    Latitude,
    Acknowledged,
    AcknowledgedBy,
    AcknowledgedAt,
    TenantId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Recommendations {
    Table,
    Id,
    IncidentId,
    RecommendationType,
    Title,
    Description,
    Rationale,
    Confidence,
    Actions,
    Status,
    CreatedAt,
    UpdatedAt,
}
