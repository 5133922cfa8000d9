use std::sync::Arc;

use city_ops_sdk::{Asset, AssetFilter, AssetPatch, NewAsset, Page};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, ensure_tenant_exists, page_request};
use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{AssetsRepository, TenantsRepository};
use crate::domain::validation;

/// Telemetry read model. Ingestion does not exist yet, so readings are always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTelemetry {
    pub asset_id: Uuid,
    pub limit: u64,
    pub readings: Vec<serde_json::Value>,
    pub message: String,
}

pub struct AssetsService {
    repo: Arc<dyn AssetsRepository>,
    tenants: Arc<dyn TenantsRepository>,
    config: CityOpsConfig,
}

impl AssetsService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn AssetsRepository>,
        tenants: Arc<dyn TenantsRepository>,
        config: CityOpsConfig,
    ) -> Self {
        Self {
            repo,
            tenants,
            config,
        }
    }

    /// # Errors
    /// `NotFound` when no asset has this id.
    pub async fn get(&self, id: Uuid) -> Result<Asset, DomainError> {
        tracing::debug!(%id, "Getting asset by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Asset", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &AssetFilter,
        params: PageParams,
    ) -> Result<Page<Asset>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(count = page.items.len(), total = page.info.total, "Listed assets");
        Ok(page)
    }

    /// # Errors
    /// `Validation` on bad fields or unknown tenant.
    pub async fn create(&self, new: NewAsset) -> Result<Asset, DomainError> {
        tracing::info!(tenant_id = %new.tenant_id, kind = %new.kind, "Creating asset");
        validation::new_asset(&new)?;
        ensure_tenant_exists(self.tenants.as_ref(), new.tenant_id).await?;

        let asset = Asset {
            id: Uuid::now_v7(),
            kind: new.kind,
            name: new.name,
            location: new.location,
            properties: new.properties,
            status: new.status,
            tenant_id: new.tenant_id,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let asset = self.repo.create(asset).await?;
        tracing::info!(id = %asset.id, "Created asset");
        Ok(asset)
    }

    /// # Errors
    /// `NotFound` or `Validation`.
    pub async fn update(&self, id: Uuid, patch: AssetPatch) -> Result<Asset, DomainError> {
        tracing::info!(%id, "Updating asset");
        validation::asset_patch(&patch)?;
        let mut current = self.get(id).await?;

        if let Some(kind) = patch.kind {
            current.kind = kind;
        }
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(location) = patch.location {
            current.location = location;
        }
        if let Some(properties) = patch.properties {
            current.properties = properties;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = Some(OffsetDateTime::now_utc());

        self.repo.update(current).await
    }

    /// # Errors
    /// `NotFound` when no asset has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::info!(%id, "Deleting asset");
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("Asset", id))
        }
    }

    /// # Errors
    /// `InvalidParameter` when `limit` is outside `[1, max_telemetry_limit]`,
    /// `NotFound` when the asset is absent.
    pub async fn telemetry(
        &self,
        id: Uuid,
        limit: Option<i64>,
    ) -> Result<AssetTelemetry, DomainError> {
        let max = self.config.max_telemetry_limit;
        let limit = match limit {
            None => self.config.default_telemetry_limit,
            Some(raw) => u64::try_from(raw)
                .ok()
                .filter(|l| (1..=max).contains(l))
                .ok_or_else(|| {
                    DomainError::invalid_parameter(format!(
                        "limit must be between 1 and {max}, got {raw}"
                    ))
                })?,
        };
        let asset = self.get(id).await?;
        Ok(AssetTelemetry {
            asset_id: asset.id,
            limit,
            readings: Vec::new(),
            message: "Telemetry ingestion is not available yet".to_owned(),
        })
    }
}
