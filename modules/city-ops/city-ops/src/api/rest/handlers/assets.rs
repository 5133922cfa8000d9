use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::deleted;
use crate::api::rest::dto::{
    AssetDto, AssetListDto, AssetListQuery, CreateAssetReq, MessageDto, TelemetryDto,
    TelemetryQuery, UpdateAssetReq,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::AssetsService;

#[tracing::instrument(skip(svc))]
pub async fn list_assets(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiQuery(query): ApiQuery<AssetListQuery>,
) -> ApiResult<Json<AssetListDto>> {
    let (filter, params) = query.split()?;
    let page = svc.list(&filter, params).await?;
    Ok(Json(AssetListDto {
        page: page.info.into(),
        assets: page.items.into_iter().map(AssetDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_asset(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<AssetDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(skip(svc, req), fields(asset.kind = %req.kind, asset.tenant_id = %req.tenant_id))]
pub async fn create_asset(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiJson(req): ApiJson<CreateAssetReq>,
) -> ApiResult<(StatusCode, Json<AssetDto>)> {
    let asset = svc.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(asset.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_asset(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateAssetReq>,
) -> ApiResult<Json<AssetDto>> {
    Ok(Json(svc.update(id, req.try_into()?).await?.into()))
}

#[tracing::instrument(skip(svc))]
pub async fn delete_asset(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageDto>> {
    svc.delete(id).await?;
    Ok(deleted("Asset"))
}

#[tracing::instrument(skip(svc))]
pub async fn asset_telemetry(
    Extension(svc): Extension<Arc<AssetsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<TelemetryQuery>,
) -> ApiResult<Json<TelemetryDto>> {
    Ok(Json(svc.telemetry(id, query.limit).await?.into()))
}
