use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateTenantReq, TenantDto, TenantListDto, TenantListQuery, UpdateTenantReq,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::TenantsService;

#[tracing::instrument(skip(svc))]
pub async fn list_tenants(
    Extension(svc): Extension<Arc<TenantsService>>,
    ApiQuery(query): ApiQuery<TenantListQuery>,
) -> ApiResult<Json<TenantListDto>> {
    let (filter, params) = query.split();
    let page = svc.list(&filter, params).await?;
    Ok(Json(TenantListDto {
        page: page.info.into(),
        tenants: page.items.into_iter().map(TenantDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_tenant(
    Extension(svc): Extension<Arc<TenantsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<TenantDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(skip(svc, req), fields(tenant.domain = %req.domain))]
pub async fn create_tenant(
    Extension(svc): Extension<Arc<TenantsService>>,
    ApiJson(req): ApiJson<CreateTenantReq>,
) -> ApiResult<(StatusCode, Json<TenantDto>)> {
    let tenant = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(tenant.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_tenant(
    Extension(svc): Extension<Arc<TenantsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTenantReq>,
) -> ApiResult<Json<TenantDto>> {
    Ok(Json(svc.update(id, req.into()).await?.into()))
}
