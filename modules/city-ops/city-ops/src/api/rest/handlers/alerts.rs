use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::deleted;
use crate::api::rest::dto::{
    AlertDto, AlertListDto, AlertListQuery, CreateAlertReq, MessageDto, UpdateAlertReq,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::AlertsService;

#[tracing::instrument(skip(svc))]
pub async fn list_alerts(
    Extension(svc): Extension<Arc<AlertsService>>,
    ApiQuery(query): ApiQuery<AlertListQuery>,
) -> ApiResult<Json<AlertListDto>> {
    let (filter, params) = query.split()?;
    let page = svc.list(&filter, params).await?;
    Ok(Json(AlertListDto {
        page: page.info.into(),
        alerts: page.items.into_iter().map(AlertDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_alert(
    Extension(svc): Extension<Arc<AlertsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<AlertDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(skip(svc, req), fields(alert.kind = %req.kind, alert.severity = %req.severity))]
pub async fn create_alert(
    Extension(svc): Extension<Arc<AlertsService>>,
    ApiJson(req): ApiJson<CreateAlertReq>,
) -> ApiResult<(StatusCode, Json<AlertDto>)> {
    let alert = svc.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(alert.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_alert(
    Extension(svc): Extension<Arc<AlertsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateAlertReq>,
) -> ApiResult<Json<AlertDto>> {
    Ok(Json(svc.update(id, req.try_into()?).await?.into()))
}

#[tracing::instrument(skip(svc))]
pub async fn delete_alert(
    Extension(svc): Extension<Arc<AlertsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageDto>> {
    svc.delete(id).await?;
    Ok(deleted("Alert"))
}
