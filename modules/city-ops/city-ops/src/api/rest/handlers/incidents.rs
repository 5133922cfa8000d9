use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::deleted;
use crate::api::rest::dto::{
    CreateIncidentReq, IncidentDto, IncidentListDto, IncidentListQuery, MessageDto,
    UpdateIncidentReq,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::IncidentsService;

#[tracing::instrument(skip(svc))]
pub async fn list_incidents(
    Extension(svc): Extension<Arc<IncidentsService>>,
    ApiQuery(query): ApiQuery<IncidentListQuery>,
) -> ApiResult<Json<IncidentListDto>> {
    let (filter, params) = query.split()?;
    let page = svc.list(&filter, params).await?;
    Ok(Json(IncidentListDto {
        page: page.info.into(),
        incidents: page.items.into_iter().map(IncidentDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_incident(
    Extension(svc): Extension<Arc<IncidentsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<IncidentDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(
    skip(svc, req),
    fields(incident.kind = %req.kind, incident.tenant_id = %req.tenant_id)
)]
pub async fn create_incident(
    Extension(svc): Extension<Arc<IncidentsService>>,
    ApiJson(req): ApiJson<CreateIncidentReq>,
) -> ApiResult<(StatusCode, Json<IncidentDto>)> {
    let incident = svc.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(incident.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_incident(
    Extension(svc): Extension<Arc<IncidentsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateIncidentReq>,
) -> ApiResult<Json<IncidentDto>> {
    Ok(Json(svc.update(id, req.try_into()?).await?.into()))
}

#[tracing::instrument(skip(svc))]
pub async fn delete_incident(
    Extension(svc): Extension<Arc<IncidentsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageDto>> {
    svc.delete(id).await?;
    Ok(deleted("Incident"))
}
