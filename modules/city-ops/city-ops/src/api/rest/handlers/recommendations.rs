use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::deleted;
use crate::api::rest::dto::{
    CreateRecommendationReq, MessageDto, RecommendationDto, RecommendationListDto,
    RecommendationListQuery, UpdateRecommendationReq,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::RecommendationsService;

#[tracing::instrument(skip(svc))]
pub async fn list_recommendations(
    Extension(svc): Extension<Arc<RecommendationsService>>,
    ApiQuery(query): ApiQuery<RecommendationListQuery>,
) -> ApiResult<Json<RecommendationListDto>> {
    let (filter, params) = query.split()?;
    let page = svc.list(&filter, params).await?;
    Ok(Json(RecommendationListDto {
        page: page.info.into(),
        recommendations: page.items.into_iter().map(RecommendationDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_recommendation(
    Extension(svc): Extension<Arc<RecommendationsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<RecommendationDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(skip(svc, req), fields(recommendation.kind = %req.kind))]
pub async fn create_recommendation(
    Extension(svc): Extension<Arc<RecommendationsService>>,
    ApiJson(req): ApiJson<CreateRecommendationReq>,
) -> ApiResult<(StatusCode, Json<RecommendationDto>)> {
    let rec = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(rec.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_recommendation(
    Extension(svc): Extension<Arc<RecommendationsService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateRecommendationReq>,
) -> ApiResult<Json<RecommendationDto>> {
    Ok(Json(svc.update(id, req.try_into()?).await?.into()))
}

#[tracing::instrument(skip(svc))]
pub async fn delete_recommendation(
    Extension(svc): Extension<Arc<RecommendationsService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageDto>> {
    svc.delete(id).await?;
    Ok(deleted("Recommendation"))
}
