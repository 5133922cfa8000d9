use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::deleted;
use crate::api::rest::dto::{
    CreateUserReq, MessageDto, UpdateUserReq, UserDto, UserListDto, UserListQuery,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::service::UsersService;

#[tracing::instrument(skip(svc))]
pub async fn list_users(
    Extension(svc): Extension<Arc<UsersService>>,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> ApiResult<Json<UserListDto>> {
    let (filter, params) = query.split()?;
    let page = svc.list(&filter, params).await?;
    Ok(Json(UserListDto {
        page: page.info.into(),
        users: page.items.into_iter().map(UserDto::from).collect(),
    }))
}

#[tracing::instrument(skip(svc))]
pub async fn get_user(
    Extension(svc): Extension<Arc<UsersService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<UserDto>> {
    Ok(Json(svc.get(id).await?.into()))
}

#[tracing::instrument(skip(svc, req), fields(user.tenant_id = %req.tenant_id))]
pub async fn create_user(
    Extension(svc): Extension<Arc<UsersService>>,
    ApiJson(req): ApiJson<CreateUserReq>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let user = svc.create(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[tracing::instrument(skip(svc, req))]
pub async fn update_user(
    Extension(svc): Extension<Arc<UsersService>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateUserReq>,
) -> ApiResult<Json<UserDto>> {
    Ok(Json(svc.update(id, req.try_into()?).await?.into()))
}

#[tracing::instrument(skip(svc))]
pub async fn delete_user(
    Extension(svc): Extension<Arc<UsersService>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageDto>> {
    svc.delete(id).await?;
    Ok(deleted("User"))
}
