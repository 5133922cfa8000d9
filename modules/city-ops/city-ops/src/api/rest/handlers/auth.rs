use std::sync::Arc;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use axum::{Extension, Json};

use crate::api::rest::dto::{LoginForm, MessageDto, TokenDto, UserDto};
use crate::api::rest::error::ApiResult;
use crate::api::rest::extract::ApiForm;
use crate::domain::error::DomainError;
use crate::domain::service::AuthService;

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, DomainError> {
    let not_authenticated = || DomainError::unauthorized("Not authenticated");
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(not_authenticated)?;
    let (scheme, token) = value.split_once(' ').ok_or_else(not_authenticated)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(not_authenticated());
    }
    Ok(token)
}

#[tracing::instrument(skip(svc, form), fields(username = %form.username))]
pub async fn login(
    Extension(svc): Extension<Arc<AuthService>>,
    ApiForm(form): ApiForm<LoginForm>,
) -> ApiResult<Json<TokenDto>> {
    let outcome = svc.login(&form.username, &form.password).await?;
    Ok(Json(outcome.into()))
}

#[tracing::instrument(skip(svc, headers))]
pub async fn me(
    Extension(svc): Extension<Arc<AuthService>>,
    headers: HeaderMap,
) -> ApiResult<Json<UserDto>> {
    let token = bearer_token(&headers)?;
    Ok(Json(svc.me(token).await?.into()))
}

/// Tokens are stateless; logout only checks that one was presented.
#[tracing::instrument(skip(headers))]
pub async fn logout(headers: HeaderMap) -> ApiResult<Json<MessageDto>> {
    bearer_token(&headers)?;
    Ok(Json(MessageDto::new("Successfully logged out")))
}

pub async fn register() -> ApiResult<Json<TokenDto>> {
    Err(DomainError::unimplemented("User registration").into())
}

pub async fn refresh() -> ApiResult<Json<TokenDto>> {
    Err(DomainError::unimplemented("Token refresh").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
        assert!(bearer_token(&HeaderMap::new()).is_err());
    }
}
