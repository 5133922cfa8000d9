//! Service-level endpoints outside the resource routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Extension, Json};
use civitas_errors::ErrDef;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::api::rest::error::ApiResult;
use crate::domain::repos::HealthProbe;

pub const SERVICE_NAME: &str = "CivitasIQ API";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDto {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfoDto {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub version: String,
    pub services: BTreeMap<String, String>,
}

pub async fn root() -> Json<RootDto> {
    Json(RootDto {
        message: SERVICE_NAME.to_owned(),
        version: VERSION.to_owned(),
        status: "operational".to_owned(),
    })
}

pub async fn api_info() -> Json<ApiInfoDto> {
    let endpoints = [
        ("health", "/health"),
        ("api_v1", "/api/v1"),
        ("tenants", "/api/v1/tenants"),
        ("users", "/api/v1/users"),
        ("assets", "/api/v1/assets"),
        ("incidents", "/api/v1/incidents"),
        ("alerts", "/api/v1/alerts"),
        ("recommendations", "/api/v1/recommendations"),
        ("auth", "/api/v1/auth"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    Json(ApiInfoDto {
        name: SERVICE_NAME.to_owned(),
        version: VERSION.to_owned(),
        description: "Intelligent Smart City Management System".to_owned(),
        endpoints,
    })
}

/// Pings the database; 503 when it does not answer.
#[tracing::instrument(skip(probe))]
pub async fn health(Extension(probe): Extension<Arc<dyn HealthProbe>>) -> ApiResult<Json<HealthDto>> {
    if let Err(e) = probe.ping().await {
        tracing::error!(error = %e, "Health check failed");
        return Err(ErrDef::SERVICE_UNAVAILABLE.as_problem("Service unhealthy"));
    }
    let services = BTreeMap::from([("database".to_owned(), "healthy".to_owned())]);
    Ok(Json(HealthDto {
        status: "healthy".to_owned(),
        timestamp: OffsetDateTime::now_utc(),
        version: VERSION.to_owned(),
        services,
    }))
}
