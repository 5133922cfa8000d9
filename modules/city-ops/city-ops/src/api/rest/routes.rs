//! Route table.
//!
//! Resource routes live under `/api/v1`; `/`, `/api` and `/health` sit at the
//! root. Services reach handlers through `Extension` layers.

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers::{
    alerts, assets, auth, incidents, recommendations, system, tenants, users,
};
use crate::domain::service::AppServices;

pub const API_PREFIX: &str = "/api/v1";

fn api_v1() -> Router {
    Router::new()
        .route(
            "/tenants",
            get(tenants::list_tenants).post(tenants::create_tenant),
        )
        .route(
            "/tenants/{id}",
            get(tenants::get_tenant).put(tenants::update_tenant),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/assets", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/assets/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/assets/{id}/telemetry", get(assets::asset_telemetry))
        .route(
            "/incidents",
            get(incidents::list_incidents).post(incidents::create_incident),
        )
        .route(
            "/incidents/{id}",
            get(incidents::get_incident)
                .put(incidents::update_incident)
                .delete(incidents::delete_incident),
        )
        .route("/alerts", get(alerts::list_alerts).post(alerts::create_alert))
        .route(
            "/alerts/{id}",
            get(alerts::get_alert)
                .put(alerts::update_alert)
                .delete(alerts::delete_alert),
        )
        .route(
            "/recommendations",
            get(recommendations::list_recommendations)
                .post(recommendations::create_recommendation),
        )
        .route(
            "/recommendations/{id}",
            get(recommendations::get_recommendation)
                .put(recommendations::update_recommendation)
                .delete(recommendations::delete_recommendation),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/health", get(system::health))
}

/// Full router with every service attached.
pub fn router(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/api", get(system::api_info))
        .route("/health", get(system::health))
        .nest(API_PREFIX, api_v1())
        .layer(Extension(services.tenants.clone()))
        .layer(Extension(services.users.clone()))
        .layer(Extension(services.assets.clone()))
        .layer(Extension(services.incidents.clone()))
        .layer(Extension(services.alerts.clone()))
        .layer(Extension(services.recommendations.clone()))
        .layer(Extension(services.auth.clone()))
        .layer(Extension(services.health.clone()))
}
