#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared helpers for city-ops integration tests.

#![allow(dead_code)]

use city_ops::config::{AuthConfig, CityOpsConfig};
use city_ops::domain::service::AppServices;
use city_ops::{CityOpsModule, GeoPoint, Tenant};
use city_ops_sdk::{
    IncidentSeverity, IncidentType, JsonMap, NewAsset, NewIncident, NewTenant, NewUser,
    TenantSettings, UserRole,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn inmem_db() -> DatabaseConnection {
    let db = city_ops::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to in-memory database");
    CityOpsModule::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn module_with(config: CityOpsConfig) -> CityOpsModule {
    let db = inmem_db().await;
    CityOpsModule::new(&db, &config, AuthConfig::default())
}

pub async fn module() -> CityOpsModule {
    module_with(CityOpsConfig::default()).await
}

pub fn point(lng: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lng, lat).unwrap()
}

pub async fn seed_tenant(svc: &AppServices, domain: &str) -> Tenant {
    svc.tenants
        .create(NewTenant {
            name: format!("City of {domain}"),
            domain: domain.to_owned(),
            settings: TenantSettings::default(),
        })
        .await
        .unwrap()
}

pub fn new_asset(tenant_id: Uuid, name: &str) -> NewAsset {
    NewAsset {
        kind: "traffic_signal".to_owned(),
        name: name.to_owned(),
        location: point(-73.9857, 40.7484),
        properties: JsonMap::new(),
        status: city_ops_sdk::AssetStatus::Active,
        tenant_id,
    }
}

pub fn new_incident(tenant_id: Uuid, title: &str, severity: IncidentSeverity) -> NewIncident {
    NewIncident {
        title: title.to_owned(),
        description: "Reported by a field crew".to_owned(),
        kind: IncidentType::WaterMainBreak,
        severity,
        location: point(2.3522, 48.8566),
        assets_involved: Vec::new(),
        tags: vec!["water".to_owned(), "street".to_owned()],
        metadata: JsonMap::new(),
        tenant_id,
    }
}

pub const PASSWORD: &str = "correct-horse-battery";

pub fn new_user(tenant_id: Uuid, email: &str) -> NewUser {
    NewUser {
        email: email.to_owned(),
        name: "Dana Ops".to_owned(),
        role: UserRole::Operator,
        tenant_id,
        password: PASSWORD.to_owned(),
    }
}
