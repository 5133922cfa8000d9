//! Conversions between stored rows and SDK models.
//!
//! Enum columns are stored as their snake_case names and JSON columns as
//! plain values; a row that fails to decode is reported as an internal error.

use city_ops_sdk::{Alert, Asset, GeoPoint, Incident, JsonMap, Recommendation, Tenant, User};
use sea_orm::{ActiveValue::NotSet, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::infra::storage::db::corrupt;
use crate::infra::storage::entity::{alert, asset, incident, recommendation, tenant, user};

fn object(entity: &'static str, value: Value) -> Result<JsonMap, DomainError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        other => Err(corrupt(entity, format!("expected JSON object, got {other}"))),
    }
}

fn point(entity: &'static str, lng: f64, lat: f64) -> Result<GeoPoint, DomainError> {
    GeoPoint::new(lng, lat).map_err(|e| corrupt(entity, e))
}

fn to_json<T: serde::Serialize>(entity: &'static str, value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value).map_err(|e| corrupt(entity, e))
}

// --- tenants ---

impl TryFrom<tenant::Model> for Tenant {
    type Error = DomainError;

    fn try_from(m: tenant::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            name: m.name,
            domain: m.domain,
            settings: serde_json::from_value(m.settings).map_err(|e| corrupt("tenant", e))?,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

pub(crate) fn tenant_active(t: &Tenant) -> Result<tenant::ActiveModel, DomainError> {
    Ok(tenant::ActiveModel {
        id: Set(t.id),
        name: Set(t.name.clone()),
        domain: Set(t.domain.clone()),
        settings: Set(to_json("tenant", &t.settings)?),
        is_active: Set(t.is_active),
        created_at: Set(t.created_at),
        updated_at: Set(t.updated_at),
    })
}

// --- users ---

impl TryFrom<user::Model> for User {
    type Error = DomainError;

    fn try_from(m: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            email: m.email,
            name: m.name,
            role: m.role.parse().map_err(|e| corrupt("user", e))?,
            tenant_id: m.tenant_id,
            is_active: m.is_active,
            last_login: m.last_login,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Profile columns only. `password_hash` is left unset unless given.
pub(crate) fn user_active(u: &User, password_hash: Option<String>) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        email: Set(u.email.clone()),
        name: Set(u.name.clone()),
        role: Set(u.role.as_str().to_owned()),
        tenant_id: Set(u.tenant_id),
        password_hash: password_hash.map_or(NotSet, Set),
        is_active: Set(u.is_active),
        last_login: Set(u.last_login),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

// --- assets ---

impl TryFrom<asset::Model> for Asset {
    type Error = DomainError;

    fn try_from(m: asset::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            kind: m.asset_type,
            name: m.name,
            location: point("asset", m.longitude, m.latitude)?,
            properties: object("asset", m.properties)?,
            status: m.status.parse().map_err(|e| corrupt("asset", e))?,
            tenant_id: m.tenant_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

#[must_use]
pub(crate) fn asset_active(a: &Asset) -> asset::ActiveModel {
    asset::ActiveModel {
        id: Set(a.id),
        asset_type: Set(a.kind.clone()),
        name: Set(a.name.clone()),
        longitude: Set(a.location.lng()),
        latitude: Set(a.location.lat()),
        properties: Set(Value::Object(a.properties.clone())),
        status: Set(a.status.as_str().to_owned()),
        tenant_id: Set(a.tenant_id),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

// --- incidents ---

/// `assets_involved` lives in `incident_assets` and is passed in already ordered.
pub(crate) fn incident_from_row(
    m: incident::Model,
    assets: Vec<Uuid>,
) -> Result<Incident, DomainError> {
    Ok(Incident {
        id: m.id,
        title: m.title,
        description: m.description,
        kind: m.incident_type.parse().map_err(|e| corrupt("incident", e))?,
        severity: m.severity.parse().map_err(|e| corrupt("incident", e))?,
        status: m.status.parse().map_err(|e| corrupt("incident", e))?,
        location: point("incident", m.longitude, m.latitude)?,
        assigned_to: m.assigned_to,
        assets_involved: assets,
        tags: serde_json::from_value(m.tags).map_err(|e| corrupt("incident", e))?,
        metadata: object("incident", m.metadata)?,
        tenant_id: m.tenant_id,
        reported_at: m.reported_at,
        resolved_at: m.resolved_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

pub(crate) fn incident_active(i: &Incident) -> Result<incident::ActiveModel, DomainError> {
    Ok(incident::ActiveModel {
        id: Set(i.id),
        title: Set(i.title.clone()),
        description: Set(i.description.clone()),
        incident_type: Set(i.kind.as_str().to_owned()),
        severity: Set(i.severity.as_str().to_owned()),
        status: Set(i.status.as_str().to_owned()),
        longitude: Set(i.location.lng()),
        latitude: Set(i.location.lat()),
        assigned_to: Set(i.assigned_to),
        tags: Set(to_json("incident", &i.tags)?),
        metadata: Set(Value::Object(i.metadata.clone())),
        tenant_id: Set(i.tenant_id),
        reported_at: Set(i.reported_at),
        resolved_at: Set(i.resolved_at),
        created_at: Set(i.created_at),
        updated_at: Set(i.updated_at),
    })
}

// --- alerts ---

impl TryFrom<alert::Model> for Alert {
    type Error = DomainError;

    fn try_from(m: alert::Model) -> Result<Self, Self::Error> {
        let location = match (m.longitude, m.latitude) {
            (Some(lng), Some(lat)) => Some(point("alert", lng, lat)?),
            (None, None) => None,
            _ => return Err(corrupt("alert", "half of a location is missing")),
        };
        Ok(Self {
            id: m.id,
            kind: m.alert_type,
            title: m.title,
            message: m.message,
            severity: m.severity.parse().map_err(|e| corrupt("alert", e))?,
            location,
            acknowledged: m.acknowledged,
            acknowledged_by: m.acknowledged_by,
            acknowledged_at: m.acknowledged_at,
            tenant_id: m.tenant_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

#[must_use]
pub(crate) fn alert_active(a: &Alert) -> alert::ActiveModel {
    alert::ActiveModel {
        id: Set(a.id),
        alert_type: Set(a.kind.clone()),
        title: Set(a.title.clone()),
        message: Set(a.message.clone()),
        severity: Set(a.severity.as_str().to_owned()),
        longitude: Set(a.location.map(|p| p.lng())),
        latitude: Set(a.location.map(|p| p.lat())),
        acknowledged: Set(a.acknowledged),
        acknowledged_by: Set(a.acknowledged_by),
        acknowledged_at: Set(a.acknowledged_at),
        tenant_id: Set(a.tenant_id),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

// --- recommendations ---

impl TryFrom<recommendation::Model> for Recommendation {
    type Error = DomainError;

    fn try_from(m: recommendation::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            incident_id: m.incident_id,
            kind: m.recommendation_type,
            title: m.title,
            description: m.description,
            rationale: m.rationale,
            confidence: m.confidence,
            actions: serde_json::from_value(m.actions)
                .map_err(|e| corrupt("recommendation", e))?,
            status: m.status.parse().map_err(|e| corrupt("recommendation", e))?,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

pub(crate) fn recommendation_active(
    r: &Recommendation,
) -> Result<recommendation::ActiveModel, DomainError> {
    Ok(recommendation::ActiveModel {
        id: Set(r.id),
        incident_id: Set(r.incident_id),
        recommendation_type: Set(r.kind.clone()),
        title: Set(r.title.clone()),
        description: Set(r.description.clone()),
        rationale: Set(r.rationale.clone()),
        confidence: Set(r.confidence),
        actions: Set(to_json("recommendation", &r.actions)?),
        status: Set(r.status.as_str().to_owned()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use city_ops_sdk::{AlertSeverity, AssetStatus};
    use serde_json::json;
    use time::OffsetDateTime;

    fn asset_row(status: &str) -> asset::Model {
        asset::Model {
            id: Uuid::now_v7(),
            asset_type: "traffic_signal".to_owned(),
            name: "Signal 12".to_owned(),
            longitude: -73.98,
            latitude: 40.75,
            properties: json!({"lanes": 4}),
            status: status.to_owned(),
            tenant_id: Uuid::now_v7(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn asset_row_decodes() {
        let asset = Asset::try_from(asset_row("maintenance")).unwrap();
        assert_eq!(asset.status, AssetStatus::Maintenance);
        assert!((asset.location.lng() + 73.98).abs() < f64::EPSILON);
        assert_eq!(asset.properties.get("lanes"), Some(&json!(4)));
    }

    #[test]
    fn unknown_stored_enum_is_internal() {
        let err = Asset::try_from(asset_row("melted")).unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[test]
    fn alert_with_half_location_is_rejected() {
        let row = alert::Model {
            id: Uuid::now_v7(),
            alert_type: "flood".to_owned(),
            title: "Water rising".to_owned(),
            message: "Sensor 4 above threshold".to_owned(),
            severity: AlertSeverity::Warning.as_str().to_owned(),
            longitude: Some(2.35),
            latitude: None,
            acknowledged: false,
            acknowledged_by: None,
            acknowledged_at: None,
            tenant_id: Uuid::now_v7(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        assert!(Alert::try_from(row).is_err());
    }
}
