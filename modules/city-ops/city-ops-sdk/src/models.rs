//! Entity models, create payloads and partial patches.
//!
//! Patches follow one rule: `None` keeps the stored value. Nullable fields use
//! `Option<Option<T>>`, where `Some(None)` clears the value.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::geo::GeoPoint;
use crate::lifecycle::{
    ActionPriority, AlertSeverity, AssetStatus, IncidentSeverity, IncidentStatus, IncidentType,
    RecommendationStatus, UserRole,
};

/// Free-form JSON object attached to assets and incidents.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

// --- tenants ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub webhook_urls: Vec<String>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            webhook_urls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantSettings {
    pub timezone: String,
    pub currency: String,
    pub language: String,
    pub emergency_contacts: Vec<String>,
    pub notification_preferences: NotificationPreferences,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_owned(),
            currency: "USD".to_owned(),
            language: "en".to_owned(),
            emergency_contacts: Vec::new(),
            notification_preferences: NotificationPreferences::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub settings: TenantSettings,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    pub name: String,
    pub domain: String,
    pub settings: TenantSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantPatch {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub settings: Option<TenantSettings>,
    pub is_active: Option<bool>,
}

// --- users ---

/// A user account. The password hash never leaves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub tenant_id: Uuid,
    pub is_active: bool,
    pub last_login: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub tenant_id: Uuid,
    /// Plain-text password, hashed before storage.
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("tenant_id", &self.tenant_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

// --- assets ---

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    /// Free-form asset type, e.g. `traffic_signal`.
    pub kind: String,
    pub name: String,
    pub location: GeoPoint,
    pub properties: JsonMap,
    pub status: AssetStatus,
    pub tenant_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub kind: String,
    pub name: String,
    pub location: GeoPoint,
    pub properties: JsonMap,
    pub status: AssetStatus,
    pub tenant_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPatch {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub location: Option<GeoPoint>,
    pub properties: Option<JsonMap>,
    pub status: Option<AssetStatus>,
}

// --- incidents ---

#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: IncidentType,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub location: GeoPoint,
    pub assigned_to: Option<Uuid>,
    pub assets_involved: Vec<Uuid>,
    pub tags: Vec<String>,
    pub metadata: JsonMap,
    pub tenant_id: Uuid,
    pub reported_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// New incidents always start as `reported`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub kind: IncidentType,
    pub severity: IncidentSeverity,
    pub location: GeoPoint,
    pub assets_involved: Vec<Uuid>,
    pub tags: Vec<String>,
    pub metadata: JsonMap,
    pub tenant_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<IncidentType>,
    pub severity: Option<IncidentSeverity>,
    pub status: Option<IncidentStatus>,
    pub location: Option<GeoPoint>,
    pub assigned_to: Option<Option<Uuid>>,
    pub assets_involved: Option<Vec<Uuid>>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<JsonMap>,
}

// --- alerts ---

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub location: Option<GeoPoint>,
    pub acknowledged: bool,
    pub acknowledged_by: Option<Uuid>,
    pub acknowledged_at: Option<OffsetDateTime>,
    pub tenant_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub location: Option<GeoPoint>,
    pub tenant_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertPatch {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub location: Option<Option<GeoPoint>>,
    pub acknowledged: Option<bool>,
    pub acknowledged_by: Option<Option<Uuid>>,
}

// --- recommendations ---

/// One step of a recommendation, stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
    pub estimated_impact: String,
    pub required_resources: Vec<String>,
    pub approval_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: Uuid,
    pub incident_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    pub actions: Vec<RecommendedAction>,
    pub status: RecommendationStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub incident_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub confidence: f64,
    pub actions: Vec<RecommendedAction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationPatch {
    pub incident_id: Option<Option<Uuid>>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub confidence: Option<f64>,
    pub actions: Option<Vec<RecommendedAction>>,
    pub status: Option<RecommendationStatus>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tenant_settings_fill_missing_keys() {
        let s: TenantSettings =
            serde_json::from_value(json!({"timezone": "Europe/Paris"})).unwrap();
        assert_eq!(s.timezone, "Europe/Paris");
        assert_eq!(s.currency, "USD");
        assert_eq!(s.language, "en");
        assert!(s.notification_preferences.email);
        assert!(!s.notification_preferences.sms);
        assert!(s.notification_preferences.push);
    }

    #[test]
    fn action_priority_is_closed() {
        let bad = json!({
            "id": "a1", "title": "Reroute", "description": "Reroute traffic",
            "priority": "urgent", "estimated_impact": "high",
            "required_resources": [], "approval_required": false
        });
        assert!(serde_json::from_value::<RecommendedAction>(bad).is_err());
    }

    #[test]
    fn new_user_debug_hides_password() {
        let u = NewUser {
            email: "ops@city.example".to_owned(),
            name: "Ops".to_owned(),
            role: UserRole::Operator,
            tenant_id: Uuid::nil(),
            password: "hunter2hunter2".to_owned(),
        };
        let out = format!("{u:?}");
        assert!(!out.contains("hunter2"));
    }
}
