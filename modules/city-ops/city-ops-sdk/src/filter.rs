//! Equality filters for list queries. Every `Some` field must match (logical AND).

use uuid::Uuid;

use crate::lifecycle::{
    AlertSeverity, AssetStatus, IncidentSeverity, IncidentStatus, IncidentType,
    RecommendationStatus, UserRole,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantFilter {
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    pub kind: Option<String>,
    pub status: Option<AssetStatus>,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub severity: Option<IncidentSeverity>,
    pub kind: Option<IncidentType>,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Option<AlertSeverity>,
    pub kind: Option<String>,
    pub acknowledged: Option<bool>,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationFilter {
    pub status: Option<RecommendationStatus>,
    pub kind: Option<String>,
    pub incident_id: Option<Uuid>,
}
