//! Wire types for the REST API.
//!
//! Requests carry enum values as plain strings; they are parsed into SDK types
//! when converted, so an unknown value is a field-level validation error rather
//! than a body rejection. Responses serialize timestamps as RFC 3339.

use std::str::FromStr;

use city_ops_sdk::{
    Alert, AlertFilter, AlertPatch, Asset, AssetFilter, AssetPatch, CityOpsError, GeoPoint,
    Incident, IncidentFilter, IncidentPatch, JsonMap, NewAlert, NewAsset, NewIncident,
    NewRecommendation, NewTenant, NewUser, PageInfo, Recommendation, RecommendationFilter,
    RecommendationPatch, RecommendedAction, Tenant, TenantFilter, TenantPatch, TenantSettings,
    User, UserFilter, UserPatch,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::service::{AssetTelemetry, LoginOutcome, PageParams};

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
/// Use together with `#[serde(default)]`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Query filters: a blank value (`?status=`) means "no filter".
fn blank_as_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn parse<T>(value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = CityOpsError>,
{
    value.parse().map_err(DomainError::from)
}

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, DomainError>
where
    T: FromStr<Err = CityOpsError>,
{
    value.map(parse).transpose()
}

// ==================== Pagination ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfoDto {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl From<PageInfo> for PageInfoDto {
    fn from(info: PageInfo) -> Self {
        Self {
            total: info.total,
            page: info.page,
            per_page: info.per_page,
            total_pages: info.total_pages,
        }
    }
}

/// Plain `{"message": ...}` body used for confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ==================== Tenants ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDto {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub settings: TenantSettings,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Tenant> for TenantDto {
    fn from(t: Tenant) -> Self {
        Self {
            id: t.id,
            name: t.name,
            domain: t.domain,
            settings: t.settings,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantListDto {
    pub tenants: Vec<TenantDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenantReq {
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub settings: TenantSettings,
}

impl From<CreateTenantReq> for NewTenant {
    fn from(req: CreateTenantReq) -> Self {
        Self {
            name: req.name,
            domain: req.domain,
            settings: req.settings,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTenantReq {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub settings: Option<TenantSettings>,
    pub is_active: Option<bool>,
}

impl From<UpdateTenantReq> for TenantPatch {
    fn from(req: UpdateTenantReq) -> Self {
        Self {
            name: req.name,
            domain: req.domain,
            settings: req.settings,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub is_active: Option<bool>,
}

impl TenantListQuery {
    #[must_use]
    pub fn split(self) -> (TenantFilter, PageParams) {
        (
            TenantFilter {
                is_active: self.is_active,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        )
    }
}

// ==================== Users ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub tenant_id: Uuid,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role.as_str().to_owned(),
            tenant_id: u.tenant_id,
            is_active: u.is_active,
            last_login: u.last_login,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
    pub name: String,
    pub role: String,
    pub tenant_id: Uuid,
    pub password: String,
}

impl std::fmt::Debug for CreateUserReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserReq")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("tenant_id", &self.tenant_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TryFrom<CreateUserReq> for NewUser {
    type Error = DomainError;

    fn try_from(req: CreateUserReq) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse(&req.role)?,
            email: req.email,
            name: req.name,
            tenant_id: req.tenant_id,
            password: req.password,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserReq {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateUserReq> for UserPatch {
    type Error = DomainError;

    fn try_from(req: UpdateUserReq) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_opt(req.role.as_deref())?,
            email: req.email,
            name: req.name,
            is_active: req.is_active,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tenant_id: Option<Uuid>,
}

impl UserListQuery {
    /// # Errors
    /// `Validation` when `role` is not a known role.
    pub fn split(self) -> Result<(UserFilter, PageParams), DomainError> {
        Ok((
            UserFilter {
                role: parse_opt(self.role.as_deref())?,
                tenant_id: self.tenant_id,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        ))
    }
}

// ==================== Assets ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub location: GeoPoint,
    pub properties: JsonMap,
    pub status: String,
    pub tenant_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Asset> for AssetDto {
    fn from(a: Asset) -> Self {
        Self {
            id: a.id,
            kind: a.kind,
            name: a.name,
            location: a.location,
            properties: a.properties,
            status: a.status.as_str().to_owned(),
            tenant_id: a.tenant_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetListDto {
    pub assets: Vec<AssetDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssetReq {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub properties: JsonMap,
    /// Defaults to `active`.
    pub status: Option<String>,
    pub tenant_id: Uuid,
}

impl TryFrom<CreateAssetReq> for NewAsset {
    type Error = DomainError;

    fn try_from(req: CreateAssetReq) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_opt(req.status.as_deref())?.unwrap_or_default(),
            kind: req.kind,
            name: req.name,
            location: req.location,
            properties: req.properties,
            tenant_id: req.tenant_id,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssetReq {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub location: Option<GeoPoint>,
    pub properties: Option<JsonMap>,
    pub status: Option<String>,
}

impl TryFrom<UpdateAssetReq> for AssetPatch {
    type Error = DomainError;

    fn try_from(req: UpdateAssetReq) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_opt(req.status.as_deref())?,
            kind: req.kind,
            name: req.name,
            location: req.location,
            properties: req.properties,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tenant_id: Option<Uuid>,
}

impl AssetListQuery {
    /// # Errors
    /// `Validation` when `status` is not a known asset status.
    pub fn split(self) -> Result<(AssetFilter, PageParams), DomainError> {
        Ok((
            AssetFilter {
                status: parse_opt(self.status.as_deref())?,
                kind: self.kind,
                tenant_id: self.tenant_id,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryDto {
    pub asset_id: Uuid,
    pub limit: u64,
    pub telemetry_data: Vec<serde_json::Value>,
    pub message: String,
}

impl From<AssetTelemetry> for TelemetryDto {
    fn from(t: AssetTelemetry) -> Self {
        Self {
            asset_id: t.asset_id,
            limit: t.limit,
            telemetry_data: t.readings,
            message: t.message,
        }
    }
}

// ==================== Incidents ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub status: String,
    pub location: GeoPoint,
    pub assigned_to: Option<Uuid>,
    pub assets_involved: Vec<Uuid>,
    pub tags: Vec<String>,
    pub metadata: JsonMap,
    pub tenant_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub reported_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub resolved_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Incident> for IncidentDto {
    fn from(i: Incident) -> Self {
        Self {
            id: i.id,
            title: i.title,
            description: i.description,
            kind: i.kind.as_str().to_owned(),
            severity: i.severity.as_str().to_owned(),
            status: i.status.as_str().to_owned(),
            location: i.location,
            assigned_to: i.assigned_to,
            assets_involved: i.assets_involved,
            tags: i.tags,
            metadata: i.metadata,
            tenant_id: i.tenant_id,
            reported_at: i.reported_at,
            resolved_at: i.resolved_at,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentListDto {
    pub incidents: Vec<IncidentDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncidentReq {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub assets_involved: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: JsonMap,
    pub tenant_id: Uuid,
}

impl TryFrom<CreateIncidentReq> for NewIncident {
    type Error = DomainError;

    fn try_from(req: CreateIncidentReq) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse(&req.kind)?,
            severity: parse(&req.severity)?,
            title: req.title,
            description: req.description,
            location: req.location,
            assets_involved: req.assets_involved,
            tags: req.tags,
            metadata: req.metadata,
            tenant_id: req.tenant_id,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIncidentReq {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub location: Option<GeoPoint>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to: Option<Option<Uuid>>,
    pub assets_involved: Option<Vec<Uuid>>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<JsonMap>,
}

impl TryFrom<UpdateIncidentReq> for IncidentPatch {
    type Error = DomainError;

    fn try_from(req: UpdateIncidentReq) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_opt(req.kind.as_deref())?,
            severity: parse_opt(req.severity.as_deref())?,
            status: parse_opt(req.status.as_deref())?,
            title: req.title,
            description: req.description,
            location: req.location,
            assigned_to: req.assigned_to,
            assets_involved: req.assets_involved,
            tags: req.tags,
            metadata: req.metadata,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub severity: Option<String>,
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tenant_id: Option<Uuid>,
}

impl IncidentListQuery {
    /// # Errors
    /// `Validation` when an enum filter holds an unknown value.
    pub fn split(self) -> Result<(IncidentFilter, PageParams), DomainError> {
        Ok((
            IncidentFilter {
                status: parse_opt(self.status.as_deref())?,
                severity: parse_opt(self.severity.as_deref())?,
                kind: parse_opt(self.kind.as_deref())?,
                tenant_id: self.tenant_id,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        ))
    }
}

// ==================== Alerts ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: String,
    pub location: Option<GeoPoint>,
    pub acknowledged: bool,
    pub acknowledged_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub acknowledged_at: Option<OffsetDateTime>,
    pub tenant_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Alert> for AlertDto {
    fn from(a: Alert) -> Self {
        Self {
            id: a.id,
            kind: a.kind,
            title: a.title,
            message: a.message,
            severity: a.severity.as_str().to_owned(),
            location: a.location,
            acknowledged: a.acknowledged,
            acknowledged_by: a.acknowledged_by,
            acknowledged_at: a.acknowledged_at,
            tenant_id: a.tenant_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertListDto {
    pub alerts: Vec<AlertDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlertReq {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub severity: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub tenant_id: Uuid,
}

impl TryFrom<CreateAlertReq> for NewAlert {
    type Error = DomainError;

    fn try_from(req: CreateAlertReq) -> Result<Self, Self::Error> {
        Ok(Self {
            severity: parse(&req.severity)?,
            kind: req.kind,
            title: req.title,
            message: req.message,
            location: req.location,
            tenant_id: req.tenant_id,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAlertReq {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub location: Option<Option<GeoPoint>>,
    pub acknowledged: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub acknowledged_by: Option<Option<Uuid>>,
}

impl TryFrom<UpdateAlertReq> for AlertPatch {
    type Error = DomainError;

    fn try_from(req: UpdateAlertReq) -> Result<Self, Self::Error> {
        Ok(Self {
            severity: parse_opt(req.severity.as_deref())?,
            kind: req.kind,
            title: req.title,
            message: req.message,
            location: req.location,
            acknowledged: req.acknowledged,
            acknowledged_by: req.acknowledged_by,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub severity: Option<String>,
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub acknowledged: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tenant_id: Option<Uuid>,
}

impl AlertListQuery {
    /// # Errors
    /// `Validation` when `severity` is not a known alert severity.
    pub fn split(self) -> Result<(AlertFilter, PageParams), DomainError> {
        Ok((
            AlertFilter {
                severity: parse_opt(self.severity.as_deref())?,
                kind: self.kind,
                acknowledged: self.acknowledged,
                tenant_id: self.tenant_id,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        ))
    }
}

// ==================== Recommendations ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDto {
    pub id: Uuid,
    pub incident_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub confidence: f64,
    pub actions: Vec<RecommendedAction>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Recommendation> for RecommendationDto {
    fn from(r: Recommendation) -> Self {
        Self {
            id: r.id,
            incident_id: r.incident_id,
            kind: r.kind,
            title: r.title,
            description: r.description,
            rationale: r.rationale,
            confidence: r.confidence,
            actions: r.actions,
            status: r.status.as_str().to_owned(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationListDto {
    pub recommendations: Vec<RecommendationDto>,
    #[serde(flatten)]
    pub page: PageInfoDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecommendationReq {
    #[serde(default)]
    pub incident_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub confidence: f64,
    pub actions: Vec<RecommendedAction>,
}

impl From<CreateRecommendationReq> for NewRecommendation {
    fn from(req: CreateRecommendationReq) -> Self {
        Self {
            incident_id: req.incident_id,
            kind: req.kind,
            title: req.title,
            description: req.description,
            rationale: req.rationale,
            confidence: req.confidence,
            actions: req.actions,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecommendationReq {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub incident_id: Option<Option<Uuid>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub confidence: Option<f64>,
    pub actions: Option<Vec<RecommendedAction>>,
    pub status: Option<String>,
}

impl TryFrom<UpdateRecommendationReq> for RecommendationPatch {
    type Error = DomainError;

    fn try_from(req: UpdateRecommendationReq) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_opt(req.status.as_deref())?,
            incident_id: req.incident_id,
            kind: req.kind,
            title: req.title,
            description: req.description,
            rationale: req.rationale,
            confidence: req.confidence,
            actions: req.actions,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(rename = "type")]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub incident_id: Option<Uuid>,
}

impl RecommendationListQuery {
    /// # Errors
    /// `Validation` when `status` is not a known recommendation status.
    pub fn split(self) -> Result<(RecommendationFilter, PageParams), DomainError> {
        Ok((
            RecommendationFilter {
                status: parse_opt(self.status.as_deref())?,
                kind: self.kind,
                incident_id: self.incident_id,
            },
            PageParams {
                skip: self.skip,
                limit: self.limit,
            },
        ))
    }
}

// ==================== Auth ====================

/// OAuth2 password-form fields. `username` carries the email.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl From<LoginOutcome> for TokenDto {
    fn from(o: LoginOutcome) -> Self {
        Self {
            access_token: o.access_token,
            token_type: o.token_type.to_owned(),
            expires_in: o.expires_in,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use city_ops_sdk::{AssetStatus, IncidentStatus};
    use serde_json::json;

    #[test]
    fn absent_and_null_assignee_differ() {
        let absent: UpdateIncidentReq = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(absent.assigned_to, None);

        let cleared: UpdateIncidentReq =
            serde_json::from_value(json!({"assigned_to": null})).unwrap();
        assert_eq!(cleared.assigned_to, Some(None));

        let id = Uuid::now_v7();
        let set: UpdateIncidentReq =
            serde_json::from_value(json!({"assigned_to": id.to_string()})).unwrap();
        assert_eq!(set.assigned_to, Some(Some(id)));
    }

    #[test]
    fn asset_status_defaults_to_active() {
        let req: CreateAssetReq = serde_json::from_value(json!({
            "type": "air_quality_sensor",
            "name": "AQ-7",
            "location": {"type": "Point", "coordinates": [13.4, 52.5]},
            "tenant_id": Uuid::now_v7(),
        }))
        .unwrap();
        let new = NewAsset::try_from(req).unwrap();
        assert_eq!(new.status, AssetStatus::Active);
        assert!(new.properties.is_empty());
    }

    #[test]
    fn bogus_status_is_field_validation() {
        let req = UpdateIncidentReq {
            status: Some("finished".to_owned()),
            ..UpdateIncidentReq::default()
        };
        let err = IncidentPatch::try_from(req).unwrap_err();
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "status"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn incident_filter_parses_all_enums() {
        let q = IncidentListQuery {
            status: Some("in_progress".to_owned()),
            severity: Some("high".to_owned()),
            kind: Some("flooding".to_owned()),
            ..IncidentListQuery::default()
        };
        let (filter, params) = q.split().unwrap();
        assert_eq!(filter.status, Some(IncidentStatus::InProgress));
        assert_eq!(params, PageParams::default());
    }

    #[test]
    fn blank_filters_mean_no_filter() {
        let q: IncidentListQuery = serde_json::from_value(json!({
            "status": "",
            "severity": "  ",
            "type": "",
            "tenant_id": ""
        }))
        .unwrap();
        let (filter, _) = q.split().unwrap();
        assert_eq!(filter, IncidentFilter::default());

        let q: AssetListQuery =
            serde_json::from_value(json!({"type": "", "status": " maintenance "})).unwrap();
        let (filter, _) = q.split().unwrap();
        assert_eq!(filter.kind, None);
        assert_eq!(filter.status, Some(AssetStatus::Maintenance));
    }

    #[test]
    fn list_body_is_flat() {
        let body = AssetListDto {
            assets: Vec::new(),
            page: PageInfoDto {
                total: 45,
                page: 2,
                per_page: 20,
                total_pages: 3,
            },
        };
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(
            v,
            json!({"assets": [], "total": 45, "page": 2, "per_page": 20, "total_pages": 3})
        );
    }

    #[test]
    fn login_form_debug_hides_password() {
        let form = LoginForm {
            username: "ops@city.example".to_owned(),
            password: "s3cret-pass".to_owned(),
        };
        assert!(!format!("{form:?}").contains("s3cret"));
    }
}
