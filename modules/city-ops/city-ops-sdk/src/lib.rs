//! City Ops SDK
//!
//! Public contract of the `city-ops` module:
//! - entity models (`Tenant`, `User`, `Asset`, `Incident`, `Alert`, `Recommendation`)
//!   with their create payloads and partial patches
//! - closed vocabularies in [`lifecycle`] and the incident transition table
//! - [`GeoPoint`] with GeoJSON serialization
//! - skip/limit pagination ([`PageRequest`], [`PageInfo`], [`Page`]) and list filters
//! - [`CityOpsError`] for contract violations

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod filter;
pub mod geo;
pub mod lifecycle;
pub mod models;
pub mod page;

pub use error::CityOpsError;
pub use filter::{
    AlertFilter, AssetFilter, IncidentFilter, RecommendationFilter, TenantFilter, UserFilter,
};
pub use geo::GeoPoint;
pub use lifecycle::{
    ActionPriority, AlertSeverity, AssetStatus, IncidentSeverity, IncidentStatus, IncidentType,
    RecommendationStatus, UserRole,
};
pub use models::{
    Alert, AlertPatch, Asset, AssetPatch, Incident, IncidentPatch, NewAlert, NewAsset,
    NewIncident, NewRecommendation, NewTenant, NewUser, NotificationPreferences, Recommendation,
    RecommendationPatch, RecommendedAction, Tenant, TenantPatch, TenantSettings, User, UserPatch,
    JsonMap,
};
pub use page::{Page, PageInfo, PageRequest};
