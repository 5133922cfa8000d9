//! City Ops Module
//!
//! Multi-tenant city operations backend: tenants, users, assets, incidents,
//! alerts and recommendations with filtered skip/limit listings, plus
//! password login with bearer tokens.
//!
//! ## Public API
//!
//! Models, vocabularies and pagination types come from `city-ops-sdk` and are
//! re-exported here. [`CityOpsModule`] wires storage, services and the REST
//! router over a SeaORM connection.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use city_ops_sdk::{
    Alert, Asset, CityOpsError, GeoPoint, Incident, IncidentStatus, Page, PageInfo, PageRequest,
    Recommendation, Tenant, User,
};

pub mod config;
pub mod module;
pub use config::{AuthConfig, CityOpsConfig, DEFAULT_SECRET_KEY};
pub use module::{CityOpsModule, connect};

// Internal layers. Public for integration tests; use the SDK types instead.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
