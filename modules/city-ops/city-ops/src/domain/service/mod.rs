//! Domain services, one per resource.
//!
//! Services validate input, enforce cross-entity rules (tenant ownership,
//! uniqueness, lifecycle) and stamp timestamps. Persistence goes through the
//! repository ports in `domain::repos`.

use std::sync::Arc;

use city_ops_sdk::PageRequest;

use crate::config::CityOpsConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{HealthProbe, TenantsRepository};

mod alerts;
mod assets;
mod auth;
mod incidents;
mod recommendations;
mod tenants;
mod users;

pub use alerts::AlertsService;
pub use assets::{AssetTelemetry, AssetsService};
pub use auth::{AuthService, LoginOutcome};
pub use incidents::IncidentsService;
pub use recommendations::RecommendationsService;
pub use tenants::TenantsService;
pub use users::UsersService;

/// Raw offset/limit as received from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    #[must_use]
    pub const fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}

/// Applies configured defaults, then bounds-checks.
pub(crate) fn page_request(
    config: &CityOpsConfig,
    params: PageParams,
) -> Result<PageRequest, DomainError> {
    let default_limit = i64::try_from(config.default_limit).unwrap_or(i64::MAX);
    let req = PageRequest::new(
        params.skip.unwrap_or(0),
        params.limit.unwrap_or(default_limit),
        config.max_limit,
    )?;
    Ok(req)
}

/// Tenant-scoped records may only reference an existing tenant.
pub(crate) async fn ensure_tenant_exists(
    tenants: &dyn TenantsRepository,
    tenant_id: uuid::Uuid,
) -> Result<(), DomainError> {
    if tenants.exists(tenant_id).await? {
        Ok(())
    } else {
        Err(DomainError::validation(
            "tenant_id",
            format!("tenant {tenant_id} does not exist"),
        ))
    }
}

/// All services of the module, wired over shared repositories.
#[derive(Clone)]
pub struct AppServices {
    pub tenants: Arc<TenantsService>,
    pub users: Arc<UsersService>,
    pub assets: Arc<AssetsService>,
    pub incidents: Arc<IncidentsService>,
    pub alerts: Arc<AlertsService>,
    pub recommendations: Arc<RecommendationsService>,
    pub auth: Arc<AuthService>,
    pub health: Arc<dyn HealthProbe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_params() {
        let cfg = CityOpsConfig::default();
        let req = page_request(&cfg, PageParams::default()).unwrap();
        assert_eq!(req.skip(), 0);
        assert_eq!(req.limit(), 20);
    }

    #[test]
    fn configured_max_limit_applies() {
        let cfg = CityOpsConfig {
            max_limit: 10,
            ..CityOpsConfig::default()
        };
        let err = page_request(&cfg, PageParams::new(0, 11)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { .. }));
    }

    #[test]
    fn negative_skip_is_invalid_parameter() {
        let err = page_request(&CityOpsConfig::default(), PageParams::new(-1, 20)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { .. }));
    }
}
