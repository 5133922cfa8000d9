//! Composition root: wires SeaORM repositories into services and exposes
//! the REST router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes;
use crate::config::{AuthConfig, CityOpsConfig};
use crate::domain::auth::token::TokenIssuer;
use crate::domain::repos::{
    AlertsRepository, AssetsRepository, HealthProbe, IncidentsRepository,
    RecommendationsRepository, TenantsRepository, UsersRepository,
};
use crate::domain::service::{
    AlertsService, AppServices, AssetsService, AuthService, IncidentsService,
    RecommendationsService, TenantsService, UsersService,
};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaAlertsRepository, SeaAssetsRepository, SeaHealthProbe, SeaIncidentsRepository,
    SeaRecommendationsRepository, SeaTenantsRepository, SeaUsersRepository,
};

/// Lifetime used in place of "never" for in-memory pools; the pool adds it to `Instant::now()`.
const IN_MEMORY_CONN_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Opens a connection pool.
///
/// # Errors
/// Fails when the database cannot be reached.
pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let opts = pool_options(url, max_connections);
    tracing::debug!(max_connections = ?opts.get_max_connections(), "Connecting to database");
    Database::connect(opts).await
}

/// In-memory SQLite lives per connection, so such URLs get a single connection
/// that is never recycled; reaping it would silently drop the schema and data.
fn pool_options(url: &str, max_connections: u32) -> ConnectOptions {
    let in_memory = url.contains(":memory:");
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.max_connections(if in_memory { 1 } else { max_connections.max(1) })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if in_memory {
        opts.idle_timeout(IN_MEMORY_CONN_LIFETIME)
            .max_lifetime(IN_MEMORY_CONN_LIFETIME);
    }
    opts
}

/// The city-ops module over one database connection.
pub struct CityOpsModule {
    services: AppServices,
}

impl CityOpsModule {
    /// Applies all pending schema migrations.
    ///
    /// # Errors
    /// Fails when a migration cannot be applied.
    pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
        tracing::info!("Running city_ops database migrations");
        Migrator::up(db, None).await?;
        tracing::info!("city_ops database migrations completed");
        Ok(())
    }

    #[must_use]
    pub fn new(db: &DatabaseConnection, config: &CityOpsConfig, auth: AuthConfig) -> Self {
        let tenants_repo: Arc<dyn TenantsRepository> =
            Arc::new(SeaTenantsRepository::new(db.clone()));
        let users_repo: Arc<dyn UsersRepository> = Arc::new(SeaUsersRepository::new(db.clone()));
        let assets_repo: Arc<dyn AssetsRepository> =
            Arc::new(SeaAssetsRepository::new(db.clone()));
        let incidents_repo: Arc<dyn IncidentsRepository> =
            Arc::new(SeaIncidentsRepository::new(db.clone()));
        let alerts_repo: Arc<dyn AlertsRepository> =
            Arc::new(SeaAlertsRepository::new(db.clone()));
        let recommendations_repo: Arc<dyn RecommendationsRepository> =
            Arc::new(SeaRecommendationsRepository::new(db.clone()));
        let health: Arc<dyn HealthProbe> = Arc::new(SeaHealthProbe::new(db.clone()));

        let issuer = TokenIssuer::new(auth.secret_key, auth.access_token_ttl);

        let services = AppServices {
            tenants: Arc::new(TenantsService::new(
                Arc::clone(&tenants_repo),
                config.clone(),
            )),
            users: Arc::new(UsersService::new(
                Arc::clone(&users_repo),
                Arc::clone(&tenants_repo),
                config.clone(),
            )),
            assets: Arc::new(AssetsService::new(
                assets_repo,
                Arc::clone(&tenants_repo),
                config.clone(),
            )),
            incidents: Arc::new(IncidentsService::new(
                Arc::clone(&incidents_repo),
                Arc::clone(&tenants_repo),
                config.clone(),
            )),
            alerts: Arc::new(AlertsService::new(
                alerts_repo,
                Arc::clone(&tenants_repo),
                config.clone(),
            )),
            recommendations: Arc::new(RecommendationsService::new(
                recommendations_repo,
                incidents_repo,
                config.clone(),
            )),
            auth: Arc::new(AuthService::new(users_repo, issuer)),
            health,
        };

        tracing::info!(
            enforce_transitions = config.enforce_transitions,
            max_limit = config.max_limit,
            "city_ops module initialized"
        );
        Self { services }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// REST router for `/`, `/api`, `/health` and `/api/v1/*`.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(&self.services)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn in_memory_pool_keeps_its_only_connection() {
        let opts = pool_options("sqlite::memory:", 10);
        assert_eq!(opts.get_max_connections(), Some(1));
        assert_eq!(opts.get_min_connections(), Some(1));
        assert_eq!(opts.get_idle_timeout(), Some(IN_MEMORY_CONN_LIFETIME));
        assert_eq!(opts.get_max_lifetime(), Some(IN_MEMORY_CONN_LIFETIME));
    }

    #[test]
    fn file_pool_uses_driver_recycling() {
        let opts = pool_options("sqlite://civitas.db?mode=rwc", 0);
        assert_eq!(opts.get_max_connections(), Some(1));
        assert_eq!(opts.get_idle_timeout(), None);
        assert_eq!(opts.get_max_lifetime(), None);

        let opts = pool_options("postgres://localhost/civitas", 8);
        assert_eq!(opts.get_max_connections(), Some(8));
    }
}
