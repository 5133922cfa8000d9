//! SeaORM persistence for the city-ops module.
//!
//! - `entity/` - table definitions
//! - `mapper` - row <-> SDK model conversions
//! - `migrations/` - schema migrations
//! - `*_sea_repo` - repository port implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod alerts_sea_repo;
mod assets_sea_repo;
mod health_sea_repo;
mod incidents_sea_repo;
mod recommendations_sea_repo;
mod tenants_sea_repo;
mod users_sea_repo;

pub use alerts_sea_repo::SeaAlertsRepository;
pub use assets_sea_repo::SeaAssetsRepository;
pub use health_sea_repo::SeaHealthProbe;
pub use incidents_sea_repo::SeaIncidentsRepository;
pub use recommendations_sea_repo::SeaRecommendationsRepository;
pub use tenants_sea_repo::SeaTenantsRepository;
pub use users_sea_repo::SeaUsersRepository;
