//! Persistence ports. Implementations live in `infra::storage`.

mod alerts_repo;
mod assets_repo;
mod health_repo;
mod incidents_repo;
mod recommendations_repo;
mod tenants_repo;
mod users_repo;

pub use alerts_repo::AlertsRepository;
pub use assets_repo::AssetsRepository;
pub use health_repo::HealthProbe;
pub use incidents_repo::IncidentsRepository;
pub use recommendations_repo::RecommendationsRepository;
pub use tenants_repo::TenantsRepository;
pub use users_repo::{UserCredentials, UsersRepository};
