use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::error::DomainError;
use crate::domain::repos::HealthProbe;
use crate::infra::storage::db::db_err;

#[derive(Clone)]
pub struct SeaHealthProbe {
    db: DatabaseConnection,
}

impl SeaHealthProbe {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthProbe for SeaHealthProbe {
    async fn ping(&self) -> Result<(), DomainError> {
        self.db.ping().await.map_err(db_err)
    }
}
