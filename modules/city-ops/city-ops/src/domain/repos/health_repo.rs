use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Liveness check against the backing store.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
