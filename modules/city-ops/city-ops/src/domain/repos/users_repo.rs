use async_trait::async_trait;
use city_ops_sdk::{Page, PageRequest, User, UserFilter};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// A user together with its stored password hash.
#[derive(Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn list_page(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, DomainError>;

    async fn create(&self, user: User, password_hash: String) -> Result<User, DomainError>;

    /// Updates profile fields; the password hash is left untouched.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;

    async fn touch_last_login(&self, id: Uuid, at: OffsetDateTime) -> Result<(), DomainError>;
}
