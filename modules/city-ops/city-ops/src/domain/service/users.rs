use std::sync::Arc;

use city_ops_sdk::{NewUser, Page, User, UserFilter, UserPatch};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{PageParams, ensure_tenant_exists, page_request};
use crate::config::CityOpsConfig;
use crate::domain::auth::password;
use crate::domain::error::DomainError;
use crate::domain::repos::{TenantsRepository, UsersRepository};
use crate::domain::validation;

pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    tenants: Arc<dyn TenantsRepository>,
    config: CityOpsConfig,
}

impl UsersService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        tenants: Arc<dyn TenantsRepository>,
        config: CityOpsConfig,
    ) -> Self {
        Self {
            repo,
            tenants,
            config,
        }
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), DomainError> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict(
                "email",
                format!("User with email '{email}' already exists"),
            ));
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` when no user has this id.
    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        tracing::debug!(%id, "Getting user by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// # Errors
    /// `InvalidParameter` on bad pagination.
    pub async fn list(
        &self,
        filter: &UserFilter,
        params: PageParams,
    ) -> Result<Page<User>, DomainError> {
        let req = page_request(&self.config, params)?;
        let page = self.repo.list_page(filter, req).await?;
        tracing::debug!(count = page.items.len(), total = page.info.total, "Listed users");
        Ok(page)
    }

    /// Hashes the password off the async runtime before storing.
    ///
    /// # Errors
    /// `Validation` on bad fields or unknown tenant, `Conflict` on duplicate email.
    pub async fn create(&self, new: NewUser) -> Result<User, DomainError> {
        tracing::info!(tenant_id = %new.tenant_id, "Creating user");
        validation::new_user(&new)?;
        let email = validation::normalize_email(&new.email)?;
        ensure_tenant_exists(self.tenants.as_ref(), new.tenant_id).await?;
        self.ensure_email_free(&email).await?;

        let plain = new.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))??;

        let user = User {
            id: Uuid::now_v7(),
            email,
            name: new.name,
            role: new.role,
            tenant_id: new.tenant_id,
            is_active: true,
            last_login: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        let user = self.repo.create(user, password_hash).await?;
        tracing::info!(id = %user.id, "Created user");
        Ok(user)
    }

    /// # Errors
    /// `NotFound`, `Validation` or `Conflict`.
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        tracing::info!(%id, "Updating user");
        validation::user_patch(&patch)?;
        let email = patch
            .email
            .as_deref()
            .map(validation::normalize_email)
            .transpose()?;
        let mut current = self.get(id).await?;

        if let Some(email) = email {
            if email != current.email {
                self.ensure_email_free(&email).await?;
            }
            current.email = email;
        }
        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(role) = patch.role {
            current.role = role;
        }
        if let Some(is_active) = patch.is_active {
            current.is_active = is_active;
        }
        current.updated_at = Some(OffsetDateTime::now_utc());

        self.repo.update(current).await
    }

    /// # Errors
    /// `NotFound` when no user has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        tracing::info!(%id, "Deleting user");
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("User", id))
        }
    }
}
