use std::sync::Arc;

use city_ops_sdk::User;
use time::OffsetDateTime;

use crate::domain::auth::AuthError;
use crate::domain::auth::password;
use crate::domain::auth::token::TokenIssuer;
use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;
use crate::domain::validation;

/// Result of a successful password login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub user: User,
}

/// Password login and bearer-token lookups. Tokens are stateless.
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    issuer: TokenIssuer,
}

impl AuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersRepository>, issuer: TokenIssuer) -> Self {
        Self { users, issuer }
    }

    /// Verifies the password and stamps `last_login`.
    ///
    /// # Errors
    /// `Unauthorized` for unknown email, inactive user or wrong password.
    pub async fn login(&self, email: &str, plain: &str) -> Result<LoginOutcome, DomainError> {
        let Ok(email) = validation::normalize_email(email) else {
            tracing::warn!("Login rejected: malformed email");
            return Err(AuthError::InvalidCredentials.into());
        };
        let Some(creds) = self.users.find_by_email(&email).await? else {
            tracing::warn!(%email, "Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !creds.user.is_active {
            tracing::warn!(user_id = %creds.user.id, "Login rejected: inactive user");
            return Err(AuthError::InvalidCredentials.into());
        }

        let hash = creds.password_hash;
        let plain = plain.to_owned();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
                .await
                .map_err(|e| DomainError::internal(format!("verify task failed: {e}")))??;
        if !matches {
            tracing::warn!(user_id = %creds.user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let now = OffsetDateTime::now_utc();
        self.users.touch_last_login(creds.user.id, now).await?;
        let mut user = creds.user;
        user.last_login = Some(now);

        let access_token = self.issuer.issue(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            access_token,
            token_type: "bearer",
            expires_in: self.issuer.ttl().as_secs(),
            user,
        })
    }

    /// Resolves the user behind a bearer token.
    ///
    /// # Errors
    /// `Unauthorized` for invalid or expired tokens and unknown or inactive users.
    pub async fn me(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.issuer.verify(token).inspect_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
        })?;
        let user_id = claims.user_id()?;
        match self.users.get(user_id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => {
                tracing::warn!(%user_id, "Bearer token for unknown or inactive user");
                Err(AuthError::TokenInvalid("unknown user".to_owned()).into())
            }
        }
    }
}
