//! HS256 access tokens.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

use city_ops_sdk::User;

use super::AuthError;

/// Claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User id.
    pub sub: String,
    pub tenant_id: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessTokenClaims {
    /// # Errors
    /// `TokenInvalid` when `sub` is not a UUID.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::TokenInvalid(format!("sub: {e}")))
    }
}

/// Signs and verifies access tokens with a shared secret.
pub struct TokenIssuer {
    secret: SecretString,
    ttl: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// # Errors
    /// `Crypto` if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, user: &User, now: OffsetDateTime) -> Result<String, AuthError> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let iat = now.unix_timestamp();
        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            tenant_id: user.tenant_id.to_string(),
            role: user.role.as_str().to_owned(),
            iat,
            exp: iat.saturating_add(ttl),
        };
        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
    }

    /// Checks signature and expiry.
    ///
    /// # Errors
    /// `TokenExpired` or `TokenInvalid`.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);
        jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid(e.to_string()),
            })
    }
}
