//! Credential hashing and access tokens.

pub mod password;
pub mod token;

use thiserror::Error;

use super::error::DomainError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("crypto error: {0}")]
    Crypto(String),
}

impl From<AuthError> for DomainError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                DomainError::unauthorized("Incorrect email or password")
            }
            AuthError::TokenExpired => DomainError::unauthorized("Token has expired"),
            AuthError::TokenInvalid(_) => {
                DomainError::unauthorized("Could not validate credentials")
            }
            AuthError::Crypto(msg) => DomainError::internal(msg),
        }
    }
}
