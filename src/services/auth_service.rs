//! Domain service for authentication.
//!
//! Credentials never touch this process's database. Signup, login, logout and
//! token checks are forwarded to the identity provider; locally we only keep a
//! `users` row per account so owned rows have something to reference.

use crate::clients::identity::{AuthSession, IdentityError, VerifiedUser};
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider refused the request; its message is passed through.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<IdentityError> for AuthError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected(msg) => Self::Rejected(msg),
            IdentityError::Unavailable(msg) => Self::Unavailable(msg),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Validated signup fields.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the provider and records the local user row.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] if the provider refuses the signup.
    async fn sign_up(&self, registration: Registration) -> Result<AuthSession, AuthError>;

    /// Exchanges credentials for a provider session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for bad credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Resolves a bearer token to its account, creating the local user row on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] whenever the token cannot be verified.
    async fn authenticate(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}
