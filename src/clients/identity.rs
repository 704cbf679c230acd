//! Identity provider capability.
//!
//! Account creation, password checks and token issuance live entirely in an
//! external service. The rest of the crate only sees this trait, so handlers and
//! tests can swap in any implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider answered and refused the request (bad credentials, expired
    /// token, duplicate email, ...). Carries the provider's own message.
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or answered with something unusable.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// The account behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Provider response to signup/login, passed through to the client untouched.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: serde_json::Value,
    pub session: Option<serde_json::Value>,
}

impl AuthSession {
    /// Extracts the account identity from the provider's user object, if present.
    #[must_use]
    pub fn account(&self) -> Option<VerifiedUser> {
        let id = self.user.get("id")?.as_str()?.to_string();
        let email = self.user.get("email")?.as_str()?.to_string();
        let full_name = self
            .user
            .pointer("/user_metadata/full_name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        Some(VerifiedUser {
            id,
            email,
            full_name,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUp<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: Option<&'a str>,
}

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses the signup.
    async fn sign_up(&self, request: SignUp<'_>) -> Result<AuthSession, IdentityError>;

    /// Exchanges email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;

    /// Revokes the session behind `token`.
    async fn sign_out(&self, token: &str) -> Result<(), IdentityError>;

    /// Validates a bearer token and returns its account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] for missing, invalid or expired tokens.
    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_reads_metadata_name() {
        let session = AuthSession {
            user: json!({
                "id": "abc",
                "email": "ada@example.com",
                "user_metadata": { "full_name": "Ada Lovelace" }
            }),
            session: None,
        };

        let account = session.account().unwrap();
        assert_eq!(account.id, "abc");
        assert_eq!(account.full_name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_account_missing_for_null_user() {
        let session = AuthSession {
            user: serde_json::Value::Null,
            session: None,
        };
        assert!(session.account().is_none());
    }
}
