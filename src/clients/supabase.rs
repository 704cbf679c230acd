//! Supabase Auth (GoTrue) REST client.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::identity::{AuthSession, IdentityError, IdentityProvider, SignUp, VerifiedUser};

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub base_url: String,

    /// Sent as the `apikey` header on every call
    pub api_key: String,
}

#[derive(Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

#[derive(Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
    user_metadata: Option<UserMetadata>,
}

#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            path
        )
    }

    /// Turns a non-success response into a rejection carrying the provider message.
    async fn reject(response: Response) -> IdentityError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            warn!(%status, "Identity provider error: {body}");
            return IdentityError::Unavailable(format!("status={status}"));
        }

        IdentityError::Rejected(error_message(&body).unwrap_or_else(|| status.to_string()))
    }

    async fn session_from(response: Response) -> Result<AuthSession, IdentityError> {
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("Invalid auth response: {e}")))?;

        Ok(split_session(body))
    }
}

/// GoTrue returns either a bare user (email confirmation pending) or a session
/// object with the user nested inside it.
fn split_session(body: Value) -> AuthSession {
    if body.get("access_token").is_some() {
        AuthSession {
            user: body.get("user").cloned().unwrap_or(Value::Null),
            session: Some(body),
        }
    } else {
        AuthSession {
            user: body,
            session: None,
        }
    }
}

/// Picks the human-readable message out of a GoTrue error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn transport(e: reqwest::Error) -> IdentityError {
    IdentityError::Unavailable(e.to_string())
}

#[async_trait::async_trait]
impl IdentityProvider for SupabaseClient {
    async fn sign_up(&self, request: SignUp<'_>) -> Result<AuthSession, IdentityError> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": { "full_name": request.full_name },
        });

        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        Self::session_from(response).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.config.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        Self::session_from(response).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::reject(response).await)
        }
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(%status, "Token rejected by identity provider");
            return Err(IdentityError::Rejected("Invalid token".to_string()));
        }
        if !status.is_success() {
            return Err(Self::reject(response).await);
        }

        let user: GoTrueUser = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("Invalid user response: {e}")))?;

        Ok(VerifiedUser {
            id: user.id,
            email: user.email.unwrap_or_default(),
            full_name: user.user_metadata.and_then(|m| m.full_name),
        })
    }
}
