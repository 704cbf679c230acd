//! `SeaORM` implementation of the `AuthService` trait.

use crate::clients::identity::{AuthSession, IdentityError, IdentityProvider, SignUp, VerifiedUser};
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, Registration};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SeaOrmAuthService {
    store: Store,
    identity: Arc<dyn IdentityProvider>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    async fn record_user(&self, user: &VerifiedUser) -> Result<(), AuthError> {
        let created = self
            .store
            .ensure_user(&user.id, &user.email, user.full_name.as_deref())
            .await?;
        if created {
            info!(user_id = %user.id, "Recorded new user");
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn sign_up(&self, registration: Registration) -> Result<AuthSession, AuthError> {
        let session = self
            .identity
            .sign_up(SignUp {
                email: &registration.email,
                password: &registration.password,
                full_name: Some(&registration.full_name),
            })
            .await?;

        // The account exists upstream now, so a local write failure is not fatal;
        // the row is retried on the first authenticated request.
        if let Some(account) = session.account()
            && let Err(e) = self.record_user(&account).await
        {
            warn!(user_id = %account.id, "Failed to record user after signup: {e}");
        }

        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        Ok(self.identity.sign_in(email, password).await?)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        Ok(self.identity.sign_out(token).await?)
    }

    async fn authenticate(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let user = match self.identity.verify_token(token).await {
            Ok(user) => user,
            Err(IdentityError::Rejected(_)) => {
                return Err(AuthError::Unauthorized("Invalid token".to_string()));
            }
            Err(IdentityError::Unavailable(msg)) => {
                warn!("Token verification failed: {msg}");
                return Err(AuthError::Unauthorized(
                    "Authentication failed".to_string(),
                ));
            }
        };

        self.record_user(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticIdentity;

    #[async_trait]
    impl IdentityProvider for StaticIdentity {
        async fn sign_up(&self, request: SignUp<'_>) -> Result<AuthSession, IdentityError> {
            if request.email == "taken@example.com" {
                return Err(IdentityError::Rejected("User already registered".into()));
            }
            Ok(AuthSession {
                user: json!({
                    "id": "new-user",
                    "email": request.email,
                    "user_metadata": { "full_name": request.full_name }
                }),
                session: None,
            })
        }

        async fn sign_in(&self, _: &str, _: &str) -> Result<AuthSession, IdentityError> {
            Err(IdentityError::Rejected("Invalid login credentials".into()))
        }

        async fn sign_out(&self, _: &str) -> Result<(), IdentityError> {
            Ok(())
        }

        async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError> {
            match token {
                "good" => Ok(VerifiedUser {
                    id: "u1".into(),
                    email: "u1@example.com".into(),
                    full_name: None,
                }),
                "down" => Err(IdentityError::Unavailable("timeout".into())),
                _ => Err(IdentityError::Rejected("bad jwt".into())),
            }
        }
    }

    async fn service() -> (Store, SeaOrmAuthService) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let service = SeaOrmAuthService::new(store.clone(), Arc::new(StaticIdentity));
        (store, service)
    }

    #[tokio::test]
    async fn test_authenticate_records_user() {
        let (store, service) = service().await;
        let user = service.authenticate("good").await.unwrap();
        assert_eq!(user.id, "u1");
        assert!(store.get_user("u1").await.unwrap().is_some());

        // Second sight is a no-op.
        service.authenticate("good").await.unwrap();
    }

    #[tokio::test]
    async fn test_authenticate_maps_every_failure_to_unauthorized() {
        let (_, service) = service().await;
        assert!(matches!(
            service.authenticate("bogus").await,
            Err(AuthError::Unauthorized(msg)) if msg == "Invalid token"
        ));
        assert!(matches!(
            service.authenticate("down").await,
            Err(AuthError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_up_records_user_with_name() {
        let (store, service) = service().await;
        service
            .sign_up(Registration {
                email: "ada@example.com".into(),
                password: "secret123".into(),
                full_name: "Ada Lovelace".into(),
            })
            .await
            .unwrap();

        let user = store.get_user("new-user").await.unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_provider_rejections_pass_message_through() {
        let (_, service) = service().await;
        let err = service
            .sign_up(Registration {
                email: "taken@example.com".into(),
                password: "secret123".into(),
                full_name: "Dup".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref m) if m == "User already registered"));

        let err = service.sign_in("a@b.c", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }
}
