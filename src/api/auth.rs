use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::validation::validate_signup;
use super::{ApiError, AppState, LoginRequest, SignupRequest, SuccessResponse};
use crate::clients::identity::AuthSession;
use crate::services::AuthError;

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected(msg) => Self::validation(msg),
            AuthError::Unauthorized(msg) => Self::unauthorized(msg),
            AuthError::Unavailable(msg) | AuthError::Database(msg) => Self::internal(msg),
        }
    }
}

/// The caller behind a verified bearer token, available to protected handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a valid `Authorization: Bearer <token>` header
/// before any handler runs.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("No authorization token provided"))?;

    let user = state.auth_service.authenticate(&token).await?;
    tracing::Span::current().record("user_id", user.id.as_str());

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        token,
    });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let registration = validate_signup(payload)?;

    let session = state.auth_service.sign_up(registration).await?;
    Ok(Json(session))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let session = state
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;
    Ok(Json(session))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.auth_service.sign_out(&user.token).await?;
    tracing::info!(user_id = %user.id, "User logged out");
    Ok(Json(SuccessResponse::ok()))
}
