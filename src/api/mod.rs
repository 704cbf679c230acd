use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Store;
use crate::services::{AuthService, CompanyService, JobService, StatsService};
use crate::state::SharedState;

pub mod auth;
mod companies;
mod error;
mod jobs;
mod observability;
mod stats;
mod system;
mod types;
mod validation;

pub use auth::AuthUser;
pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub company_service: Arc<dyn CompanyService>,

    pub job_service: Arc<dyn JobService>,

    pub stats_service: Arc<dyn StatsService>,

    pub environment: String,

    pub cors_allowed_origins: Vec<String>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

#[must_use]
pub fn create_app_state(
    shared: &SharedState,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        store: shared.store.clone(),
        auth_service: shared.auth_service.clone(),
        company_service: shared.company_service.clone(),
        job_service: shared.job_service.clone(),
        stats_service: shared.stats_service.clone(),
        environment: shared.config.server.environment.clone(),
        cors_allowed_origins: shared.config.server.cors_allowed_origins.clone(),
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .fallback(system::api_not_found);

    let cors_layer = if state.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = state
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(system::health))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/companies", get(companies::list_companies))
        .route("/companies", post(companies::create_company))
        .route("/companies/{id}", delete(companies::delete_company))
        .route("/companies/{id}/priority", put(companies::update_priority))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/{id}", delete(jobs::delete_job))
        .route("/jobs/{id}/apply", post(jobs::apply_job))
        .route("/stats", get(stats::get_stats))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
