use std::sync::Arc;

use crate::clients::identity::IdentityProvider;
use crate::clients::supabase::{SupabaseClient, SupabaseConfig};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CompanyService, JobService, SeaOrmAuthService, SeaOrmCompanyService,
    SeaOrmJobService, SeaOrmStatsService, StatsService,
};

/// Build a shared HTTP client for identity provider calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Jobwatch/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub company_service: Arc<dyn CompanyService>,

    pub job_service: Arc<dyn JobService>,

    pub stats_service: Arc<dyn StatsService>,
}

impl SharedState {
    /// Connects the store and the Supabase identity client described by `config`.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.identity.request_timeout_seconds)?;
        let identity = Arc::new(SupabaseClient::with_shared_client(
            http_client,
            SupabaseConfig {
                base_url: config.identity.base_url.clone(),
                api_key: config
                    .identity
                    .anon_key
                    .clone()
                    .unwrap_or_else(|| config.identity.service_role_key.clone()),
            },
        ));

        Ok(Self::with_parts(config, store, identity))
    }

    /// Wires the services over an existing store and identity provider.
    #[must_use]
    pub fn with_parts(config: Config, store: Store, identity: Arc<dyn IdentityProvider>) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone(), identity))
            as Arc<dyn AuthService>;

        let company_service = Arc::new(SeaOrmCompanyService::new(store.clone()))
            as Arc<dyn CompanyService>;

        let job_service = Arc::new(SeaOrmJobService::new(store.clone()))
            as Arc<dyn JobService>;

        let stats_service = Arc::new(SeaOrmStatsService::new(store.clone()))
            as Arc<dyn StatsService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            company_service,
            job_service,
            stats_service,
        }
    }
}
