use crate::domain::{CompanyId, JobId, Priority};
use crate::models::{Company, Job, NewCompany, NewJob, User};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every pooled connection to `:memory:` would see its own empty database.
        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn company_repo(&self) -> repositories::company::CompanyRepository {
        repositories::company::CompanyRepository::new(self.conn.clone())
    }

    fn job_repo(&self) -> repositories::job::JobRepository {
        repositories::job::JobRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn ensure_user(
        &self,
        id: &str,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<bool> {
        self.user_repo().ensure(id, email, full_name, Utc::now()).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    // ========================================================================
    // Companies
    // ========================================================================

    pub async fn create_company(&self, company: &NewCompany) -> Result<Company> {
        self.company_repo().create(company, Utc::now()).await
    }

    pub async fn list_companies(&self, user_id: &str) -> Result<Vec<Company>> {
        self.company_repo().list_for_user(user_id).await
    }

    pub async fn update_company_priority(
        &self,
        id: CompanyId,
        user_id: &str,
        priority: Priority,
    ) -> Result<bool> {
        self.company_repo()
            .update_priority(id, user_id, priority)
            .await
    }

    pub async fn delete_company(&self, id: CompanyId, user_id: &str) -> Result<bool> {
        self.company_repo().delete(id, user_id).await
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    pub async fn create_job(&self, job: &NewJob) -> Result<Job> {
        self.job_repo().create(job, Utc::now()).await
    }

    pub async fn list_jobs(&self, user_id: &str) -> Result<Vec<Job>> {
        self.job_repo().list_for_user(user_id).await
    }

    pub async fn delete_job(&self, id: JobId, user_id: &str) -> Result<bool> {
        self.job_repo().delete(id, user_id).await
    }

    pub async fn delete_jobs_for_company(&self, company_id: CompanyId, user_id: &str) -> Result<u64> {
        self.job_repo().delete_for_company(company_id, user_id).await
    }

    pub async fn mark_job_applied(
        &self,
        id: JobId,
        user_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        self.job_repo().mark_applied(id, user_id, at).await
    }
}
