use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{decode_list, decode_optional_timestamp, decode_timestamp, encode_list, encode_timestamp};
use crate::domain::{CompanyId, JobId, JobStatus};
use crate::entities::{jobs, prelude::*};
use crate::models::{Job, NewJob};

/// Repository for job postings. Every query is scoped by owner.
pub struct JobRepository {
    conn: DatabaseConnection,
}

impl JobRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: jobs::Model) -> Result<Job> {
        Ok(Job {
            id: JobId::new(model.id),
            requirements: model.requirements.as_deref().map(decode_list).transpose()?,
            matched_keywords: decode_list(&model.matched_keywords)?,
            date_found: decode_timestamp(&model.date_found)?,
            applied_at: decode_optional_timestamp(model.applied_at.as_deref())?,
            status: model.status.parse()?,
            priority: model.priority.parse()?,
            company_id: CompanyId::new(model.company_id),
            created_at: decode_timestamp(&model.created_at)?,
            title: model.title,
            url: model.url,
            description: model.description,
            salary: model.salary,
            user_id: model.user_id,
        })
    }

    pub async fn create(&self, job: &NewJob, now: DateTime<Utc>) -> Result<Job> {
        let active_model = jobs::ActiveModel {
            title: Set(job.title.clone()),
            url: Set(job.url.clone()),
            description: Set(job.description.clone()),
            salary: Set(job.salary.clone()),
            requirements: Set(job.requirements.as_deref().map(encode_list).transpose()?),
            matched_keywords: Set(encode_list(&job.matched_keywords)?),
            date_found: Set(encode_timestamp(job.date_found)),
            applied_at: Set(None),
            status: Set(job.status.as_str().to_string()),
            priority: Set(job.priority.as_str().to_string()),
            company_id: Set(job.company_id.value()),
            user_id: Set(job.user_id.clone()),
            created_at: Set(encode_timestamp(now)),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to insert job '{}'", job.title))?;

        Self::map_model(model)
    }

    /// Newest first; ties on `created_at` fall back to the id.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Job>> {
        let rows = Jobs::find()
            .filter(jobs::Column::UserId.eq(user_id))
            .order_by_desc(jobs::Column::CreatedAt)
            .order_by_desc(jobs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list jobs")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn delete(&self, id: JobId, user_id: &str) -> Result<bool> {
        let result = Jobs::delete_many()
            .filter(jobs::Column::Id.eq(id.value()))
            .filter(jobs::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete job")?;

        Ok(result.rows_affected > 0)
    }

    /// Returns the number of jobs removed.
    pub async fn delete_for_company(&self, company_id: CompanyId, user_id: &str) -> Result<u64> {
        let result = Jobs::delete_many()
            .filter(jobs::Column::CompanyId.eq(company_id.value()))
            .filter(jobs::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete jobs for company")?;

        Ok(result.rows_affected)
    }

    /// Unconditionally moves the job to `Applied`, refreshing `applied_at`.
    pub async fn mark_applied(&self, id: JobId, user_id: &str, at: DateTime<Utc>) -> Result<bool> {
        let result = Jobs::update_many()
            .col_expr(
                jobs::Column::Status,
                sea_orm::sea_query::Expr::value(JobStatus::Applied.as_str()),
            )
            .col_expr(
                jobs::Column::AppliedAt,
                sea_orm::sea_query::Expr::value(encode_timestamp(at)),
            )
            .filter(jobs::Column::Id.eq(id.value()))
            .filter(jobs::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to mark job as applied")?;

        Ok(result.rows_affected > 0)
    }
}
