use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::{decode_list, decode_optional_timestamp, decode_timestamp, encode_list, encode_timestamp};
use crate::domain::{CompanyId, Priority};
use crate::entities::{companies, prelude::*};
use crate::models::{Company, NewCompany};

/// Repository for tracked companies. Every query is scoped by owner.
pub struct CompanyRepository {
    conn: DatabaseConnection,
}

impl CompanyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: companies::Model) -> Result<Company> {
        Ok(Company {
            id: CompanyId::new(model.id),
            keywords: decode_list(&model.keywords)?,
            priority: model.priority.parse()?,
            status: model.status.parse()?,
            last_checked_at: decode_optional_timestamp(model.last_checked_at.as_deref())?,
            created_at: decode_timestamp(&model.created_at)?,
            name: model.name,
            url: model.url,
            career_page_url: model.career_page_url,
            check_interval_minutes: model.check_interval_minutes,
            user_id: model.user_id,
        })
    }

    pub async fn create(&self, company: &NewCompany, now: DateTime<Utc>) -> Result<Company> {
        let active_model = companies::ActiveModel {
            name: Set(company.name.clone()),
            url: Set(company.url.clone()),
            career_page_url: Set(company.career_page_url.clone()),
            keywords: Set(encode_list(&company.keywords)?),
            priority: Set(company.priority.as_str().to_string()),
            status: Set(company.status.as_str().to_string()),
            check_interval_minutes: Set(company.check_interval_minutes),
            last_checked_at: Set(None),
            user_id: Set(company.user_id.clone()),
            created_at: Set(encode_timestamp(now)),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert company")?;

        info!(company_id = model.id, user_id = %model.user_id, "Added company {}", model.name);
        Self::map_model(model)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Company>> {
        let rows = Companies::find()
            .filter(companies::Column::UserId.eq(user_id))
            .order_by_asc(companies::Column::CreatedAt)
            .order_by_asc(companies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list companies")?;

        rows.into_iter().map(Self::map_model).collect()
    }

    /// Returns `false` when no row owned by `user_id` had that id.
    pub async fn update_priority(
        &self,
        id: CompanyId,
        user_id: &str,
        priority: Priority,
    ) -> Result<bool> {
        let result = Companies::update_many()
            .col_expr(
                companies::Column::Priority,
                sea_orm::sea_query::Expr::value(priority.as_str()),
            )
            .filter(companies::Column::Id.eq(id.value()))
            .filter(companies::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to update company priority")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: CompanyId, user_id: &str) -> Result<bool> {
        let result = Companies::delete_many()
            .filter(companies::Column::Id.eq(id.value()))
            .filter(companies::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete company")?;

        Ok(result.rows_affected > 0)
    }
}
