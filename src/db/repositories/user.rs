use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};

use super::{decode_timestamp, encode_timestamp};
use crate::entities::{prelude::*, users};
use crate::models::User;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: users::Model) -> Result<User> {
        Ok(User {
            created_at: decode_timestamp(&model.created_at)?,
            id: model.id,
            email: model.email,
            full_name: model.full_name,
        })
    }

    /// Insert the user row unless one with the same id already exists.
    ///
    /// An empty email is stored as `NULL`. If another account still holds the
    /// email (the address was re-registered upstream under a new id), that row
    /// gives it up and keeps its companies and jobs.
    ///
    /// Returns `true` when a row was created.
    pub async fn ensure(
        &self,
        id: &str,
        email: &str,
        full_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let email = Some(email.trim()).filter(|e| !e.is_empty());
        let txn = self.conn.begin().await?;

        if let Some(email) = email {
            Users::update_many()
                .col_expr(users::Column::Email, Expr::value(Option::<String>::None))
                .filter(users::Column::Email.eq(email))
                .filter(users::Column::Id.ne(id))
                .exec(&txn)
                .await
                .context("Failed to release email from previous account")?;
        }

        let active_model = users::ActiveModel {
            id: Set(id.to_string()),
            email: Set(email.map(str::to_string)),
            full_name: Set(full_name.map(str::to_string)),
            created_at: Set(encode_timestamp(now)),
        };

        let inserted = Users::insert(active_model)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("Failed to upsert user")?;

        txn.commit().await?;

        Ok(inserted > 0)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = Users::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        user.map(Self::map_model).transpose()
    }
}
