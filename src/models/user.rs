use chrono::{DateTime, Utc};
use serde::Serialize;

/// Local mirror of an identity-provider account. Credentials never reach this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
