use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{CompanyId, CompanyStatus, Priority};

/// A company the user has asked to watch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub url: String,
    pub career_page_url: String,
    pub keywords: Vec<String>,
    pub priority: Priority,
    pub status: CompanyStatus,
    pub check_interval_minutes: i32,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a company; ids and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub url: String,
    pub career_page_url: String,
    pub keywords: Vec<String>,
    pub priority: Priority,
    pub status: CompanyStatus,
    pub check_interval_minutes: i32,
    pub user_id: String,
}
