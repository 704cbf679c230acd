pub mod company;
pub mod job;
pub mod user;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

// ============================================================================
// Column Encoding Helpers
// ============================================================================

/// Timestamps are stored as fixed-width RFC 3339 text so they sort lexically.
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp: {raw}"))
}

pub(crate) fn decode_optional_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(decode_timestamp).transpose()
}

/// String lists are stored as JSON arrays to keep their order.
pub(crate) fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).context("Failed to encode string list")
}

pub(crate) fn decode_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).with_context(|| format!("Invalid stored string list: {raw}"))
}
