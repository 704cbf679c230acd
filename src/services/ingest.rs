//! Company ingestion helpers.
//!
//! Everything needed to turn an "add company" request into a company row and a
//! handful of placeholder postings: name and interval normalization, keyword
//! parsing, template synthesis with keyword matching, and best-effort posting
//! persistence. Real scraping does not happen here; the two templates below stand
//! in for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::constants::{ingest, minutes};
use crate::db::Store;
use crate::domain::JobStatus;
use crate::models::{Company, Job, NewJob};

/// Keywords as accepted on the wire: either `"react, rust"` or `["react", "rust"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeywordsInput {
    Text(String),
    List(Vec<String>),
}

impl Default for KeywordsInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// Derives a display name from the first label of the URL's host.
///
/// `https://www.acme.io/jobs` becomes `acme`. Anything that does not parse as an
/// absolute URL with a host falls back to [`ingest::UNKNOWN_COMPANY_NAME`].
#[must_use]
pub fn extract_company_name(raw_url: &str) -> String {
    let Ok(parsed) = Url::parse(raw_url) else {
        return ingest::UNKNOWN_COMPANY_NAME.to_string();
    };

    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    match host.split('.').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ingest::UNKNOWN_COMPANY_NAME.to_string(),
    }
}

/// Splits comma-separated text into trimmed, non-empty keywords.
///
/// Order and duplicates are preserved. A list is taken as-is.
#[must_use]
pub fn normalize_keywords(input: KeywordsInput) -> Vec<String> {
    match input {
        KeywordsInput::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|kw| !kw.is_empty())
            .map(str::to_string)
            .collect(),
        KeywordsInput::List(list) => list,
    }
}

#[must_use]
pub fn career_page_url(raw_url: &str, override_url: Option<&str>) -> String {
    match override_url.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => format!("{raw_url}{}", ingest::CAREERS_SUFFIX),
    }
}

/// Converts phrases like `"2 hours"` or `"1 Week"` to minutes.
///
/// Unknown units, unparseable or non-positive counts and overflowing results all
/// yield [`ingest::DEFAULT_CHECK_INTERVAL_MINUTES`].
#[must_use]
pub fn convert_interval_to_minutes(phrase: &str) -> i32 {
    let mut parts = phrase.split_whitespace();
    let count = parts.next().and_then(|n| n.parse::<i32>().ok());
    let unit = parts.next().map(str::to_lowercase);

    let factor = match unit.as_deref() {
        Some("hour" | "hours") => minutes::PER_HOUR,
        Some("day" | "days") => minutes::PER_DAY,
        Some("week" | "weeks") => minutes::PER_WEEK,
        _ => return ingest::DEFAULT_CHECK_INTERVAL_MINUTES,
    };

    count
        .filter(|n| *n > 0)
        .and_then(|n| n.checked_mul(factor))
        .unwrap_or(ingest::DEFAULT_CHECK_INTERVAL_MINUTES)
}

/// A fixed placeholder posting generated for every new company.
#[derive(Debug)]
pub struct PostingTemplate {
    pub role: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub salary: &'static str,
    pub requirements: &'static [&'static str],
    /// Lowercase tags a caller keyword must equal (case-insensitively) to match
    pub tags: &'static [&'static str],
}

pub const POSTING_TEMPLATES: [PostingTemplate; 2] = [
    PostingTemplate {
        role: "Frontend Developer",
        slug: "frontend-developer",
        description: "We are looking for a talented Frontend Developer to join our team. You will be responsible for building user-facing features and ensuring great user experience.",
        salary: "$80,000 - $120,000",
        requirements: &["React", "TypeScript", "CSS"],
        tags: &["frontend", "react", "javascript"],
    },
    PostingTemplate {
        role: "Software Engineer",
        slug: "software-engineer",
        description: "Join our engineering team to build scalable software solutions. Work with modern technologies and contribute to exciting projects.",
        salary: "$90,000 - $140,000",
        requirements: &["JavaScript", "Node.js", "Database"],
        tags: &["developer", "engineer", "javascript"],
    },
];

/// Caller keywords whose lowercase form is one of `tags`, in caller order.
#[must_use]
pub fn matched_keywords(keywords: &[String], tags: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| tags.contains(&kw.to_lowercase().as_str()))
        .cloned()
        .collect()
}

impl PostingTemplate {
    #[must_use]
    pub fn draft(&self, company: &Company, keywords: &[String], now: DateTime<Utc>) -> NewJob {
        NewJob {
            title: format!("{} at {}", self.role, company.name),
            url: format!("{}/jobs/{}", company.url, self.slug),
            description: Some(self.description.to_string()),
            salary: Some(self.salary.to_string()),
            requirements: Some(self.requirements.iter().map(|r| (*r).to_string()).collect()),
            matched_keywords: matched_keywords(keywords, self.tags),
            date_found: now,
            status: JobStatus::New,
            priority: company.priority,
            company_id: company.id,
            user_id: company.user_id.clone(),
        }
    }
}

/// Builds the candidate postings for `company` and applies the keyword filter.
///
/// A posting survives when at least one keyword matched it. With no keywords at
/// all, every posting survives.
#[must_use]
pub fn synthesize_postings(
    company: &Company,
    keywords: &[String],
    now: DateTime<Utc>,
) -> Vec<NewJob> {
    POSTING_TEMPLATES
        .iter()
        .map(|template| template.draft(company, keywords, now))
        .filter(|draft| keywords.is_empty() || !draft.matched_keywords.is_empty())
        .collect()
}

// ============================================================================
// Best-effort persistence
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum PostingOutcome {
    Persisted { job: Job },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingResult {
    pub posting: NewJob,
    #[serde(flatten)]
    pub outcome: PostingOutcome,
}

impl PostingResult {
    #[must_use]
    pub const fn job(&self) -> Option<&Job> {
        match &self.outcome {
            PostingOutcome::Persisted { job } => Some(job),
            PostingOutcome::Failed { .. } => None,
        }
    }
}

/// Where synthesized postings are written.
#[async_trait::async_trait]
pub trait PostingSink: Send + Sync {
    async fn persist(&self, posting: &NewJob) -> anyhow::Result<Job>;
}

#[async_trait::async_trait]
impl PostingSink for Store {
    async fn persist(&self, posting: &NewJob) -> anyhow::Result<Job> {
        self.create_job(posting).await
    }
}

/// Writes each posting independently. A failed insert is logged and recorded;
/// it never undoes the postings written before it.
pub async fn persist_postings(sink: &dyn PostingSink, postings: Vec<NewJob>) -> Vec<PostingResult> {
    let mut results = Vec::with_capacity(postings.len());

    for posting in postings {
        let outcome = match sink.persist(&posting).await {
            Ok(job) => PostingOutcome::Persisted { job },
            Err(e) => {
                warn!(
                    company_id = %posting.company_id,
                    title = %posting.title,
                    "Error inserting job: {e:#}"
                );
                PostingOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        results.push(PostingResult { posting, outcome });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyId, CompanyStatus, JobId, Priority};
    use chrono::TimeZone;

    fn kw(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn company(name: &str) -> Company {
        Company {
            id: CompanyId::new(9),
            name: name.to_string(),
            url: format!("https://{name}.io"),
            career_page_url: format!("https://{name}.io/careers"),
            keywords: vec![],
            priority: Priority::High,
            status: CompanyStatus::Active,
            check_interval_minutes: 1440,
            last_checked_at: None,
            user_id: "owner".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_extract_company_name() {
        assert_eq!(extract_company_name("https://www.acme.io"), "acme");
        assert_eq!(extract_company_name("https://www.acme.io/about?x=1"), "acme");
        assert_eq!(extract_company_name("http://jobs.globex.com"), "jobs");
        assert_eq!(extract_company_name("https://WWW.Initech.COM"), "initech");
        assert_eq!(extract_company_name("https://localhost:8080"), "localhost");
    }

    #[test]
    fn test_extract_company_name_falls_back() {
        assert_eq!(extract_company_name("acme.io"), "Unknown Company");
        assert_eq!(extract_company_name("not a url"), "Unknown Company");
        assert_eq!(extract_company_name(""), "Unknown Company");
        assert_eq!(extract_company_name("mailto:jobs@acme.io"), "Unknown Company");
    }

    #[test]
    fn test_normalize_keywords_from_text() {
        let input = KeywordsInput::Text(" react ,, Rust,react , ".to_string());
        assert_eq!(normalize_keywords(input), kw(&["react", "Rust", "react"]));
        assert!(normalize_keywords(KeywordsInput::Text("  , ".to_string())).is_empty());
    }

    #[test]
    fn test_normalize_keywords_list_is_used_as_is() {
        let input = KeywordsInput::List(kw(&[" spaced ", "x"]));
        assert_eq!(normalize_keywords(input), kw(&[" spaced ", "x"]));
    }

    #[test]
    fn test_keywords_input_deserializes_both_shapes() {
        let text: KeywordsInput = serde_json::from_str("\"a, b\"").unwrap();
        assert_eq!(text, KeywordsInput::Text("a, b".to_string()));
        let list: KeywordsInput = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(list, KeywordsInput::List(kw(&["a", "b"])));
    }

    #[test]
    fn test_career_page_url() {
        assert_eq!(career_page_url("https://acme.io", None), "https://acme.io/careers");
        assert_eq!(career_page_url("https://acme.io", Some("  ")), "https://acme.io/careers");
        assert_eq!(
            career_page_url("https://acme.io", Some("https://jobs.acme.io")),
            "https://jobs.acme.io"
        );
    }

    #[test]
    fn test_convert_interval_to_minutes() {
        assert_eq!(convert_interval_to_minutes("2 hours"), 120);
        assert_eq!(convert_interval_to_minutes("1 hour"), 60);
        assert_eq!(convert_interval_to_minutes("3 days"), 4320);
        assert_eq!(convert_interval_to_minutes("1 week"), 10080);
        assert_eq!(convert_interval_to_minutes("2 WEEKS"), 20160);
        assert_eq!(convert_interval_to_minutes("  6   Hours "), 360);
    }

    #[test]
    fn test_convert_interval_defaults() {
        assert_eq!(convert_interval_to_minutes("garbage"), 1440);
        assert_eq!(convert_interval_to_minutes(""), 1440);
        assert_eq!(convert_interval_to_minutes("5 fortnights"), 1440);
        assert_eq!(convert_interval_to_minutes("many days"), 1440);
        assert_eq!(convert_interval_to_minutes("0 days"), 1440);
        assert_eq!(convert_interval_to_minutes("-1 hours"), 1440);
        assert_eq!(convert_interval_to_minutes("999999999 weeks"), 1440);
    }

    #[test]
    fn test_matched_keywords_is_case_insensitive_and_keeps_caller_case() {
        let tags = POSTING_TEMPLATES[0].tags;
        assert_eq!(matched_keywords(&kw(&["React", "design"]), tags), kw(&["React"]));
        assert_eq!(
            matched_keywords(&kw(&["javascript", "JavaScript"]), tags),
            kw(&["javascript", "JavaScript"])
        );
        assert!(matched_keywords(&kw(&["reactive"]), tags).is_empty());
    }

    #[test]
    fn test_synthesis_filters_by_keyword_overlap() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let postings = synthesize_postings(&company("acme"), &kw(&["react", "design"]), now);

        assert_eq!(postings.len(), 1);
        let frontend = &postings[0];
        assert_eq!(frontend.title, "Frontend Developer at acme");
        assert_eq!(frontend.url, "https://acme.io/jobs/frontend-developer");
        assert_eq!(frontend.matched_keywords, kw(&["react"]));
        assert_eq!(frontend.salary.as_deref(), Some("$80,000 - $120,000"));
        assert_eq!(frontend.priority, Priority::High);
        assert_eq!(frontend.status, JobStatus::New);
        assert_eq!(frontend.date_found, now);
        assert_eq!(frontend.company_id, CompanyId::new(9));
        assert_eq!(frontend.user_id, "owner");
    }

    #[test]
    fn test_software_engineer_template_has_no_match_for_react() {
        let drafted = POSTING_TEMPLATES[1].draft(&company("acme"), &kw(&["react", "design"]), Utc::now());
        assert!(drafted.matched_keywords.is_empty());
        assert_eq!(
            drafted.requirements,
            Some(kw(&["JavaScript", "Node.js", "Database"]))
        );
    }

    #[test]
    fn test_empty_keywords_accept_every_template() {
        let postings = synthesize_postings(&company("acme"), &[], Utc::now());
        assert_eq!(postings.len(), 2);
        assert!(postings.iter().all(|p| p.matched_keywords.is_empty()));
        assert_eq!(postings[1].title, "Software Engineer at acme");
    }

    #[test]
    fn test_shared_keyword_keeps_both_templates() {
        let postings = synthesize_postings(&company("acme"), &kw(&["JavaScript"]), Utc::now());
        assert_eq!(postings.len(), 2);
    }

    #[test]
    fn test_unmatched_keywords_drop_everything() {
        let postings = synthesize_postings(&company("acme"), &kw(&["cobol"]), Utc::now());
        assert!(postings.is_empty());
    }

    struct FlakySink;

    #[async_trait::async_trait]
    impl PostingSink for FlakySink {
        async fn persist(&self, posting: &NewJob) -> anyhow::Result<Job> {
            if posting.title.starts_with("Software") {
                anyhow::bail!("disk full");
            }
            Ok(Job {
                id: JobId::new(1),
                title: posting.title.clone(),
                url: posting.url.clone(),
                description: posting.description.clone(),
                salary: posting.salary.clone(),
                requirements: posting.requirements.clone(),
                matched_keywords: posting.matched_keywords.clone(),
                date_found: posting.date_found,
                applied_at: None,
                status: posting.status,
                priority: posting.priority,
                company_id: posting.company_id,
                user_id: posting.user_id.clone(),
                created_at: posting.date_found,
            })
        }
    }

    #[tokio::test]
    async fn test_persist_postings_records_partial_failure() {
        let postings = synthesize_postings(&company("acme"), &[], Utc::now());
        let results = persist_postings(&FlakySink, postings).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].job().map(|j| j.title.as_str()), Some("Frontend Developer at acme"));
        assert_eq!(
            results[1].outcome,
            PostingOutcome::Failed {
                reason: "disk full".to_string()
            }
        );
        assert!(results[1].job().is_none());
    }
}
