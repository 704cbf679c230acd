pub mod ingest;
pub use ingest::{KeywordsInput, PostingOutcome, PostingResult, PostingSink};

pub mod company_service;
pub mod company_service_impl;
pub use company_service::{CompanyError, CompanyService, IngestReport, IngestRequest};
pub use company_service_impl::SeaOrmCompanyService;

pub mod job_service;
pub mod job_service_impl;
pub use job_service::{JobError, JobListing, JobService};
pub use job_service_impl::SeaOrmJobService;

pub mod stats_service;
pub mod stats_service_impl;
pub use stats_service::{Stats, StatsError, StatsService};
pub use stats_service_impl::SeaOrmStatsService;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration};
pub use auth_service_impl::SeaOrmAuthService;
