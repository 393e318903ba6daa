//! Hiring analytics: funnel, conversion, time-to-hire, and team activity dashboards computed
//! from tenant-scoped snapshots of jobs, applications, and interviews.

pub mod dataset;
pub mod domain;
pub mod engine;
pub mod fetch;
pub mod range;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use dataset::{DatasetError, DatasetFile, DatasetRepository, TenantDataset};
pub use domain::{
    AnalyticsSnapshot, Application, ApplicationId, ApplicationStatus, Candidate, CandidateId,
    Department, DepartmentId, Interview, InterviewFeedback, InterviewId, InterviewStatus, Job,
    JobId, JobStatus, Locale, Offer, OfferId, OfferStatus, Profile, ProfileId, TenantContext,
    TenantId,
};
pub use engine::aggregate;
pub use fetch::{fetch_snapshot, FetchError};
pub use range::{DateRangeBounds, DateRangeToken};
pub use repository::{AnalyticsRepository, Collection, RepositoryError};
pub use router::{analytics_router, TENANT_HEADER};
pub use service::{AnalyticsError, AnalyticsService};
pub use views::DashboardStats;
