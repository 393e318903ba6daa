use std::fmt;
use std::future::Future;

use super::domain::{
    Application, Candidate, Department, Interview, Job, Offer, Profile, TenantContext,
};

/// Read-only, tenant-scoped access to the collections a dashboard needs.
///
/// Implementations return an empty collection when a tenant has no rows; an `Err` is reserved
/// for transport, authorization, or query failures.
pub trait AnalyticsRepository: Send + Sync {
    fn jobs(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Job>, RepositoryError>> + Send;

    fn candidates(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Candidate>, RepositoryError>> + Send;

    fn applications(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Application>, RepositoryError>> + Send;

    fn interviews(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Interview>, RepositoryError>> + Send;

    fn offers(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Offer>, RepositoryError>> + Send;

    fn departments(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Department>, RepositoryError>> + Send;

    fn profiles(
        &self,
        tenant: &TenantContext,
    ) -> impl Future<Output = Result<Vec<Profile>, RepositoryError>> + Send;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("tenant is not authorized for this data")]
    Unauthorized,
    #[error("query failed: {0}")]
    Query(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Collections issued by the bulk fetch stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Jobs,
    Candidates,
    Applications,
    Interviews,
    Offers,
    Departments,
    Profiles,
}

impl Collection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Candidates => "candidates",
            Self::Applications => "applications",
            Self::Interviews => "interviews",
            Self::Offers => "offers",
            Self::Departments => "departments",
            Self::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
