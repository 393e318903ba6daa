use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::domain::{AnalyticsSnapshot, TenantContext};
use super::repository::{AnalyticsRepository, Collection, RepositoryError};

/// Failure of the bulk fetch stage. Any one query failing fails the whole stage.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{collection} query failed: {source}")]
    Query {
        collection: Collection,
        #[source]
        source: RepositoryError,
    },
    #[error("bulk fetch exceeded {}ms", .0.as_millis())]
    TimedOut(Duration),
}

async fn tagged<T, F>(collection: Collection, query: F) -> Result<Vec<T>, FetchError>
where
    F: Future<Output = Result<Vec<T>, RepositoryError>>,
{
    query
        .await
        .map_err(|source| FetchError::Query { collection, source })
}

/// Issues every collection query concurrently and waits for all of them, bounded by `timeout`.
///
/// The first failing query short-circuits the join, so a snapshot is either complete or absent.
pub async fn fetch_snapshot<R>(
    repository: &R,
    tenant: &TenantContext,
    timeout: Duration,
) -> Result<AnalyticsSnapshot, FetchError>
where
    R: AnalyticsRepository,
{
    debug!(tenant = %tenant.tenant_id, "fetching analytics snapshot");

    let fan_out = async {
        tokio::try_join!(
            tagged(Collection::Jobs, repository.jobs(tenant)),
            tagged(Collection::Candidates, repository.candidates(tenant)),
            tagged(Collection::Applications, repository.applications(tenant)),
            tagged(Collection::Interviews, repository.interviews(tenant)),
            tagged(Collection::Offers, repository.offers(tenant)),
            tagged(Collection::Departments, repository.departments(tenant)),
            tagged(Collection::Profiles, repository.profiles(tenant)),
        )
    };

    let joined = match tokio::time::timeout(timeout, fan_out).await {
        Ok(joined) => joined,
        Err(_) => {
            warn!(
                tenant = %tenant.tenant_id,
                timeout_ms = timeout.as_millis() as u64,
                "analytics fetch timed out"
            );
            return Err(FetchError::TimedOut(timeout));
        }
    };

    let (jobs, candidates, applications, interviews, offers, departments, profiles) =
        joined.inspect_err(|err| {
            warn!(tenant = %tenant.tenant_id, error = %err, "analytics fetch failed");
        })?;

    debug!(
        tenant = %tenant.tenant_id,
        jobs = jobs.len(),
        applications = applications.len(),
        interviews = interviews.len(),
        "analytics snapshot fetched"
    );

    Ok(AnalyticsSnapshot {
        jobs,
        candidates,
        applications,
        interviews,
        offers,
        departments,
        profiles,
    })
}
