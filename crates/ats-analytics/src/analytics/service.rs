use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::TenantContext;
use super::engine;
use super::fetch::{fetch_snapshot, FetchError};
use super::range::DateRangeToken;
use super::repository::AnalyticsRepository;
use super::views::DashboardStats;
use crate::config::AnalyticsConfig;

/// Composes the range resolver, the bulk fetch stage, and the aggregation engine.
pub struct AnalyticsService<R> {
    repository: Arc<R>,
    fetch_timeout: Duration,
}

impl<R> AnalyticsService<R>
where
    R: AnalyticsRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &AnalyticsConfig) -> Self {
        Self {
            repository,
            fetch_timeout: config.fetch_timeout,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Computes one tenant dashboard as of `now`.
    ///
    /// Either every collection is fetched within the timeout and the full dashboard is built,
    /// or the call fails with [`AnalyticsError::AggregationFailed`].
    pub async fn dashboard(
        &self,
        tenant: &TenantContext,
        range: DateRangeToken,
        now: DateTime<Utc>,
    ) -> Result<DashboardStats, AnalyticsError> {
        let bounds = range.resolve(now, tenant.locale);

        let snapshot = fetch_snapshot(self.repository.as_ref(), tenant, self.fetch_timeout)
            .await
            .map_err(|source| AnalyticsError::AggregationFailed { source })?;

        let stats = engine::aggregate(&snapshot, &bounds, tenant.locale);

        if stats.time_to_hire.excluded_outliers > 0 {
            debug!(
                tenant = %tenant.tenant_id,
                excluded = stats.time_to_hire.excluded_outliers,
                "time-to-hire outliers excluded"
            );
        }
        info!(
            tenant = %tenant.tenant_id,
            range = range.as_str(),
            locale = tenant.locale.code(),
            applications = stats.overview.total_applications,
            "dashboard computed"
        );

        Ok(stats)
    }
}

/// Error raised by the analytics service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("dashboard aggregation failed: {source}")]
    AggregationFailed {
        #[source]
        source: FetchError,
    },
}
