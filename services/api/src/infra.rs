use ats_analytics::analytics::DatasetRepository;
use ats_analytics::error::AppError;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the dataset backing the built-in repository, or an empty one when none is configured.
pub(crate) fn load_repository(path: Option<&Path>) -> Result<DatasetRepository, AppError> {
    match path {
        Some(path) => {
            let repository = DatasetRepository::from_path(path)?;
            info!(
                dataset = %path.display(),
                tenants = repository.tenant_ids().len(),
                "analytics dataset loaded"
            );
            Ok(repository)
        }
        None => {
            warn!("no analytics dataset configured; every tenant dashboard will be empty");
            Ok(DatasetRepository::default())
        }
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
