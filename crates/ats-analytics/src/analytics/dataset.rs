//! JSON-file-backed [`AnalyticsRepository`] used by the CLI and the bundled server.
//!
//! Records are validated once at load time so the aggregation engine only ever sees
//! well-formed feedback scores and benefit lists.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{
    AnalyticsSnapshot, Application, Candidate, Department, Interview, InterviewFeedback, Job,
    Offer, Profile, TenantContext, TenantId,
};
use super::repository::{AnalyticsRepository, RepositoryError};

/// On-disk layout: one entry per tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub tenants: Vec<TenantDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDataset {
    pub tenant_id: TenantId,
    #[serde(flatten)]
    pub snapshot: AnalyticsSnapshot,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {record} for tenant {tenant}: {reason}")]
    Invalid {
        tenant: TenantId,
        record: String,
        reason: String,
    },
}

/// In-memory, tenant-partitioned collections loaded from a [`DatasetFile`].
#[derive(Debug, Clone, Default)]
pub struct DatasetRepository {
    tenants: HashMap<TenantId, AnalyticsSnapshot>,
}

impl DatasetRepository {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_reader(reader)?;
        Self::from_dataset(file)
    }

    pub fn from_dataset(file: DatasetFile) -> Result<Self, DatasetError> {
        let mut tenants = HashMap::with_capacity(file.tenants.len());
        for dataset in file.tenants {
            validate(&dataset)?;
            if tenants.contains_key(&dataset.tenant_id) {
                return Err(DatasetError::Invalid {
                    record: "tenant".to_string(),
                    reason: "tenant appears more than once".to_string(),
                    tenant: dataset.tenant_id,
                });
            }
            tenants.insert(dataset.tenant_id, dataset.snapshot);
        }
        Ok(Self { tenants })
    }

    pub fn tenant_ids(&self) -> Vec<&TenantId> {
        let mut ids: Vec<&TenantId> = self.tenants.keys().collect();
        ids.sort();
        ids
    }

    fn snapshot(&self, tenant: &TenantContext) -> Option<&AnalyticsSnapshot> {
        self.tenants.get(&tenant.tenant_id)
    }

    fn rows<T: Clone>(
        &self,
        tenant: &TenantContext,
        pick: impl Fn(&AnalyticsSnapshot) -> &Vec<T>,
    ) -> Vec<T> {
        self.snapshot(tenant)
            .map(|snapshot| pick(snapshot).clone())
            .unwrap_or_default()
    }
}

fn validate(dataset: &TenantDataset) -> Result<(), DatasetError> {
    let invalid = |record: String, reason: String| DatasetError::Invalid {
        tenant: dataset.tenant_id.clone(),
        record,
        reason,
    };

    for interview in &dataset.snapshot.interviews {
        if let Some(feedback) = &interview.feedback {
            validate_feedback(feedback)
                .map_err(|reason| invalid(format!("interview {}", interview.id.0), reason))?;
        }
    }

    for offer in &dataset.snapshot.offers {
        if offer.benefits.iter().any(|benefit| benefit.trim().is_empty()) {
            return Err(invalid(
                format!("offer {}", offer.id.0),
                "benefit entries must not be blank".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_feedback(feedback: &InterviewFeedback) -> Result<(), String> {
    let range = InterviewFeedback::MIN_SCORE..=InterviewFeedback::MAX_SCORE;
    if !range.contains(&feedback.rating) {
        return Err(format!(
            "rating {} is outside {}..={}",
            feedback.rating,
            InterviewFeedback::MIN_SCORE,
            InterviewFeedback::MAX_SCORE
        ));
    }
    for (criterion, score) in &feedback.criteria_scores {
        if criterion.trim().is_empty() {
            return Err("criteria names must not be blank".to_string());
        }
        if !range.contains(score) {
            return Err(format!(
                "criterion '{criterion}' score {score} is outside {}..={}",
                InterviewFeedback::MIN_SCORE,
                InterviewFeedback::MAX_SCORE
            ));
        }
    }
    Ok(())
}

impl AnalyticsRepository for DatasetRepository {
    async fn jobs(&self, tenant: &TenantContext) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.jobs))
    }

    async fn candidates(&self, tenant: &TenantContext) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.candidates))
    }

    async fn applications(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.applications))
    }

    async fn interviews(&self, tenant: &TenantContext) -> Result<Vec<Interview>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.interviews))
    }

    async fn offers(&self, tenant: &TenantContext) -> Result<Vec<Offer>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.offers))
    }

    async fn departments(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.departments))
    }

    async fn profiles(&self, tenant: &TenantContext) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.rows(tenant, |snapshot| &snapshot.profiles))
    }
}
