use std::time::Duration as StdDuration;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::analytics::domain::{
    AnalyticsSnapshot, Application, ApplicationId, ApplicationStatus, Candidate, CandidateId,
    Department, DepartmentId, Interview, InterviewFeedback, InterviewId, InterviewStatus, Job,
    JobId, JobStatus, Locale, Offer, OfferId, OfferStatus, Profile, ProfileId, TenantContext,
    TenantId,
};
use crate::analytics::range::{DateRangeBounds, DateRangeToken};
use crate::analytics::repository::{AnalyticsRepository, Collection, RepositoryError};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid reference time")
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub(super) fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

pub(super) fn bounds(token: DateRangeToken) -> DateRangeBounds {
    token.resolve(now(), Locale::En)
}

pub(super) fn tenant() -> TenantContext {
    TenantContext::new("acme", Locale::En)
}

pub(super) fn job(id: &str, title: &str, status: JobStatus, department: Option<&str>) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: title.to_string(),
        status,
        department_id: department.map(|id| DepartmentId(id.to_string())),
        created_at: ymd(2025, 1, 1),
    }
}

pub(super) fn department(id: &str, name: &str) -> Department {
    Department {
        id: DepartmentId(id.to_string()),
        name: name.to_string(),
    }
}

pub(super) fn application(
    id: &str,
    job: &str,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        status,
        source: None,
        job_id: JobId(job.to_string()),
        candidate_id: Some(CandidateId(format!("cand-{id}"))),
        created_at,
        updated_at: None,
    }
}

/// Hired application whose last update lands `days_to_hire` days after creation.
pub(super) fn hired(
    id: &str,
    job: &str,
    created_at: DateTime<Utc>,
    days_to_hire: i64,
) -> Application {
    let mut hired = application(id, job, ApplicationStatus::Hired, created_at);
    hired.updated_at = Some(created_at + Duration::days(days_to_hire));
    hired
}

pub(super) fn sourced(mut application: Application, source: &str) -> Application {
    application.source = Some(source.to_string());
    application
}

pub(super) fn interview(
    id: &str,
    interviewer: Option<&str>,
    application: &str,
    status: InterviewStatus,
    scheduled_at: DateTime<Utc>,
) -> Interview {
    Interview {
        id: InterviewId(id.to_string()),
        interviewer_id: interviewer.map(|id| ProfileId(id.to_string())),
        status,
        scheduled_at,
        application_id: ApplicationId(application.to_string()),
        feedback: None,
    }
}

pub(super) fn rated(mut interview: Interview, rating: u8) -> Interview {
    interview.feedback = Some(InterviewFeedback {
        rating,
        criteria_scores: Default::default(),
    });
    interview
}

pub(super) fn profile(id: &str, first: Option<&str>, last: Option<&str>, email: &str) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
        email: Some(email.to_string()),
    }
}

pub(super) fn offer(id: &str, status: OfferStatus, created_at: DateTime<Utc>) -> Offer {
    Offer {
        id: OfferId(id.to_string()),
        application_id: None,
        status,
        created_at,
        benefits: vec!["Health insurance".to_string()],
    }
}

pub(super) fn candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|index| Candidate {
            id: CandidateId(format!("cand-{index}")),
        })
        .collect()
}

/// Ten applications on one engineering job: six hired after 5, 10, .., 30 days and four
/// still interviewing.
pub(super) fn end_to_end_snapshot() -> AnalyticsSnapshot {
    let mut applications: Vec<Application> = (1..=6)
        .map(|index| {
            hired(
                &format!("app-h{index}"),
                "job-backend",
                days_ago(60),
                index * 5,
            )
        })
        .collect();
    applications.extend((1..=4).map(|index| {
        application(
            &format!("app-i{index}"),
            "job-backend",
            ApplicationStatus::Interviewing,
            days_ago(10),
        )
    }));

    AnalyticsSnapshot {
        jobs: vec![job(
            "job-backend",
            "Backend Engineer",
            JobStatus::Published,
            Some("dept-eng"),
        )],
        candidates: candidates(10),
        applications,
        departments: vec![department("dept-eng", "Engineering")],
        ..AnalyticsSnapshot::default()
    }
}

/// Departments with an unjoinable job (`dept-missing`) and a job without any department.
pub(super) fn department_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        jobs: vec![
            job("job-be", "Backend Engineer", JobStatus::Published, Some("dept-eng")),
            job("job-fe", "Frontend Engineer", JobStatus::Closed, Some("dept-eng")),
            job("job-ae", "Account Executive", JobStatus::Open, Some("dept-sales")),
            job("job-orphan", "Data Analyst", JobStatus::Published, Some("dept-missing")),
            job("job-nodept", "Office Manager", JobStatus::Draft, None),
        ],
        departments: vec![
            department("dept-eng", "Engineering"),
            department("dept-sales", "Sales"),
            department("dept-design", "Design"),
        ],
        applications: vec![
            hired("a-1", "job-be", days_ago(40), 10),
            hired("a-2", "job-be", days_ago(40), 20),
            application("a-3", "job-be", ApplicationStatus::Screening, days_ago(5)),
            application("a-4", "job-fe", ApplicationStatus::Interviewing, days_ago(5)),
            hired("a-5", "job-ae", days_ago(30), 7),
            application("a-6", "job-ae", ApplicationStatus::New, days_ago(2)),
            hired("a-7", "job-orphan", days_ago(50), 30),
        ],
        ..AnalyticsSnapshot::default()
    }
}

/// In-memory repository with optional latency, a single failing collection and an owning tenant.
#[derive(Debug, Clone, Default)]
pub(super) struct MemoryRepository {
    pub(super) snapshot: AnalyticsSnapshot,
    pub(super) delay: Option<StdDuration>,
    pub(super) fail_on: Option<Collection>,
    pub(super) owner: Option<TenantId>,
}

impl MemoryRepository {
    pub(super) fn new(snapshot: AnalyticsSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub(super) fn delayed(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn failing(mut self, collection: Collection) -> Self {
        self.fail_on = Some(collection);
        self
    }

    pub(super) fn owned_by(mut self, tenant_id: &str) -> Self {
        self.owner = Some(TenantId(tenant_id.to_string()));
        self
    }

    async fn load<T: Clone>(
        &self,
        tenant: &TenantContext,
        collection: Collection,
        pick: impl Fn(&AnalyticsSnapshot) -> &Vec<T>,
    ) -> Result<Vec<T>, RepositoryError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self
            .owner
            .as_ref()
            .is_some_and(|owner| *owner != tenant.tenant_id)
        {
            return Err(RepositoryError::Unauthorized);
        }
        if self.fail_on == Some(collection) {
            return Err(RepositoryError::Unavailable("database offline".to_string()));
        }
        Ok(pick(&self.snapshot).clone())
    }
}

impl AnalyticsRepository for MemoryRepository {
    async fn jobs(&self, tenant: &TenantContext) -> Result<Vec<Job>, RepositoryError> {
        self.load(tenant, Collection::Jobs, |snapshot| &snapshot.jobs).await
    }

    async fn candidates(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        self.load(tenant, Collection::Candidates, |snapshot| &snapshot.candidates)
            .await
    }

    async fn applications(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.load(tenant, Collection::Applications, |snapshot| &snapshot.applications)
            .await
    }

    async fn interviews(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Interview>, RepositoryError> {
        self.load(tenant, Collection::Interviews, |snapshot| &snapshot.interviews)
            .await
    }

    async fn offers(&self, tenant: &TenantContext) -> Result<Vec<Offer>, RepositoryError> {
        self.load(tenant, Collection::Offers, |snapshot| &snapshot.offers)
            .await
    }

    async fn departments(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Department>, RepositoryError> {
        self.load(tenant, Collection::Departments, |snapshot| &snapshot.departments)
            .await
    }

    async fn profiles(&self, tenant: &TenantContext) -> Result<Vec<Profile>, RepositoryError> {
        self.load(tenant, Collection::Profiles, |snapshot| &snapshot.profiles)
            .await
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
