//! Pure aggregation from a fetched snapshot into [`DashboardStats`].
//!
//! Nothing here reads a clock, a random source, or the network: the same snapshot, bounds, and
//! locale always produce the same output. Every integer rounding goes through [`round_ratio`],
//! which rounds half up (toward positive infinity) using exact integer arithmetic.

mod comparison;
mod funnel;
mod hiring;
mod performance;
mod sources;
mod team;
mod trend;

use std::collections::HashMap;

use super::domain::{
    AnalyticsSnapshot, Application, Department, DepartmentId, Interview, Job, JobId, Locale,
    OfferStatus,
};
use super::range::DateRangeBounds;
use super::views::{DashboardStats, OverviewStats};

/// Label used when a job or department reference cannot be joined.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Rounds `numerator / denominator` half up. A zero denominator yields zero.
pub fn round_ratio(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// `part / whole` as a rounded percentage, zero when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> i64 {
    round_ratio(part as i64 * 100, whole as i64)
}

/// Period-filtered view of a snapshot plus the join indexes the builders share.
pub(crate) struct Scope<'a> {
    pub(crate) snapshot: &'a AnalyticsSnapshot,
    pub(crate) bounds: &'a DateRangeBounds,
    pub(crate) locale: Locale,
    /// Applications created inside the current window.
    pub(crate) applications: Vec<&'a Application>,
    /// Interviews scheduled inside the current window.
    pub(crate) interviews: Vec<&'a Interview>,
    jobs_by_id: HashMap<&'a JobId, &'a Job>,
    departments_by_id: HashMap<&'a DepartmentId, &'a Department>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        snapshot: &'a AnalyticsSnapshot,
        bounds: &'a DateRangeBounds,
        locale: Locale,
    ) -> Self {
        let applications = snapshot
            .applications
            .iter()
            .filter(|application| bounds.contains(application.created_at))
            .collect();
        let interviews = snapshot
            .interviews
            .iter()
            .filter(|interview| bounds.contains(interview.scheduled_at))
            .collect();
        let jobs_by_id = snapshot.jobs.iter().map(|job| (&job.id, job)).collect();
        let departments_by_id = snapshot
            .departments
            .iter()
            .map(|department| (&department.id, department))
            .collect();

        Self {
            snapshot,
            bounds,
            locale,
            applications,
            interviews,
            jobs_by_id,
            departments_by_id,
        }
    }

    pub(crate) fn job(&self, id: &JobId) -> Option<&'a Job> {
        self.jobs_by_id.get(id).copied()
    }

    pub(crate) fn department(&self, id: &DepartmentId) -> Option<&'a Department> {
        self.departments_by_id.get(id).copied()
    }

    /// Department of the job an application belongs to, when both joins succeed.
    pub(crate) fn department_of(&self, job_id: &JobId) -> Option<&'a Department> {
        let department_id = self.job(job_id)?.department_id.as_ref()?;
        self.department(department_id)
    }

    pub(crate) fn department_name(&self, job_id: &JobId) -> &'a str {
        self.department_of(job_id)
            .map(|department| department.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

/// Builds the full dashboard for one tenant snapshot.
pub fn aggregate(
    snapshot: &AnalyticsSnapshot,
    bounds: &DateRangeBounds,
    locale: Locale,
) -> DashboardStats {
    let scope = Scope::new(snapshot, bounds, locale);

    let hire_times = hiring::HireDurations::collect(&scope);
    let time_to_hire = hire_times.stats(&scope);
    let overview = overview(&scope, time_to_hire.average);

    DashboardStats {
        date_range: bounds.token,
        period_label: bounds.label,
        period_start: bounds.start,
        period_end: bounds.end,
        overview,
        hiring_funnel: funnel::hiring_funnel(&scope),
        applications_by_source: sources::applications_by_source(&scope),
        applications_trend: trend::applications_trend(&scope),
        top_performing_jobs: performance::top_performing_jobs(&scope),
        team_activity: team::team_activity(&scope),
        pipeline_velocity: funnel::pipeline_velocity(&scope),
        period_comparison: comparison::period_comparison(&scope),
        department_metrics: performance::department_metrics(&scope, &hire_times),
        dropoff_analysis: funnel::dropoff_analysis(&scope),
        goals: comparison::goals(&scope),
        time_to_hire,
    }
}

fn overview(scope: &Scope<'_>, avg_time_to_hire: i64) -> OverviewStats {
    let snapshot = scope.snapshot;
    let now = scope.bounds.end;

    let upcoming_interviews = snapshot
        .interviews
        .iter()
        .filter(|interview| interview.status.is_pending() && interview.scheduled_at > now)
        .count();

    let (offers, accepted) = snapshot
        .offers
        .iter()
        .filter(|offer| scope.bounds.contains(offer.created_at))
        .fold((0usize, 0usize), |(offers, accepted), offer| match offer.status {
            OfferStatus::Hired => (offers + 1, accepted + 1),
            OfferStatus::Offered | OfferStatus::Rejected => (offers + 1, accepted),
            OfferStatus::Other(_) => (offers, accepted),
        });

    OverviewStats {
        total_jobs: snapshot.jobs.len(),
        active_jobs: snapshot
            .jobs
            .iter()
            .filter(|job| job.status.is_active())
            .count(),
        total_candidates: snapshot.candidates.len(),
        total_applications: scope.applications.len(),
        total_interviews: scope.interviews.len(),
        upcoming_interviews,
        total_hires: scope
            .applications
            .iter()
            .filter(|application| application.status.is_hired())
            .count(),
        avg_time_to_hire,
        offer_acceptance_rate: percent(accepted, offers),
    }
}
