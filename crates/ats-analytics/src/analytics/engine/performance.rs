use std::collections::HashMap;

use super::super::domain::{Application, DepartmentId, JobId};
use super::super::views::{DepartmentMetricsEntry, JobPerformanceEntry};
use super::hiring::HireDurations;
use super::{percent, Scope};

const TOP_JOBS_LIMIT: usize = 5;

#[derive(Debug, Default, Clone, Copy)]
struct PipelineCounts {
    applications: usize,
    interviews: usize,
    hires: usize,
}

impl PipelineCounts {
    fn record(&mut self, application: &Application) {
        self.applications += 1;
        if application.status.is_interview_or_later() {
            self.interviews += 1;
        }
        if application.status.is_hired() {
            self.hires += 1;
        }
    }
}

fn counts_by_job<'a>(scope: &Scope<'a>) -> HashMap<&'a JobId, PipelineCounts> {
    let mut counts: HashMap<&'a JobId, PipelineCounts> = HashMap::new();
    for application in scope.applications.iter().copied() {
        counts
            .entry(&application.job_id)
            .or_default()
            .record(application);
    }
    counts
}

/// Active jobs ranked by application volume in the current window.
pub(crate) fn top_performing_jobs(scope: &Scope<'_>) -> Vec<JobPerformanceEntry> {
    let counts = counts_by_job(scope);

    let mut entries: Vec<JobPerformanceEntry> = scope
        .snapshot
        .jobs
        .iter()
        .filter(|job| job.status.is_active())
        .map(|job| {
            let tally = counts.get(&job.id).copied().unwrap_or_default();
            JobPerformanceEntry {
                job_id: job.id.clone(),
                title: job.title.clone(),
                department: scope.department_name(&job.id).to_string(),
                applications: tally.applications,
                interviews: tally.interviews,
                hires: tally.hires,
                conversion_rate: percent(tally.hires, tally.applications),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.applications
            .cmp(&a.applications)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.job_id.cmp(&b.job_id))
    });
    entries.truncate(TOP_JOBS_LIMIT);
    entries
}

pub(crate) fn department_metrics(
    scope: &Scope<'_>,
    hire_times: &HireDurations<'_>,
) -> Vec<DepartmentMetricsEntry> {
    let mut by_department: HashMap<&DepartmentId, PipelineCounts> = HashMap::new();
    let mut open_jobs: HashMap<&DepartmentId, usize> = HashMap::new();

    for job in &scope.snapshot.jobs {
        if let Some(department_id) = job.department_id.as_ref() {
            if job.status.is_active() {
                *open_jobs.entry(department_id).or_default() += 1;
            }
        }
    }

    for application in scope.applications.iter().copied() {
        if let Some(department) = scope.department_of(&application.job_id) {
            by_department
                .entry(&department.id)
                .or_default()
                .record(application);
        }
    }

    let mut entries: Vec<DepartmentMetricsEntry> = scope
        .snapshot
        .departments
        .iter()
        .map(|department| {
            let tally = by_department
                .get(&department.id)
                .copied()
                .unwrap_or_default();
            DepartmentMetricsEntry {
                department_id: department.id.clone(),
                name: department.name.clone(),
                open_jobs: open_jobs.get(&department.id).copied().unwrap_or_default(),
                applications: tally.applications,
                interviews: tally.interviews,
                hires: tally.hires,
                avg_time_to_fill: hire_times
                    .for_department(&department.id)
                    .map(|sum| sum.average())
                    .unwrap_or_default(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.applications
            .cmp(&a.applications)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.department_id.cmp(&b.department_id))
    });
    entries
}
