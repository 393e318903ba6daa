use std::collections::HashMap;

use super::super::domain::{Application, DepartmentId, JobId};
use super::super::views::{DepartmentHireTime, JobHireTime, TimeToHireStats};
use super::{round_ratio, Scope, UNKNOWN_LABEL};

const SECONDS_PER_DAY: i64 = 86_400;

/// Spans at or beyond this many days are treated as data-quality outliers.
pub(crate) const MAX_HIRE_DAYS: i64 = 365;

const JOB_BREAKDOWN_LIMIT: usize = 10;

/// Whole days between creation and last update of a hired application.
///
/// Returns `None` when the application is not hired, has no update timestamp, was updated
/// before it was created, or spans [`MAX_HIRE_DAYS`] or more.
pub(crate) fn hire_days(application: &Application) -> Option<i64> {
    if !application.status.is_hired() {
        return None;
    }
    let updated_at = application.updated_at?;
    if updated_at < application.created_at {
        return None;
    }
    let seconds = (updated_at - application.created_at).num_seconds();
    let days = round_ratio(seconds, SECONDS_PER_DAY);
    (days < MAX_HIRE_DAYS).then_some(days)
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DaySum {
    pub(crate) total: i64,
    pub(crate) hires: usize,
}

impl DaySum {
    fn push(&mut self, days: i64) {
        self.total += days;
        self.hires += 1;
    }

    pub(crate) fn average(self) -> i64 {
        round_ratio(self.total, self.hires as i64)
    }
}

/// Retained hire spans for the current window, grouped the ways the dashboard reports them.
pub(crate) struct HireDurations<'a> {
    overall: DaySum,
    excluded: usize,
    /// Keyed by department; `None` collects unjoinable jobs and departments.
    by_department: HashMap<Option<&'a DepartmentId>, DaySum>,
    /// Jobs in first-seen order so ties keep a stable position.
    by_job: Vec<(&'a JobId, DaySum)>,
}

impl<'a> HireDurations<'a> {
    pub(crate) fn collect(scope: &Scope<'a>) -> Self {
        let mut overall = DaySum::default();
        let mut excluded = 0;
        let mut by_department: HashMap<Option<&'a DepartmentId>, DaySum> = HashMap::new();
        let mut by_job: Vec<(&'a JobId, DaySum)> = Vec::new();
        let mut job_index: HashMap<&'a JobId, usize> = HashMap::new();

        for application in scope
            .applications
            .iter()
            .copied()
            .filter(|application| application.status.is_hired())
        {
            let Some(days) = hire_days(application) else {
                excluded += 1;
                continue;
            };

            overall.push(days);

            let department = scope
                .department_of(&application.job_id)
                .map(|department| &department.id);
            by_department.entry(department).or_default().push(days);

            let index = *job_index.entry(&application.job_id).or_insert_with(|| {
                by_job.push((&application.job_id, DaySum::default()));
                by_job.len() - 1
            });
            by_job[index].1.push(days);
        }

        Self {
            overall,
            excluded,
            by_department,
            by_job,
        }
    }

    pub(crate) fn for_department(&self, department: &DepartmentId) -> Option<DaySum> {
        self.by_department.get(&Some(department)).copied()
    }

    pub(crate) fn stats(&self, scope: &Scope<'a>) -> TimeToHireStats {
        let mut keyed: Vec<(Option<&DepartmentId>, DepartmentHireTime)> = self
            .by_department
            .iter()
            .map(|(department, sum)| {
                let name = department
                    .and_then(|id| scope.department(id))
                    .map(|department| department.name.clone())
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
                let entry = DepartmentHireTime {
                    department: name,
                    average_days: sum.average(),
                    hires: sum.hires,
                };
                (*department, entry)
            })
            .collect();
        // Same-named departments fall back to id order; the unjoined bucket sorts last.
        keyed.sort_by(|(a_key, a), (b_key, b)| {
            b.hires
                .cmp(&a.hires)
                .then_with(|| a.department.cmp(&b.department))
                .then_with(|| a_key.is_none().cmp(&b_key.is_none()))
                .then_with(|| a_key.cmp(b_key))
        });
        let by_department = keyed.into_iter().map(|(_, entry)| entry).collect();

        let mut by_job: Vec<JobHireTime> = self
            .by_job
            .iter()
            .map(|(job_id, sum)| JobHireTime {
                job_id: (*job_id).clone(),
                job_title: scope
                    .job(job_id)
                    .map(|job| job.title.clone())
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                average_days: sum.average(),
                hires: sum.hires,
            })
            .collect();
        by_job.sort_by(|a, b| {
            b.hires
                .cmp(&a.hires)
                .then_with(|| a.job_title.cmp(&b.job_title))
                .then_with(|| a.job_id.cmp(&b.job_id))
        });
        by_job.truncate(JOB_BREAKDOWN_LIMIT);

        TimeToHireStats {
            average: self.overall.average(),
            excluded_outliers: self.excluded,
            by_department,
            by_job,
        }
    }
}
