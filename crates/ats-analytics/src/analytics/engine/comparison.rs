use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::super::domain::Locale;
use super::super::range::DateRangeBounds;
use super::super::views::{
    ComparisonMetric, GoalKind, GoalProgressEntry, GoalStatus, PeriodComparisonEntry,
};
use super::{percent, round_ratio, Scope};

pub(crate) fn period_comparison(scope: &Scope<'_>) -> Vec<PeriodComparisonEntry> {
    let snapshot = scope.snapshot;
    let bounds = scope.bounds;

    ComparisonMetric::ordered()
        .into_iter()
        .map(|metric| {
            let (current, previous) = match metric {
                ComparisonMetric::Applications => {
                    split_counts(snapshot.applications.iter().map(|a| a.created_at), bounds)
                }
                ComparisonMetric::Hires => split_counts(
                    snapshot
                        .applications
                        .iter()
                        .filter(|a| a.status.is_hired())
                        .map(|a| a.created_at),
                    bounds,
                ),
                ComparisonMetric::Interviews => {
                    split_counts(snapshot.interviews.iter().map(|i| i.scheduled_at), bounds)
                }
            };
            let change = current as i64 - previous as i64;
            PeriodComparisonEntry {
                metric,
                label: metric.label(),
                current,
                previous,
                change,
                change_percent: round_ratio(change * 100, previous as i64),
            }
        })
        .collect()
}

fn split_counts(
    timestamps: impl Iterator<Item = DateTime<Utc>>,
    bounds: &DateRangeBounds,
) -> (usize, usize) {
    timestamps.fold((0, 0), |(current, previous), at| {
        if bounds.contains(at) {
            (current + 1, previous)
        } else if bounds.previous_contains(at) {
            (current, previous + 1)
        } else {
            (current, previous)
        }
    })
}

const HIRES_TARGET: usize = 10;
const INTERVIEWS_TARGET: usize = 50;
const APPLICATIONS_TARGET: usize = 100;

impl GoalKind {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::MonthlyHires,
            Self::InterviewPipeline,
            Self::ApplicationTarget,
        ]
    }

    pub const fn target(self) -> usize {
        match self {
            Self::MonthlyHires => HIRES_TARGET,
            Self::InterviewPipeline => INTERVIEWS_TARGET,
            Self::ApplicationTarget => APPLICATIONS_TARGET,
        }
    }

    pub const fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::MonthlyHires, Locale::En) => "Monthly hires",
            (Self::InterviewPipeline, Locale::En) => "Interview pipeline",
            (Self::ApplicationTarget, Locale::En) => "Application target",
            (Self::MonthlyHires, Locale::Ar) => "التوظيف الشهري",
            (Self::InterviewPipeline, Locale::Ar) => "مسار المقابلات",
            (Self::ApplicationTarget, Locale::Ar) => "هدف الطلبات",
        }
    }
}

/// Last calendar day of the month containing `day`.
pub(crate) fn month_end(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(day)
}

/// Hard-coded targets compared against live current-window counts.
pub(crate) fn goals(scope: &Scope<'_>) -> Vec<GoalProgressEntry> {
    let deadline = month_end(scope.bounds.end.date_naive());
    let hires = scope
        .applications
        .iter()
        .filter(|application| application.status.is_hired())
        .count();

    GoalKind::ordered()
        .into_iter()
        .map(|kind| {
            let current = match kind {
                GoalKind::MonthlyHires => hires,
                GoalKind::InterviewPipeline => scope.interviews.len(),
                GoalKind::ApplicationTarget => scope.applications.len(),
            };
            let target = kind.target();
            GoalProgressEntry {
                kind,
                title: kind.title(scope.locale),
                current,
                target,
                progress: percent(current, target).min(100),
                deadline,
                status: if current >= target {
                    GoalStatus::Achieved
                } else {
                    GoalStatus::InProgress
                },
            }
        })
        .collect()
}
