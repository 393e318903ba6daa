use chrono::Duration;

use super::super::views::TrendPoint;
use super::Scope;

/// Daily buckets for the last `trend_days` days, today included, oldest first.
pub(crate) fn applications_trend(scope: &Scope<'_>) -> Vec<TrendPoint> {
    let days = scope.bounds.trend_days as i64;
    let today = scope.bounds.end.date_naive();
    let first = today - Duration::days(days - 1);

    let mut series: Vec<TrendPoint> = (0..days)
        .map(|offset| TrendPoint {
            date: first + Duration::days(offset),
            applications: 0,
            hires: 0,
        })
        .collect();

    for application in &scope.snapshot.applications {
        let offset = (application.created_at.date_naive() - first).num_days();
        if offset < 0 || offset >= days {
            continue;
        }
        let point = &mut series[offset as usize];
        point.applications += 1;
        if application.status.is_hired() {
            point.hires += 1;
        }
    }

    series
}
