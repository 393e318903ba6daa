use super::super::domain::{Application, ApplicationStatus};
use super::super::views::{DropoffEntry, FunnelStageEntry, PipelineVelocityEntry};
use super::{percent, round_ratio, Scope};

const VELOCITY_NOTE: &str = "not computable without a stage transition log";

/// Applications currently sitting in `stage`. Unrecognized statuses never match.
pub(crate) fn count_in(applications: &[&Application], stage: &ApplicationStatus) -> usize {
    applications
        .iter()
        .filter(|application| &application.status == stage)
        .count()
}

pub(crate) fn hiring_funnel(scope: &Scope<'_>) -> Vec<FunnelStageEntry> {
    // An empty window divides by one so every stage reports 0%.
    let total = scope.applications.len().max(1);
    let stages = ApplicationStatus::funnel();
    let counts: Vec<usize> = stages
        .iter()
        .map(|stage| count_in(&scope.applications, stage))
        .collect();
    let percentages = bounded_percentages(&counts, total);

    stages
        .into_iter()
        .zip(counts)
        .zip(percentages)
        .map(|((stage, count), percentage)| FunnelStageEntry {
            stage_label: stage.label(),
            count,
            percentage,
            stage,
        })
        .collect()
}

/// Shares of `total` rounded half up, trimmed so they never sum past 100.
///
/// When rounding overshoots, the entries that were rounded up the furthest give back one
/// point each, earliest stage first on ties.
fn bounded_percentages(counts: &[usize], total: usize) -> Vec<i64> {
    let total = total as i64;
    let mut percentages: Vec<i64> = counts
        .iter()
        .map(|count| round_ratio(*count as i64 * 100, total))
        .collect();

    let excess = percentages.iter().sum::<i64>() - 100;
    if excess <= 0 {
        return percentages;
    }

    // Rounding gain scaled by `total`, so it stays an exact integer.
    let mut rounded_up: Vec<(usize, i64)> = counts
        .iter()
        .zip(&percentages)
        .enumerate()
        .map(|(index, (count, rounded))| (index, rounded * total - *count as i64 * 100))
        .filter(|(_, gain)| *gain > 0)
        .collect();
    rounded_up.sort_by(|a, b| b.1.cmp(&a.1));

    for (index, _) in rounded_up.into_iter().take(excess as usize) {
        percentages[index] -= 1;
    }
    percentages
}

pub(crate) fn pipeline_velocity(scope: &Scope<'_>) -> Vec<PipelineVelocityEntry> {
    ApplicationStatus::pipeline()
        .into_iter()
        .map(|stage| PipelineVelocityEntry {
            stage_label: stage.label(),
            candidates: count_in(&scope.applications, &stage),
            avg_days: 0,
            computable: false,
            note: VELOCITY_NOTE,
            stage,
        })
        .collect()
}

/// Estimates stage-to-stage loss from the current status distribution.
///
/// "Reached" for a stage is the number of applications at that stage or any later pipeline
/// stage. This reads occupancy as survivorship, so it approximates a tracked funnel.
pub(crate) fn dropoff_analysis(scope: &Scope<'_>) -> Vec<DropoffEntry> {
    let stages = ApplicationStatus::pipeline();
    let counts: Vec<usize> = stages
        .iter()
        .map(|stage| count_in(&scope.applications, stage))
        .collect();

    let reached: Vec<usize> = (0..counts.len())
        .map(|index| counts[index..].iter().sum())
        .collect();

    stages
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let reached_from = reached[index];
            let reached_to = reached[index + 1];
            let dropoff_count = reached_from.saturating_sub(reached_to);
            DropoffEntry {
                from_stage: pair[0].clone(),
                to_stage: pair[1].clone(),
                reached_from,
                reached_to,
                dropoff_count,
                dropoff_rate: percent(dropoff_count, reached_from),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_overshoot_is_trimmed() {
        let percentages = bounded_percentages(&[1, 1, 1, 0, 2, 1], 6);
        assert_eq!(percentages, vec![16, 17, 17, 0, 33, 17]);
        assert_eq!(percentages.iter().sum::<i64>(), 100);
    }

    #[test]
    fn exact_and_undershooting_shares_are_untouched() {
        assert_eq!(bounded_percentages(&[1, 1, 2], 4), vec![25, 25, 50]);
        assert_eq!(bounded_percentages(&[1, 1, 1], 4), vec![25, 25, 25]);
        assert_eq!(bounded_percentages(&[0, 0], 1), vec![0, 0]);
    }

    #[test]
    fn equal_rounding_gains_give_back_in_stage_order() {
        // Exact shares 12.5, 12.5, 37.5, 37.5 all round up to 13, 13, 38, 38 = 102.
        let percentages = bounded_percentages(&[1, 1, 3, 3], 8);
        assert_eq!(percentages, vec![12, 12, 38, 38]);
    }
}
