use std::collections::HashMap;

use super::super::views::SourceConversionEntry;
use super::{percent, Scope};

#[derive(Default)]
struct SourceTally {
    count: usize,
    interviews: usize,
    hires: usize,
}

pub(crate) fn applications_by_source(scope: &Scope<'_>) -> Vec<SourceConversionEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, SourceTally> = HashMap::new();

    for application in scope.applications.iter().copied() {
        let source = application.source_label();
        let tally = tallies.entry(source).or_insert_with(|| {
            order.push(source);
            SourceTally::default()
        });
        tally.count += 1;
        if application.status.is_interview_or_later() {
            tally.interviews += 1;
        }
        if application.status.is_hired() {
            tally.hires += 1;
        }
    }

    let mut entries: Vec<SourceConversionEntry> = order
        .into_iter()
        .filter_map(|source| {
            tallies.get(source).map(|tally| SourceConversionEntry {
                source: source.to_string(),
                count: tally.count,
                interviews: tally.interviews,
                hires: tally.hires,
                conversion_rate: percent(tally.hires, tally.count),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}
