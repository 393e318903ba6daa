use std::collections::{HashMap, HashSet};

use super::super::domain::{ApplicationId, InterviewStatus, Profile, ProfileId};
use super::super::views::TeamActivityEntry;
use super::Scope;

const TEAM_LIMIT: usize = 10;
const INTERVIEW_WEIGHT: usize = 10;
const APPLICATION_WEIGHT: usize = 5;

#[derive(Default)]
struct InterviewerTally<'a> {
    interviews: usize,
    completed: usize,
    applications: HashSet<&'a ApplicationId>,
    rating_total: u32,
    ratings: u32,
}

/// Fixed weighting: ten points per interview, five per distinct application.
pub(crate) fn activity_score(interviews: usize, distinct_applications: usize) -> usize {
    interviews * INTERVIEW_WEIGHT + distinct_applications * APPLICATION_WEIGHT
}

pub(crate) fn team_activity(scope: &Scope<'_>) -> Vec<TeamActivityEntry> {
    let profiles: HashMap<&ProfileId, &Profile> = scope
        .snapshot
        .profiles
        .iter()
        .map(|profile| (&profile.id, profile))
        .collect();

    let mut order: Vec<&ProfileId> = Vec::new();
    let mut tallies: HashMap<&ProfileId, InterviewerTally<'_>> = HashMap::new();

    for interview in scope.interviews.iter().copied() {
        let Some(interviewer) = interview.interviewer_id.as_ref() else {
            continue;
        };
        let tally = tallies.entry(interviewer).or_insert_with(|| {
            order.push(interviewer);
            InterviewerTally::default()
        });
        tally.interviews += 1;
        if interview.status == InterviewStatus::Completed {
            tally.completed += 1;
        }
        tally.applications.insert(&interview.application_id);
        if let Some(feedback) = &interview.feedback {
            tally.rating_total += u32::from(feedback.rating);
            tally.ratings += 1;
        }
    }

    let mut entries: Vec<TeamActivityEntry> = order
        .into_iter()
        .filter_map(|interviewer| {
            let tally = tallies.get(interviewer)?;
            let profile = profiles.get(interviewer);
            let applications_touched = tally.applications.len();
            Some(TeamActivityEntry {
                interviewer_id: interviewer.clone(),
                name: profile
                    .map(|profile| profile.display_name())
                    .unwrap_or_else(|| interviewer.0.clone()),
                email: profile.and_then(|profile| profile.email.clone()),
                interviews: tally.interviews,
                completed_interviews: tally.completed,
                applications_touched,
                score: activity_score(tally.interviews, applications_touched),
                average_rating: average_rating(tally.rating_total, tally.ratings),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(TEAM_LIMIT);
    entries
}

/// Mean rating to one decimal place, rounded half up.
fn average_rating(total: u32, count: u32) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let tenths = super::round_ratio(i64::from(total) * 10, i64::from(count));
    Some(tenths as f64 / 10.0)
}
