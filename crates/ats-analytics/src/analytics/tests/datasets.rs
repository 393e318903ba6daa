use std::time::Duration;

use serde_json::json;

use super::common::*;
use crate::analytics::dataset::{DatasetError, DatasetRepository};
use crate::analytics::domain::{ApplicationStatus, Locale, TenantContext, TenantId};
use crate::analytics::engine::aggregate;
use crate::analytics::fetch::fetch_snapshot;
use crate::analytics::range::DateRangeToken;
use crate::analytics::repository::AnalyticsRepository;

fn two_tenant_dataset() -> serde_json::Value {
    json!({
        "tenants": [
            {
                "tenant_id": "globex",
                "jobs": [{
                    "id": "job-ops",
                    "title": "Operations Lead",
                    "status": "open",
                    "department_id": null,
                    "created_at": "2025-01-01T00:00:00Z"
                }],
                "applications": [{
                    "id": "g-1",
                    "status": "screening",
                    "job_id": "job-ops",
                    "created_at": "2025-06-10T09:00:00Z"
                }]
            },
            {
                "tenant_id": "acme",
                "jobs": [{
                    "id": "job-be",
                    "title": "Backend Engineer",
                    "status": "published",
                    "department_id": "dept-eng",
                    "created_at": "2025-01-01T00:00:00Z"
                }],
                "departments": [{ "id": "dept-eng", "name": "Engineering" }],
                "applications": [
                    {
                        "id": "a-1",
                        "status": "hired",
                        "source": "referral",
                        "job_id": "job-be",
                        "created_at": "2025-05-01T00:00:00Z",
                        "updated_at": "2025-05-15T00:00:00Z"
                    },
                    {
                        "id": "a-2",
                        "status": "on_hold",
                        "job_id": "job-be",
                        "created_at": "2025-06-01T00:00:00Z"
                    }
                ],
                "interviews": [{
                    "id": "i-1",
                    "interviewer_id": "p-1",
                    "status": "completed",
                    "scheduled_at": "2025-05-05T10:00:00Z",
                    "application_id": "a-1",
                    "feedback": { "rating": 4, "criteria_scores": { "communication": 5 } }
                }],
                "offers": [{
                    "id": "o-1",
                    "status": "hired",
                    "created_at": "2025-05-10T00:00:00Z",
                    "benefits": ["Remote stipend"]
                }]
            }
        ]
    })
}

fn load(value: serde_json::Value) -> Result<DatasetRepository, DatasetError> {
    DatasetRepository::from_reader(value.to_string().as_bytes())
}

#[tokio::test]
async fn tenants_only_see_their_own_records() {
    let repository = load(two_tenant_dataset()).expect("dataset loads");

    let acme = repository
        .applications(&tenant())
        .await
        .expect("acme applications");
    assert_eq!(acme.len(), 2);
    assert_eq!(acme[1].status, ApplicationStatus::Other("on_hold".to_string()));

    let globex = TenantContext::new("globex", Locale::En);
    let jobs = repository.jobs(&globex).await.expect("globex jobs");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Operations Lead");

    let unknown = TenantContext::new("initech", Locale::En);
    let snapshot = fetch_snapshot(&repository, &unknown, Duration::from_secs(1))
        .await
        .expect("empty snapshot");
    assert!(snapshot.applications.is_empty());
    assert!(snapshot.jobs.is_empty());
}

#[tokio::test]
async fn loaded_dataset_feeds_the_engine() {
    let repository = load(two_tenant_dataset()).expect("dataset loads");
    let snapshot = fetch_snapshot(&repository, &tenant(), Duration::from_secs(1))
        .await
        .expect("snapshot");

    let stats = aggregate(&snapshot, &bounds(DateRangeToken::Last90Days), Locale::En);
    assert_eq!(stats.overview.total_applications, 2);
    assert_eq!(stats.overview.avg_time_to_hire, 14);
    assert_eq!(stats.overview.offer_acceptance_rate, 100);
    assert_eq!(stats.applications_by_source[0].source, "referral");
    assert_eq!(stats.department_metrics[0].name, "Engineering");
}

#[test]
fn tenant_ids_are_listed_in_order() {
    let repository = load(two_tenant_dataset()).expect("dataset loads");
    let ids: Vec<&str> = repository
        .tenant_ids()
        .into_iter()
        .map(|id: &TenantId| id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["acme", "globex"]);
}

#[test]
fn out_of_range_rating_is_rejected() {
    let mut dataset = two_tenant_dataset();
    dataset["tenants"][1]["interviews"][0]["feedback"]["rating"] = json!(7);

    match load(dataset) {
        Err(DatasetError::Invalid { tenant, record, .. }) => {
            assert_eq!(tenant.0, "acme");
            assert_eq!(record, "interview i-1");
        }
        other => panic!("expected invalid dataset, got {other:?}"),
    }
}

#[test]
fn blank_criteria_and_benefits_are_rejected() {
    let mut dataset = two_tenant_dataset();
    dataset["tenants"][1]["interviews"][0]["feedback"]["criteria_scores"] = json!({ " ": 3 });
    assert!(matches!(load(dataset), Err(DatasetError::Invalid { .. })));

    let mut dataset = two_tenant_dataset();
    dataset["tenants"][1]["offers"][0]["benefits"] = json!(["Gym", ""]);
    match load(dataset) {
        Err(DatasetError::Invalid { record, .. }) => assert_eq!(record, "offer o-1"),
        other => panic!("expected invalid dataset, got {other:?}"),
    }
}

#[test]
fn duplicate_tenants_are_rejected() {
    let mut dataset = two_tenant_dataset();
    dataset["tenants"][0]["tenant_id"] = json!("acme");
    assert!(matches!(load(dataset), Err(DatasetError::Invalid { .. })));
}

#[test]
fn malformed_json_and_missing_files_are_reported() {
    let parse = DatasetRepository::from_reader("{ not json".as_bytes());
    assert!(matches!(parse, Err(DatasetError::Parse(_))));

    let missing = DatasetRepository::from_path("/nonexistent/analytics-dataset.json");
    match missing {
        Err(DatasetError::Io { path, .. }) => {
            assert!(path.ends_with("analytics-dataset.json"));
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
