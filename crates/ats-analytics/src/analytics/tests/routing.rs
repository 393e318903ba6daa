use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use super::common::*;
use crate::analytics::repository::Collection;
use crate::analytics::router::{analytics_router, TENANT_HEADER};
use crate::analytics::service::AnalyticsService;
use crate::config::AnalyticsConfig;

const DASHBOARD: &str = "/api/v1/analytics/dashboard";

fn router(repository: MemoryRepository) -> Router {
    let config = AnalyticsConfig {
        fetch_timeout: Duration::from_secs(1),
        ..AnalyticsConfig::default()
    };
    analytics_router(Arc::new(AnalyticsService::new(Arc::new(repository), &config)))
}

fn request(uri: &str, tenant: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(tenant) = tenant {
        builder = builder.header(TENANT_HEADER, tenant);
    }
    builder.body(Body::empty()).expect("request")
}

#[tokio::test]
async fn dashboard_returns_camel_case_payload() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()));

    let response = app
        .oneshot(request(&format!("{DASHBOARD}?range=all"), Some("acme")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["dateRange"], "all");
    assert_eq!(payload["periodLabel"], "All time");
    assert_eq!(payload["overview"]["totalApplications"], 10);
    assert_eq!(payload["overview"]["avgTimeToHire"], 18);
    assert_eq!(payload["hiringFunnel"][0]["stage"], "new");
    assert_eq!(payload["hiringFunnel"][4]["stageLabel"], "Hired");
    assert_eq!(payload["timeToHire"]["excludedOutliers"], 0);
    assert_eq!(payload["goals"][0]["kind"], "monthly_hires");
    assert!(payload["dropoffAnalysis"].is_array());
    assert!(payload["departmentMetrics"].is_array());
}

#[tokio::test]
async fn missing_range_defaults_to_thirty_days() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()));

    let response = app
        .oneshot(request(DASHBOARD, Some("acme")))
        .await
        .expect("response");
    let payload = read_json_body(response).await;

    assert_eq!(payload["dateRange"], "30d");
    assert_eq!(payload["applicationsTrend"].as_array().map(Vec::len), Some(30));
}

#[tokio::test]
async fn unrecognized_range_falls_back_to_all_time() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()));

    let response = app
        .oneshot(request(&format!("{DASHBOARD}?range=fortnight"), Some("acme")))
        .await
        .expect("response");
    let payload = read_json_body(response).await;

    assert_eq!(payload["dateRange"], "all");
}

#[tokio::test]
async fn language_comes_from_query_or_accept_language() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()));
    let response = app
        .oneshot(request(&format!("{DASHBOARD}?range=7d&lang=ar"), Some("acme")))
        .await
        .expect("response");
    let payload = read_json_body(response).await;
    assert_eq!(payload["periodLabel"], "آخر 7 أيام");

    let app = router(MemoryRepository::new(end_to_end_snapshot()));
    let request = Request::builder()
        .uri(format!("{DASHBOARD}?range=7d"))
        .header(TENANT_HEADER, "acme")
        .header(header::ACCEPT_LANGUAGE, "ar-SA,ar;q=0.9")
        .body(Body::empty())
        .expect("request");
    let payload = read_json_body(app.oneshot(request).await.expect("response")).await;
    assert_eq!(payload["periodLabel"], "آخر 7 أيام");
}

#[tokio::test]
async fn missing_tenant_is_rejected() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()));
    let response = app
        .oneshot(request(DASHBOARD, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = router(MemoryRepository::new(end_to_end_snapshot()));
    let response = app
        .oneshot(request(DASHBOARD, Some("   ")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repository_failure_yields_service_unavailable() {
    let app = router(MemoryRepository::new(end_to_end_snapshot()).failing(Collection::Jobs));

    let response = app
        .oneshot(request(DASHBOARD, Some("acme")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("jobs query failed"), "{message}");
}
