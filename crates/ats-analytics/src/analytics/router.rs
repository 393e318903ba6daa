use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{Locale, TenantContext};
use super::range::DateRangeToken;
use super::repository::AnalyticsRepository;
use super::service::AnalyticsService;
use crate::error::AppError;

/// Header carrying the tenant resolved by the upstream authorization layer.
pub const TENANT_HEADER: &str = "x-tenant-id";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) range: Option<String>,
    #[serde(default)]
    pub(crate) lang: Option<String>,
}

/// Router builder exposing the tenant dashboard.
pub fn analytics_router<R>(service: Arc<AnalyticsService<R>>) -> Router
where
    R: AnalyticsRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/analytics/dashboard",
            get(dashboard_handler::<R>),
        )
        .with_state(service)
}

fn tenant_from_headers(headers: &HeaderMap, query: &DashboardQuery) -> Option<TenantContext> {
    let tenant_id = headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())?;

    let locale = query
        .lang
        .as_deref()
        .or_else(|| {
            headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
        })
        .map(Locale::parse)
        .unwrap_or_default();

    Some(TenantContext::new(tenant_id, locale))
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    R: AnalyticsRepository + 'static,
{
    let Some(tenant) = tenant_from_headers(&headers, &query) else {
        let payload = json!({
            "error": format!("missing {TENANT_HEADER} header"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let range = query
        .range
        .as_deref()
        .map(DateRangeToken::parse)
        .unwrap_or(DateRangeToken::Last30Days);

    match service.dashboard(&tenant, range, Utc::now()).await {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
