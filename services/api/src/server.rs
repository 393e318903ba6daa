use crate::cli::ServeArgs;
use crate::infra::{load_repository, AppState};
use crate::routes::with_analytics_routes;
use ats_analytics::analytics::AnalyticsService;
use ats_analytics::config::AppConfig;
use ats_analytics::error::AppError;
use ats_analytics::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(load_repository(config.analytics.dataset_path.as_deref())?);
    let analytics_service = Arc::new(AnalyticsService::new(repository, &config.analytics));

    let app = with_analytics_routes(analytics_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        fetch_timeout_ms = config.analytics.fetch_timeout.as_millis() as u64,
        "hiring analytics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
