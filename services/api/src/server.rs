use crate::cli::ServeArgs;
use crate::infra::{AppState, FixtureSnapshotSource};
use crate::routes::with_bottleneck_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use zephyrus_or::analytics::bottleneck::BottleneckService;
use zephyrus_or::config::AppConfig;
use zephyrus_or::error::AppError;
use zephyrus_or::telemetry;

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

    let source = FixtureSnapshotSource::default();
    let hospitals = source.hospital_ids();
    let service = Arc::new(BottleneckService::new(
        Arc::new(source),
        config.scoring.report_options(),
    ));

    let app = with_bottleneck_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        top_n = config.scoring.top_n,
        range_policy = %config.scoring.range_policy,
        ?hospitals,
        "bottleneck scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
