use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::service::{
    BottleneckService, BottleneckServiceError, RankRequest, ReportOverrides, ScoreRequest,
};
use super::source::{HospitalId, SnapshotSource, TimeWindow};
use crate::error::AppError;

/// Router exposing candidate ranking, snapshot scoring, and hospital reports.
pub fn bottleneck_router<S>(service: Arc<BottleneckService<S>>) -> Router
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route("/api/v1/bottlenecks/rank", post(rank_handler::<S>))
        .route("/api/v1/bottlenecks/score", post(score_handler::<S>))
        .route(
            "/api/v1/hospitals/:hospital_id/bottlenecks",
            get(hospital_report_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportQuery {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    top_n: Option<usize>,
    #[serde(default)]
    hour: Option<u8>,
}

pub(crate) async fn rank_handler<S>(
    State(service): State<Arc<BottleneckService<S>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    S: SnapshotSource + 'static,
{
    match service.rank(&request) {
        Ok(ranking) => (StatusCode::OK, axum::Json(ranking)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<BottleneckService<S>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: SnapshotSource + 'static,
{
    match service.score(&request) {
        Ok(scored) => (StatusCode::OK, axum::Json(scored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn hospital_report_handler<S>(
    State(service): State<Arc<BottleneckService<S>>>,
    Path(hospital_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    S: SnapshotSource + 'static,
{
    let window = match TimeWindow::new(query.start, query.end) {
        Ok(window) => window,
        Err(error) => return error_response(error.into()),
    };
    let overrides = ReportOverrides {
        top_n: query.top_n,
        hour: query.hour,
    };

    match service.hospital_report(&HospitalId(hospital_id), &window, overrides) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BottleneckServiceError) -> Response {
    AppError::from(error).into_response()
}
