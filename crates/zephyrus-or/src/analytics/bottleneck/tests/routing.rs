use super::common::*;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::analytics::bottleneck::reference;
use crate::analytics::bottleneck::report::ReportOptions;
use crate::analytics::bottleneck::router::{bottleneck_router, hospital_report_handler};
use crate::analytics::bottleneck::service::BottleneckService;

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn rank_route_returns_top_candidates() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/rank",
            json!({
                "candidates": reference::daily_candidates(),
                "top_n": 2,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ranked = payload["ranked"].as_array().expect("ranked list");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["name"], "Bed Assignment Delays");
    assert_eq!(ranked[1]["severity"], 64);
}

#[tokio::test]
async fn rank_route_reports_rejected_candidates() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/rank",
            json!({
                "candidates": [
                    candidate("Triage Overload", 12.0, 8.0, 20.0, 6.0),
                    candidate("Corrupted Feed", 40.0, 8.0, 20.0, 6.0),
                ],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["ranked"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["rejected"][0]["name"], "Corrupted Feed");
}

#[tokio::test]
async fn rank_route_honors_requested_range_policy() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/rank",
            json!({
                "candidates": [candidate("Overflow", 30.0, 20.0, 25.0, 15.0)],
                "range_policy": "pass-through",
            }),
        ))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["ranked"][0]["severity"], 115);
}

#[tokio::test]
async fn score_route_returns_breakdown_and_adjusted_wait() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/score",
            json!({
                "snapshot": reference::metric_snapshot(),
                "hour": 9,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["breakdown"]["resource_stress"]["total"], 16);
    assert_eq!(payload["breakdown"]["wait_time"]["base_score"], 11);
    assert_eq!(payload["breakdown"]["acuity"]["score"], 10);
    assert_eq!(payload["adjusted_wait_score"], 14);
}

#[tokio::test]
async fn score_route_maps_validation_errors_to_unprocessable() {
    let router = bottleneck_router(reference_service());
    let mut snapshot = reference::metric_snapshot();
    snapshot.acuity.counts.high = 0;
    snapshot.acuity.counts.medium = 0;
    snapshot.acuity.counts.low = 0;

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/score",
            json!({ "snapshot": snapshot }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("no patients"));
}

#[tokio::test]
async fn score_route_rejects_negative_category_weights() {
    let router = bottleneck_router(reference_service());
    let mut snapshot = reference::metric_snapshot();
    snapshot.resource.staffing.weight = 10.0;
    snapshot.resource.equipment.weight = -4.5;
    snapshot.resource.space.weight = -4.5;

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/score",
            json!({ "snapshot": snapshot }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("equipment"));
}

#[tokio::test]
async fn rank_route_rejects_zero_top_n() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/bottlenecks/rank",
            json!({
                "candidates": reference::daily_candidates(),
                "top_n": 0,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn hospital_route_rejects_zero_top_n() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(
            Request::get("/api/v1/hospitals/st-olaf/bottlenecks?start=2025-03-01&end=2025-03-07&top_n=0")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn hospital_route_builds_report_from_source() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(
            Request::get("/api/v1/hospitals/st-olaf/bottlenecks?start=2025-03-01&end=2025-03-07&top_n=3&hour=19")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["hospital_id"], "st-olaf");
    assert_eq!(payload["window"]["start"], "2025-03-01");
    assert_eq!(
        payload["summary"]["top_bottlenecks"].as_array().map(Vec::len),
        Some(3)
    );
    assert_eq!(payload["summary"]["adjusted_wait_score"], 13);
}

#[tokio::test]
async fn hospital_route_returns_not_found_for_unknown_hospital() {
    let router = bottleneck_router(reference_service());

    let response = router
        .oneshot(
            Request::get("/api/v1/hospitals/unknown/bottlenecks?start=2025-03-01&end=2025-03-01")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hospital_handler_rejects_reversed_window() {
    let query = serde_json::from_value(json!({
        "start": "2025-03-07",
        "end": "2025-03-01",
    }))
    .expect("query parses");

    let response = hospital_report_handler::<MemorySource>(
        State(reference_service()),
        Path("st-olaf".to_string()),
        Query(query),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hospital_handler_maps_unavailable_source_to_503() {
    let service = Arc::new(BottleneckService::new(
        Arc::new(UnavailableSource),
        ReportOptions::default(),
    ));
    let query = serde_json::from_value(json!({
        "start": "2025-03-01",
        "end": "2025-03-02",
    }))
    .expect("query parses");

    let response = hospital_report_handler::<UnavailableSource>(
        State(service),
        Path("st-olaf".to_string()),
        Query(query),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
