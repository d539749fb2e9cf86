use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::analytics::bottleneck::domain::{BottleneckCandidate, DimensionScores, SeverityResult};
use crate::analytics::bottleneck::reference;
use crate::analytics::bottleneck::report::ReportOptions;
use crate::analytics::bottleneck::service::BottleneckService;
use crate::analytics::bottleneck::source::{
    HospitalId, HospitalSnapshot, SnapshotSource, SourceError, TimeWindow,
};

pub(super) fn candidate(
    name: &str,
    resource_stress: f64,
    cascade: f64,
    wait_time: f64,
    acuity: f64,
) -> BottleneckCandidate {
    BottleneckCandidate::new(
        name,
        DimensionScores::new(resource_stress, cascade, wait_time, acuity),
    )
}

pub(super) fn scored(name: &str, severity: i32) -> SeverityResult {
    SeverityResult {
        name: name.to_string(),
        scores: DimensionScores::default(),
        severity,
    }
}

pub(super) fn reference_snapshot() -> HospitalSnapshot {
    HospitalSnapshot {
        metrics: reference::metric_snapshot(),
        candidates: reference::daily_candidates(),
    }
}

#[derive(Default)]
pub(super) struct MemorySource {
    snapshots: HashMap<HospitalId, HospitalSnapshot>,
}

impl MemorySource {
    pub(super) fn with(mut self, hospital: &str, snapshot: HospitalSnapshot) -> Self {
        self.snapshots
            .insert(HospitalId(hospital.to_string()), snapshot);
        self
    }
}

impl SnapshotSource for MemorySource {
    fn fetch(
        &self,
        hospital_id: &HospitalId,
        _window: &TimeWindow,
    ) -> Result<HospitalSnapshot, SourceError> {
        self.snapshots
            .get(hospital_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(hospital_id.clone()))
    }
}

pub(super) struct UnavailableSource;

impl SnapshotSource for UnavailableSource {
    fn fetch(
        &self,
        _hospital_id: &HospitalId,
        _window: &TimeWindow,
    ) -> Result<HospitalSnapshot, SourceError> {
        Err(SourceError::Unavailable("metrics warehouse offline".to_string()))
    }
}

pub(super) fn reference_service() -> Arc<BottleneckService<MemorySource>> {
    let source = MemorySource::default().with("st-olaf", reference_snapshot());
    Arc::new(BottleneckService::new(
        Arc::new(source),
        ReportOptions::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
