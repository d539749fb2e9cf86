use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{BottleneckCandidate, ValidationError};
use super::report::{
    score_snapshot, BottleneckReport, BottleneckReportSummary, DimensionBreakdown, MetricSnapshot,
    ReportOptions,
};
use super::severity::{validate_top_n, BottleneckRanking, RangePolicy, SeverityAggregator};
use super::source::{HospitalId, SnapshotSource, SourceError, TimeWindow};

#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub candidates: Vec<BottleneckCandidate>,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub range_policy: Option<RangePolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub snapshot: MetricSnapshot,
    #[serde(default)]
    pub hour: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResponse {
    pub breakdown: DimensionBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_wait_score: Option<u32>,
}

/// Per-request overrides for a hospital report.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReportOverrides {
    pub top_n: Option<usize>,
    pub hour: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalReport {
    pub hospital_id: HospitalId,
    pub window: TimeWindow,
    pub breakdown: DimensionBreakdown,
    pub summary: BottleneckReportSummary,
}

#[derive(Debug, thiserror::Error)]
pub enum BottleneckServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Service composing the snapshot source with the scoring defaults.
pub struct BottleneckService<S> {
    source: Arc<S>,
    defaults: ReportOptions,
}

impl<S> BottleneckService<S>
where
    S: SnapshotSource + 'static,
{
    pub fn new(source: Arc<S>, defaults: ReportOptions) -> Self {
        Self { source, defaults }
    }

    pub fn defaults(&self) -> ReportOptions {
        self.defaults
    }

    pub fn rank(&self, request: &RankRequest) -> Result<BottleneckRanking, BottleneckServiceError> {
        let policy = request.range_policy.unwrap_or(self.defaults.range_policy);
        let top_n = validate_top_n(request.top_n.unwrap_or(self.defaults.top_n))?;
        Ok(SeverityAggregator::new(policy).rank(&request.candidates, Some(top_n)))
    }

    pub fn score(&self, request: &ScoreRequest) -> Result<ScoreResponse, BottleneckServiceError> {
        let breakdown = score_snapshot(&request.snapshot)?;
        let adjusted_wait_score = request
            .hour
            .map(|hour| {
                breakdown
                    .wait_time
                    .adjusted_score(hour, &request.snapshot.wait_time.peak_multipliers)
            })
            .transpose()?;

        Ok(ScoreResponse {
            breakdown,
            adjusted_wait_score,
        })
    }

    /// Fetches the hospital's snapshot for the window and builds its report.
    pub fn hospital_report(
        &self,
        hospital_id: &HospitalId,
        window: &TimeWindow,
        overrides: ReportOverrides,
    ) -> Result<HospitalReport, BottleneckServiceError> {
        let top_n = validate_top_n(overrides.top_n.unwrap_or(self.defaults.top_n))?;
        let snapshot = self.source.fetch(hospital_id, window).map_err(|err| {
            warn!(hospital = %hospital_id, error = %err, "snapshot fetch failed");
            err
        })?;

        let options = ReportOptions {
            top_n,
            hour: overrides.hour.or(self.defaults.hour),
            ..self.defaults
        };
        let report = BottleneckReport::build(snapshot.metrics, &snapshot.candidates, options)?;

        info!(
            hospital = %hospital_id,
            start = %window.start,
            end = %window.end,
            ranked = report.ranking.ranked.len(),
            "built hospital bottleneck report"
        );

        Ok(HospitalReport {
            hospital_id: hospital_id.clone(),
            window: *window,
            summary: report.summary(),
            breakdown: report.breakdown,
        })
    }
}
