use super::acuity::{score_acuity, AcuityDistributionRow, AcuityScore, AcuitySnapshot};
use super::cascade::{
    process_type_breakdown, score_cascade, CascadeScore, CascadeSnapshot, ProcessTypeShare,
};
use super::domain::{BottleneckCandidate, Dimension, DimensionScores, ValidationError};
use super::resource::{
    score_resource_stress, utilization_rows, HourlyStress, ResourceSnapshot, ResourceStressScore,
    UtilizationRow,
};
use super::severity::{BottleneckRanking, RangePolicy, RejectedCandidate, SeverityAggregator};
use super::wait_time::{
    score_wait_time, step_comparisons, CriticalDeviation, HourlyWaitScore, StepComparison,
    WaitTimeScore, WaitTimeSnapshot,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 5;

/// Operational metrics for one hospital and time window, one per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub resource: ResourceSnapshot,
    pub cascade: CascadeSnapshot,
    pub wait_time: WaitTimeSnapshot,
    pub acuity: AcuitySnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub resource_stress: ResourceStressScore,
    pub cascade: CascadeScore,
    pub wait_time: WaitTimeScore,
    pub acuity: AcuityScore,
}

impl DimensionBreakdown {
    pub fn raw_scores(&self) -> DimensionScores {
        DimensionScores::new(
            f64::from(self.resource_stress.total),
            f64::from(self.cascade.total),
            f64::from(self.wait_time.base_score),
            f64::from(self.acuity.score),
        )
    }

    /// Candidate carrying this breakdown's four totals.
    pub fn as_candidate(&self, name: impl Into<String>) -> BottleneckCandidate {
        BottleneckCandidate::new(name, self.raw_scores())
    }
}

/// Runs all four dimension scorers; fails on the first invalid snapshot.
pub fn score_snapshot(snapshot: &MetricSnapshot) -> Result<DimensionBreakdown, ValidationError> {
    Ok(DimensionBreakdown {
        resource_stress: score_resource_stress(&snapshot.resource)?,
        cascade: score_cascade(&snapshot.cascade)?,
        wait_time: score_wait_time(&snapshot.wait_time)?,
        acuity: score_acuity(&snapshot.acuity)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub top_n: usize,
    pub range_policy: RangePolicy,
    /// Hour of day for the time-adjusted wait score, if any.
    pub hour: Option<u8>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            range_policy: RangePolicy::default(),
            hour: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BottleneckReport {
    pub snapshot: MetricSnapshot,
    pub breakdown: DimensionBreakdown,
    pub ranking: BottleneckRanking,
    pub adjusted_wait_score: Option<u32>,
    pub options: ReportOptions,
}

impl BottleneckReport {
    pub fn build(
        snapshot: MetricSnapshot,
        candidates: &[BottleneckCandidate],
        options: ReportOptions,
    ) -> Result<Self, ValidationError> {
        let breakdown = score_snapshot(&snapshot)?;
        let adjusted_wait_score = options
            .hour
            .map(|hour| {
                breakdown
                    .wait_time
                    .adjusted_score(hour, &snapshot.wait_time.peak_multipliers)
            })
            .transpose()?;

        let ranking =
            SeverityAggregator::new(options.range_policy).rank(candidates, Some(options.top_n));

        debug!(
            candidates = candidates.len(),
            top_n = options.top_n,
            "built bottleneck report"
        );

        Ok(Self {
            snapshot,
            breakdown,
            ranking,
            adjusted_wait_score,
            options,
        })
    }

    pub fn summary(&self) -> BottleneckReportSummary {
        let breakdown = &self.breakdown;
        let raw = breakdown.raw_scores();
        let dimensions = Dimension::ordered()
            .into_iter()
            .map(|dimension| DimensionEntry {
                dimension,
                label: dimension.label(),
                score: raw.get(dimension),
                max_score: dimension.max_score(),
                weight_pct: dimension.weight_pct(),
            })
            .collect();

        let top_bottlenecks = self
            .ranking
            .ranked
            .iter()
            .enumerate()
            .map(|(idx, result)| RankedBottleneckView {
                rank: idx + 1,
                name: result.name.clone(),
                resource_stress: result.scores.resource_stress,
                cascade: result.scores.cascade,
                wait_time: result.scores.wait_time,
                acuity: result.scores.acuity,
                severity: result.severity,
            })
            .collect();

        BottleneckReportSummary {
            dimensions,
            top_bottlenecks,
            rejected: self.ranking.rejected.clone(),
            critical_deviations: breakdown.wait_time.critical_deviations.clone(),
            adjusted_wait_score: self.adjusted_wait_score,
        }
    }

    pub fn utilization_rows(&self) -> Vec<UtilizationRow> {
        utilization_rows(&self.snapshot.resource)
    }

    pub fn hourly_stress(&self) -> Vec<HourlyStress> {
        self.breakdown
            .resource_stress
            .hourly_profile(&self.snapshot.resource.hourly_pattern)
    }

    pub fn process_types(&self) -> Vec<ProcessTypeShare> {
        process_type_breakdown(&self.snapshot.cascade)
    }

    pub fn step_comparisons(&self) -> Vec<StepComparison> {
        // The snapshot already passed validation in `build`.
        step_comparisons(&self.snapshot.wait_time).unwrap_or_default()
    }

    pub fn hourly_wait(&self) -> Vec<HourlyWaitScore> {
        self.breakdown
            .wait_time
            .hourly_profile(&self.snapshot.wait_time.peak_multipliers)
    }

    pub fn acuity_distribution(&self) -> Vec<AcuityDistributionRow> {
        self.breakdown
            .acuity
            .distribution(&self.snapshot.acuity.expected_mix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionEntry {
    pub dimension: Dimension,
    pub label: &'static str,
    pub score: f64,
    pub max_score: u8,
    pub weight_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBottleneckView {
    pub rank: usize,
    pub name: String,
    pub resource_stress: f64,
    pub cascade: f64,
    pub wait_time: f64,
    pub acuity: f64,
    pub severity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckReportSummary {
    pub dimensions: Vec<DimensionEntry>,
    pub top_bottlenecks: Vec<RankedBottleneckView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedCandidate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical_deviations: Vec<CriticalDeviation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_wait_score: Option<u32>,
}
