//! Bottleneck severity scoring for emergency-department patient flow.
//!
//! Four dimension scorers (resource stress, cascade impact, wait time, acuity
//! mix) turn a materialized [`MetricSnapshot`] into bounded raw scores. The
//! [`SeverityAggregator`] weights raw scores into a 0-100 severity and ranks
//! candidates. Scoring is pure; snapshots come from a [`SnapshotSource`].

pub mod acuity;
pub mod cascade;
pub mod domain;
pub mod fixtures;
pub mod import;
pub mod reference;
pub mod report;
pub mod resource;
pub mod router;
pub mod service;
pub mod severity;
pub mod source;
pub mod views;
pub mod wait_time;

#[cfg(test)]
mod tests;

pub use acuity::{score_acuity, AcuityCounts, AcuityLevel, AcuityMix, AcuityScore, AcuitySnapshot};
pub use cascade::{score_cascade, AffectedProcess, CascadeScore, CascadeSnapshot, ProcessType};
pub use domain::{
    round_half_up, BottleneckCandidate, Dimension, DimensionScores, RangeError, SeverityResult,
    ValidationError,
};
pub use fixtures::{FixtureBuilder, SeededFixtures, UtilizationTrendPoint};
pub use import::{CandidateImportError, CandidateImporter};
pub use report::{
    score_snapshot, BottleneckReport, BottleneckReportSummary, DimensionBreakdown, MetricSnapshot,
    ReportOptions, DEFAULT_TOP_N,
};
pub use resource::{
    score_resource_stress, ResourceCategory, ResourceSnapshot, ResourceStressScore,
    UtilizationBand,
};
pub use router::bottleneck_router;
pub use service::{
    BottleneckService, BottleneckServiceError, HospitalReport, RankRequest, ReportOverrides,
    ScoreRequest, ScoreResponse,
};
pub use severity::{
    rank_results, validate_top_n, BottleneckRanking, RangePolicy, RejectedCandidate,
    SeverityAggregator,
};
pub use source::{HospitalId, HospitalSnapshot, SnapshotSource, SourceError, TimeWindow};
pub use views::{BottleneckView, ViewState};
pub use wait_time::{score_wait_time, CriticalDeviation, WaitStep, WaitTimeScore, WaitTimeSnapshot};
