use super::domain::BottleneckCandidate;
use super::report::MetricSnapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HospitalId(pub String);

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SourceError> {
        if end < start {
            return Err(SourceError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Metrics plus the day's bottleneck candidates for one hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSnapshot {
    pub metrics: MetricSnapshot,
    pub candidates: Vec<BottleneckCandidate>,
}

/// Supplier of materialized snapshots so scoring never performs I/O itself.
pub trait SnapshotSource: Send + Sync {
    fn fetch(
        &self,
        hospital_id: &HospitalId,
        window: &TimeWindow,
    ) -> Result<HospitalSnapshot, SourceError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("no snapshot for hospital '{0}'")]
    NotFound(HospitalId),
    #[error("window end {end} precedes start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
}
