use super::domain::{BottleneckCandidate, DimensionScores};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// 1-based data row (header excluded) whose name cell was blank.
    MissingName { row: usize },
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            CandidateImportError::MissingName { row } => {
                write!(f, "candidate row {} has no name", row)
            }
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
            CandidateImportError::MissingName { .. } => None,
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Resource Stress")]
    resource_stress: f64,
    #[serde(rename = "Cascade")]
    cascade: f64,
    #[serde(rename = "Wait Time")]
    wait_time: f64,
    #[serde(rename = "Acuity")]
    acuity: f64,
}

/// Reads bottleneck candidates exported from the daily huddle sheet.
///
/// Scores are taken as written; range handling belongs to the aggregator.
pub struct CandidateImporter;

impl CandidateImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<BottleneckCandidate>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<BottleneckCandidate>, CandidateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut candidates = Vec::new();

        for (idx, record) in csv_reader.deserialize::<CandidateRow>().enumerate() {
            let row = record?;
            if row.name.is_empty() {
                return Err(CandidateImportError::MissingName { row: idx + 1 });
            }

            candidates.push(BottleneckCandidate::new(
                row.name,
                DimensionScores::new(row.resource_stress, row.cascade, row.wait_time, row.acuity),
            ));
        }

        debug!(count = candidates.len(), "imported bottleneck candidates");
        Ok(candidates)
    }
}
