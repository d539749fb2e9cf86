//! Cascade impact scoring for processes downstream of a primary bottleneck.

use super::domain::{round_half_up, Dimension, ValidationError};
use serde::{Deserialize, Serialize};

/// Time impacts beyond this many minutes add no further score.
pub const TIME_IMPACT_CAP_MINUTES: f64 = 60.0;

const SUB_SCORE_MAX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    Critical,
    Operational,
    Clinical,
    Support,
}

impl ProcessType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Critical,
            Self::Operational,
            Self::Clinical,
            Self::Support,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Operational => "Operational",
            Self::Clinical => "Clinical",
            Self::Support => "Support",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedProcess {
    pub name: String,
    pub severity: f64,
    pub time_impact_minutes: f64,
    pub resource_impact: f64,
    pub affected_volume_pct: f64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub process_type: ProcessType,
}

impl AffectedProcess {
    fn validate(&self) -> Result<(), ValidationError> {
        let checks = [
            ("severity", self.severity, 1.0),
            ("resource impact", self.resource_impact, 1.0),
            ("affected volume", self.affected_volume_pct, 100.0),
            ("time impact", self.time_impact_minutes, f64::INFINITY),
        ];

        for (field, value, max) in checks {
            if value.is_nan() || value < 0.0 || value > max {
                return Err(ValidationError::ImpactOutOfRange {
                    process: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }

    fn sub_scores(&self) -> ProcessImpactScore {
        let scale = |ratio: f64| round_half_up(ratio * SUB_SCORE_MAX) as u8;
        let severity_score = scale(self.severity);
        let volume_score = scale(self.affected_volume_pct / 100.0);
        let resource_score = scale(self.resource_impact);
        let time_score =
            scale(self.time_impact_minutes.min(TIME_IMPACT_CAP_MINUTES) / TIME_IMPACT_CAP_MINUTES);
        let average = f64::from(severity_score + volume_score + resource_score + time_score) / 4.0;

        ProcessImpactScore {
            name: self.name.clone(),
            severity_score,
            volume_score,
            resource_score,
            time_score,
            average,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeSnapshot {
    pub primary_process: String,
    pub affected_processes: Vec<AffectedProcess>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessImpactScore {
    pub name: String,
    pub severity_score: u8,
    pub volume_score: u8,
    pub resource_score: u8,
    pub time_score: u8,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeScore {
    pub primary_process: String,
    pub total: u8,
    pub process_scores: Vec<ProcessImpactScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessTypeShare {
    pub process_type: ProcessType,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Sums the per-process averages (not a mean of them), so every additional
/// affected process raises the total until the 20-point cap.
pub fn score_cascade(snapshot: &CascadeSnapshot) -> Result<CascadeScore, ValidationError> {
    for process in &snapshot.affected_processes {
        process.validate()?;
    }

    let process_scores: Vec<ProcessImpactScore> = snapshot
        .affected_processes
        .iter()
        .map(AffectedProcess::sub_scores)
        .collect();

    let sum: f64 = process_scores.iter().map(|score| score.average).sum();
    let max = f64::from(Dimension::CascadeImpact.max_score());
    let total = round_half_up(sum).min(max) as u8;

    Ok(CascadeScore {
        primary_process: snapshot.primary_process.clone(),
        total,
        process_scores,
    })
}

pub fn process_type_breakdown(snapshot: &CascadeSnapshot) -> Vec<ProcessTypeShare> {
    let total = snapshot.affected_processes.len();

    ProcessType::ordered()
        .into_iter()
        .map(|process_type| {
            let count = snapshot
                .affected_processes
                .iter()
                .filter(|process| process.process_type == process_type)
                .count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };

            ProcessTypeShare {
                process_type,
                label: process_type.label(),
                count,
                percentage,
            }
        })
        .collect()
}
