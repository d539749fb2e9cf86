use serde::{Deserialize, Serialize};

/// Scoring dimension contributing to a bottleneck's severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ResourceStress,
    CascadeImpact,
    WaitTime,
    AcuityMix,
}

impl Dimension {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ResourceStress,
            Self::CascadeImpact,
            Self::WaitTime,
            Self::AcuityMix,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ResourceStress => "Resource Stress",
            Self::CascadeImpact => "Cascade Impact",
            Self::WaitTime => "Wait Time",
            Self::AcuityMix => "Acuity Mix",
        }
    }

    /// Upper bound of the raw score produced by the dimension's scorer.
    pub const fn max_score(self) -> u8 {
        match self {
            Self::ResourceStress => 20,
            Self::CascadeImpact => 20,
            Self::WaitTime => 25,
            Self::AcuityMix => 15,
        }
    }

    /// Share of the severity score, in percent. The four shares sum to 100.
    pub const fn weight_pct(self) -> u8 {
        match self {
            Self::ResourceStress => 30,
            Self::CascadeImpact => 25,
            Self::WaitTime => 30,
            Self::AcuityMix => 15,
        }
    }

    pub fn weight(self) -> f64 {
        f64::from(self.weight_pct()) / 100.0
    }
}

/// Raw per-dimension scores for one bottleneck candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub resource_stress: f64,
    pub cascade: f64,
    pub wait_time: f64,
    pub acuity: f64,
}

impl DimensionScores {
    pub fn new(resource_stress: f64, cascade: f64, wait_time: f64, acuity: f64) -> Self {
        Self {
            resource_stress,
            cascade,
            wait_time,
            acuity,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ResourceStress => self.resource_stress,
            Dimension::CascadeImpact => self.cascade,
            Dimension::WaitTime => self.wait_time,
            Dimension::AcuityMix => self.acuity,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::ResourceStress => self.resource_stress = value,
            Dimension::CascadeImpact => self.cascade = value,
            Dimension::WaitTime => self.wait_time = value,
            Dimension::AcuityMix => self.acuity = value,
        }
    }
}

/// Named operational issue being scored for relative severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckCandidate {
    pub name: String,
    #[serde(flatten)]
    pub scores: DimensionScores,
}

impl BottleneckCandidate {
    pub fn new(name: impl Into<String>, scores: DimensionScores) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }
}

/// Candidate paired with its composite 0-100 severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    pub name: String,
    #[serde(flatten)]
    pub scores: DimensionScores,
    pub severity: i32,
}

/// Scoring input rejected before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("resource category '{0}' has no resources")]
    EmptyCategory(&'static str),
    #[error("resource category weights sum to {sum:.3}, expected 1.0")]
    CategoryWeights { sum: f64 },
    #[error("resource category '{category}' has invalid weight {value}")]
    InvalidCategoryWeight { category: &'static str, value: f64 },
    #[error("resource '{resource}' has invalid utilization {value}")]
    InvalidUtilization { resource: String, value: f64 },
    #[error("affected process '{process}' has {field} {value} outside its allowed range")]
    ImpactOutOfRange {
        process: String,
        field: &'static str,
        value: f64,
    },
    #[error("wait-time snapshot has no process steps")]
    NoWaitSteps,
    #[error("process step '{step}' has non-positive benchmark {benchmark}")]
    NonPositiveBenchmark { step: String, benchmark: f64 },
    #[error("process step '{step}' has invalid current wait {value}")]
    InvalidWaitTime { step: String, value: f64 },
    #[error("acuity snapshot has no patients")]
    NoPatients,
    #[error("hour {0} is outside 0-23")]
    InvalidHour(u8),
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("{field} multiplier {value} must be finite and non-negative")]
    InvalidMultiplier { field: &'static str, value: f64 },
}

/// Raw dimension score outside `[0, max]` for its dimension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("candidate '{candidate}' has {} score {value} outside 0..={max}", .dimension.label())]
pub struct RangeError {
    pub candidate: String,
    pub dimension: Dimension,
    pub value: f64,
    pub max: u8,
}

pub(crate) fn check_multiplier(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidMultiplier { field, value })
    }
}

/// Half-up rounding: `.5` always moves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_percentages_sum_to_exactly_one_hundred() {
        let total: u32 = Dimension::ordered()
            .into_iter()
            .map(|dimension| u32::from(dimension.weight_pct()))
            .sum();
        assert_eq!(total, 100);

        let float_total: f64 = Dimension::ordered()
            .into_iter()
            .map(Dimension::weight)
            .sum();
        assert!((float_total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn round_half_up_matches_dashboard_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(10.14), 10.0);
        assert_eq!(round_half_up(-0.4), 0.0);
    }

    #[test]
    fn candidate_json_flattens_scores() {
        let candidate = BottleneckCandidate::new(
            "Triage Overload",
            DimensionScores::new(12.0, 8.0, 20.0, 6.0),
        );
        let value = serde_json::to_value(&candidate).expect("serializes");
        assert_eq!(value["name"], "Triage Overload");
        assert_eq!(value["wait_time"], 20.0);

        let parsed: BottleneckCandidate = serde_json::from_value(value).expect("round trips");
        assert_eq!(parsed, candidate);
    }
}
