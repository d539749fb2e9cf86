//! Weighted severity aggregation and top-N ranking of bottleneck candidates.
//!
//! Each raw dimension score is normalized by its dimension maximum, weighted
//! (30/25/30/15 percent), and summed onto a 0-100 scale. Candidates whose raw
//! scores fall outside their dimension's range are handled according to the
//! configured [`RangePolicy`].

use super::domain::{
    round_half_up, BottleneckCandidate, Dimension, DimensionScores, RangeError, SeverityResult,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Treatment of raw dimension scores outside `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    /// Refuse to score the candidate.
    #[default]
    Reject,
    /// Pin each raw score into its dimension's range before weighting.
    Clamp,
    /// Weight raw scores as given; severities may leave 0..=100.
    PassThrough,
}

impl RangePolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
            Self::PassThrough => "pass-through",
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown range policy '{0}' (expected reject, clamp, or pass-through)")]
pub struct ParseRangePolicyError(pub String);

impl FromStr for RangePolicy {
    type Err = ParseRangePolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            "pass-through" | "passthrough" | "pass_through" => Ok(Self::PassThrough),
            other => Err(ParseRangePolicyError(other.to_string())),
        }
    }
}

/// Candidate excluded from a ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedCandidate {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BottleneckRanking {
    pub ranked: Vec<SeverityResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedCandidate>,
}

/// Stateless aggregator; cheap to construct per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityAggregator {
    policy: RangePolicy,
}

impl SeverityAggregator {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    pub fn score(&self, candidate: &BottleneckCandidate) -> Result<SeverityResult, RangeError> {
        let scores = self.prepare(candidate)?;

        // Weighted sum on the unit scale first, then lifted to 0-100 and rounded.
        let weighted: f64 = Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                scores.get(dimension) / f64::from(dimension.max_score()) * dimension.weight()
            })
            .sum();

        Ok(SeverityResult {
            name: candidate.name.clone(),
            scores: candidate.scores,
            severity: round_half_up(weighted * 100.0) as i32,
        })
    }

    /// Scores every candidate and returns the `top_n` most severe. Candidates
    /// failing the range check are logged and reported, never fatal.
    pub fn rank(
        &self,
        candidates: &[BottleneckCandidate],
        top_n: Option<usize>,
    ) -> BottleneckRanking {
        let mut scored = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for candidate in candidates {
            match self.score(candidate) {
                Ok(result) => scored.push(result),
                Err(err) => {
                    warn!(candidate = %candidate.name, error = %err, "skipping bottleneck candidate");
                    rejected.push(RejectedCandidate {
                        name: candidate.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let ranked = rank_results(scored, top_n);
        debug!(
            ranked = ranked.len(),
            rejected = rejected.len(),
            policy = %self.policy,
            "ranked bottleneck candidates"
        );

        BottleneckRanking { ranked, rejected }
    }

    fn prepare(&self, candidate: &BottleneckCandidate) -> Result<DimensionScores, RangeError> {
        let mut scores = candidate.scores;
        if self.policy == RangePolicy::PassThrough {
            return Ok(scores);
        }

        for dimension in Dimension::ordered() {
            let value = scores.get(dimension);
            let max = f64::from(dimension.max_score());
            let in_range = value.is_finite() && (0.0..=max).contains(&value);
            if in_range {
                continue;
            }

            match self.policy {
                RangePolicy::Clamp if !value.is_nan() => {
                    scores.set(dimension, value.clamp(0.0, max));
                }
                _ => {
                    return Err(RangeError {
                        candidate: candidate.name.clone(),
                        dimension,
                        value,
                        max: dimension.max_score(),
                    });
                }
            }
        }

        Ok(scores)
    }
}

/// Requested list lengths must be at least one.
pub fn validate_top_n(top_n: usize) -> Result<usize, ValidationError> {
    if top_n == 0 {
        Err(ValidationError::ZeroTopN)
    } else {
        Ok(top_n)
    }
}

/// Stable descending sort by severity, truncated to `top_n` when given.
pub fn rank_results(mut results: Vec<SeverityResult>, top_n: Option<usize>) -> Vec<SeverityResult> {
    results.sort_by(|a, b| b.severity.cmp(&a.severity));
    if let Some(limit) = top_n {
        results.truncate(limit);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_policy_parses_known_values() {
        assert_eq!("reject".parse::<RangePolicy>(), Ok(RangePolicy::Reject));
        assert_eq!(" Clamp ".parse::<RangePolicy>(), Ok(RangePolicy::Clamp));
        assert_eq!("pass-through".parse::<RangePolicy>(), Ok(RangePolicy::PassThrough));
        assert!("ignore".parse::<RangePolicy>().is_err());
        assert_eq!(RangePolicy::default(), RangePolicy::Reject);
    }

    #[test]
    fn clamp_policy_pins_overflowing_scores() {
        let candidate = BottleneckCandidate::new("Overflow", DimensionScores::new(30.0, 20.0, 25.0, 15.0));

        let clamped = SeverityAggregator::new(RangePolicy::Clamp)
            .score(&candidate)
            .expect("clamped");
        assert_eq!(clamped.severity, 100);
        assert_eq!(clamped.scores.resource_stress, 30.0);

        let passthrough = SeverityAggregator::new(RangePolicy::PassThrough)
            .score(&candidate)
            .expect("pass-through");
        assert_eq!(passthrough.severity, 115);
    }

    #[test]
    fn severity_rounds_the_unit_scale_sum_lifted_to_percent() {
        let aggregator = SeverityAggregator::default();
        let severity = |c: f64, a: f64| {
            aggregator
                .score(&BottleneckCandidate::new("Edge", DimensionScores::new(0.0, c, 0.0, a)))
                .expect("in range")
                .severity
        };

        // 2/20*0.25 + 11/15*0.15 lands just under 0.135 in binary floating point.
        assert_eq!(severity(2.0, 11.0), 13);
        assert_eq!(severity(2.0, 12.0), 14);
        assert_eq!(severity(2.0, 14.0), 16);
    }

    #[test]
    fn zero_top_n_is_invalid() {
        assert_eq!(validate_top_n(0), Err(ValidationError::ZeroTopN));
        assert_eq!(validate_top_n(3), Ok(3));
    }

    #[test]
    fn clamp_policy_still_rejects_nan() {
        let candidate = BottleneckCandidate::new("Broken", DimensionScores::new(f64::NAN, 1.0, 1.0, 1.0));
        let err = SeverityAggregator::new(RangePolicy::Clamp)
            .score(&candidate)
            .expect_err("nan rejected");
        assert_eq!(err.dimension, Dimension::ResourceStress);
    }
}
