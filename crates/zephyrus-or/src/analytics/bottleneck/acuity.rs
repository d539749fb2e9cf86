use super::domain::{round_half_up, Dimension, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcuityLevel {
    High,
    Medium,
    Low,
}

impl AcuityLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Acuity",
            Self::Medium => "Medium Acuity",
            Self::Low => "Low Acuity",
        }
    }

    /// Relative resource demand of one patient at this level.
    pub const fn weight(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.6,
            Self::Low => 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcuityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl AcuityCounts {
    pub fn get(&self, level: AcuityLevel) -> u32 {
        match level {
            AcuityLevel::High => self.high,
            AcuityLevel::Medium => self.medium,
            AcuityLevel::Low => self.low,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.high) + u64::from(self.medium) + u64::from(self.low)
    }
}

/// Share of patients per acuity level, as ratios in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcuityMix {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for AcuityMix {
    fn default() -> Self {
        Self {
            high: 0.25,
            medium: 0.50,
            low: 0.25,
        }
    }
}

impl AcuityMix {
    pub fn get(&self, level: AcuityLevel) -> f64 {
        match level {
            AcuityLevel::High => self.high,
            AcuityLevel::Medium => self.medium,
            AcuityLevel::Low => self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcuitySnapshot {
    pub counts: AcuityCounts,
    #[serde(default)]
    pub expected_mix: AcuityMix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcuityScore {
    pub score: u8,
    pub weighted_score: f64,
    pub mix: AcuityMix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcuityDistributionRow {
    pub level: AcuityLevel,
    pub label: &'static str,
    pub actual_pct: u32,
    pub expected_pct: u32,
    pub weight: f64,
}

impl AcuityScore {
    /// Actual vs expected mix, rounded to whole percents for display.
    pub fn distribution(&self, expected: &AcuityMix) -> Vec<AcuityDistributionRow> {
        let to_pct = |ratio: f64| round_half_up(ratio * 100.0).max(0.0) as u32;

        AcuityLevel::ordered()
            .into_iter()
            .map(|level| AcuityDistributionRow {
                level,
                label: level.label(),
                actual_pct: to_pct(self.mix.get(level)),
                expected_pct: to_pct(expected.get(level)),
                weight: level.weight(),
            })
            .collect()
    }
}

pub fn score_acuity(snapshot: &AcuitySnapshot) -> Result<AcuityScore, ValidationError> {
    let total = snapshot.counts.total();
    if total == 0 {
        return Err(ValidationError::NoPatients);
    }

    let share = |level: AcuityLevel| f64::from(snapshot.counts.get(level)) / total as f64;
    let mix = AcuityMix {
        high: share(AcuityLevel::High),
        medium: share(AcuityLevel::Medium),
        low: share(AcuityLevel::Low),
    };

    let weighted_score: f64 = AcuityLevel::ordered()
        .into_iter()
        .map(|level| mix.get(level) * level.weight())
        .sum();
    let score = round_half_up(weighted_score * f64::from(Dimension::AcuityMix.max_score())) as u8;

    Ok(AcuityScore {
        score,
        weighted_score,
        mix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(high: u32, medium: u32, low: u32) -> AcuitySnapshot {
        AcuitySnapshot {
            counts: AcuityCounts { high, medium, low },
            expected_mix: AcuityMix::default(),
        }
    }

    #[test]
    fn weighted_mix_of_forty_two_patients_scores_ten() {
        let score = score_acuity(&snapshot(15, 20, 7)).expect("valid snapshot");

        assert_eq!(score.score, 10);
        assert!((score.weighted_score - 0.6762).abs() < 1e-4);
        assert!((score.mix.high - 15.0 / 42.0).abs() < 1e-12);
    }

    #[test]
    fn all_high_acuity_hits_the_ceiling() {
        let score = score_acuity(&snapshot(9, 0, 0)).expect("valid snapshot");
        assert_eq!(score.score, 15);

        let score = score_acuity(&snapshot(0, 0, 9)).expect("valid snapshot");
        assert_eq!(score.score, 3);
    }

    #[test]
    fn empty_census_is_rejected() {
        assert_eq!(
            score_acuity(&snapshot(0, 0, 0)),
            Err(ValidationError::NoPatients)
        );
    }

    #[test]
    fn distribution_compares_against_expected_mix() {
        let score = score_acuity(&snapshot(15, 20, 7)).expect("valid snapshot");
        let rows = score.distribution(&AcuityMix::default());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "High Acuity");
        assert_eq!(rows[0].actual_pct, 36);
        assert_eq!(rows[0].expected_pct, 25);
        assert_eq!(rows[1].actual_pct, 48);
        assert_eq!(rows[2].actual_pct, 17);
    }
}
