//! Wait-time scoring against per-step benchmarks.

use super::domain::{check_multiplier, round_half_up, Dimension, ValidationError};
use serde::{Deserialize, Serialize};

/// Steps running more than 50% over benchmark are flagged as critical.
pub const CRITICAL_DEVIATION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitStep {
    pub step: String,
    pub current_minutes: f64,
    pub benchmark_minutes: f64,
}

impl WaitStep {
    pub fn new(step: impl Into<String>, current_minutes: f64, benchmark_minutes: f64) -> Self {
        Self {
            step: step.into(),
            current_minutes,
            benchmark_minutes,
        }
    }

    pub fn deviation(&self) -> f64 {
        (self.current_minutes - self.benchmark_minutes) / self.benchmark_minutes
    }
}

/// Time-of-day multipliers applied to the base wait score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakMultipliers {
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

impl Default for PeakMultipliers {
    fn default() -> Self {
        Self {
            morning: 1.3,
            afternoon: 1.5,
            evening: 1.2,
            night: 1.0,
        }
    }
}

impl PeakMultipliers {
    pub fn for_hour(&self, hour: u8) -> Result<f64, ValidationError> {
        let multiplier = match hour {
            8..=11 => self.morning,
            14..=17 => self.afternoon,
            18..=21 => self.evening,
            0..=23 => self.night,
            _ => return Err(ValidationError::InvalidHour(hour)),
        };
        Ok(multiplier)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_multiplier("morning", self.morning)?;
        check_multiplier("afternoon", self.afternoon)?;
        check_multiplier("evening", self.evening)?;
        check_multiplier("night", self.night)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitTimeSnapshot {
    pub steps: Vec<WaitStep>,
    #[serde(default)]
    pub peak_multipliers: PeakMultipliers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalDeviation {
    pub step: String,
    pub deviation_pct: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepComparison {
    pub step: String,
    pub current_minutes: f64,
    pub benchmark_minutes: f64,
    pub deviation_pct: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyWaitScore {
    pub hour: u8,
    pub label: String,
    pub multiplier: f64,
    pub adjusted_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitTimeScore {
    pub base_score: u8,
    pub avg_deviation: f64,
    pub critical_deviations: Vec<CriticalDeviation>,
}

impl WaitTimeScore {
    /// Base score scaled by the hour's multiplier. Not capped at 25.
    pub fn adjusted_score(
        &self,
        hour: u8,
        multipliers: &PeakMultipliers,
    ) -> Result<u32, ValidationError> {
        multipliers.validate()?;
        let multiplier = multipliers.for_hour(hour)?;
        Ok(round_half_up(f64::from(self.base_score) * multiplier) as u32)
    }

    pub fn hourly_profile(&self, multipliers: &PeakMultipliers) -> Vec<HourlyWaitScore> {
        (0..24u8)
            .filter_map(|hour| {
                let multiplier = multipliers.for_hour(hour).ok()?;
                Some(HourlyWaitScore {
                    hour,
                    label: format!("{hour:02}:00"),
                    multiplier,
                    adjusted_score: round_half_up(f64::from(self.base_score) * multiplier) as u32,
                })
            })
            .collect()
    }
}

fn validate(snapshot: &WaitTimeSnapshot) -> Result<(), ValidationError> {
    if snapshot.steps.is_empty() {
        return Err(ValidationError::NoWaitSteps);
    }

    for step in &snapshot.steps {
        if !step.benchmark_minutes.is_finite() || step.benchmark_minutes <= 0.0 {
            return Err(ValidationError::NonPositiveBenchmark {
                step: step.step.clone(),
                benchmark: step.benchmark_minutes,
            });
        }
        if !step.current_minutes.is_finite() || step.current_minutes < 0.0 {
            return Err(ValidationError::InvalidWaitTime {
                step: step.step.clone(),
                value: step.current_minutes,
            });
        }
    }

    snapshot.peak_multipliers.validate()
}

pub fn score_wait_time(snapshot: &WaitTimeSnapshot) -> Result<WaitTimeScore, ValidationError> {
    validate(snapshot)?;

    let mut total_deviation = 0.0;
    let mut critical_deviations = Vec::new();
    for step in &snapshot.steps {
        let deviation = step.deviation();
        total_deviation += deviation;

        if deviation > CRITICAL_DEVIATION {
            critical_deviations.push(CriticalDeviation {
                step: step.step.clone(),
                deviation_pct: round_half_up(deviation * 100.0) as i32,
            });
        }
    }

    let avg_deviation = total_deviation / snapshot.steps.len() as f64;
    let max = f64::from(Dimension::WaitTime.max_score());
    let base_score = round_half_up((1.0 - avg_deviation) * max).clamp(0.0, max) as u8;

    Ok(WaitTimeScore {
        base_score,
        avg_deviation,
        critical_deviations,
    })
}

pub fn step_comparisons(snapshot: &WaitTimeSnapshot) -> Result<Vec<StepComparison>, ValidationError> {
    validate(snapshot)?;

    Ok(snapshot
        .steps
        .iter()
        .map(|step| StepComparison {
            step: step.step.clone(),
            current_minutes: step.current_minutes,
            benchmark_minutes: step.benchmark_minutes,
            deviation_pct: round_half_up(step.deviation() * 100.0) as i32,
        })
        .collect())
}
