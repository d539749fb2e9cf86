//! Deterministic mock data for demos and tests. Equal seeds yield equal data.

use super::domain::{BottleneckCandidate, Dimension, DimensionScores};
use super::reference;
use super::report::MetricSnapshot;
use super::resource::ResourceCategory;
use serde::Serialize;
use std::f64::consts::PI;

const TREND_PERIOD_WEEKS: f64 = 12.0;
const SEASONAL_AMPLITUDE: f64 = 0.05;
const JITTER_SPAN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationTrendPoint {
    pub week: String,
    pub week_offset: u32,
    pub staffing: f64,
    pub equipment: f64,
    pub space: f64,
}

/// Source of mock dashboard data.
pub trait FixtureBuilder {
    /// Weekly utilization averages, oldest week first.
    fn utilization_trend(&mut self, weeks: u32) -> Vec<UtilizationTrendPoint>;
    /// One candidate per name with whole-number raw scores inside each dimension's range.
    fn candidates(&mut self, names: &[&str]) -> Vec<BottleneckCandidate>;
    /// Reference snapshot with every metric perturbed but still valid.
    fn metric_snapshot(&mut self) -> MetricSnapshot;
}

/// SplitMix64 stream; small, fast, and fully determined by its seed.
#[derive(Debug, Clone)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

#[derive(Debug, Clone)]
pub struct SeededFixtures {
    rng: SplitMix64,
}

impl SeededFixtures {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
        }
    }

    fn weekly_average(&mut self, category: ResourceCategory, week_offset: u32) -> f64 {
        let base = match category {
            ResourceCategory::Staffing => 0.85,
            ResourceCategory::Equipment => 0.80,
            ResourceCategory::Space => 0.90,
        };
        let seasonal = (f64::from(week_offset) / TREND_PERIOD_WEEKS * PI).sin() * SEASONAL_AMPLITUDE;
        let jitter = (self.rng.next_f64() - 0.5) * JITTER_SPAN;
        (base + seasonal + jitter).clamp(0.5, 1.0)
    }

    fn jitter(&mut self, value: f64, spread: f64, low: f64, high: f64) -> f64 {
        (value + self.rng.range(-spread, spread)).clamp(low, high)
    }
}

impl FixtureBuilder for SeededFixtures {
    fn utilization_trend(&mut self, weeks: u32) -> Vec<UtilizationTrendPoint> {
        (0..weeks)
            .rev()
            .map(|week_offset| UtilizationTrendPoint {
                week: format!("Week {}", weeks - week_offset),
                week_offset,
                staffing: self.weekly_average(ResourceCategory::Staffing, week_offset),
                equipment: self.weekly_average(ResourceCategory::Equipment, week_offset),
                space: self.weekly_average(ResourceCategory::Space, week_offset),
            })
            .collect()
    }

    fn candidates(&mut self, names: &[&str]) -> Vec<BottleneckCandidate> {
        names
            .iter()
            .map(|name| {
                let mut scores = DimensionScores::default();
                for dimension in Dimension::ordered() {
                    let max = u64::from(dimension.max_score());
                    let value = self.rng.next_u64() % (max + 1);
                    scores.set(dimension, value as f64);
                }
                BottleneckCandidate::new(*name, scores)
            })
            .collect()
    }

    fn metric_snapshot(&mut self) -> MetricSnapshot {
        let mut snapshot = reference::metric_snapshot();

        for category in [
            &mut snapshot.resource.staffing,
            &mut snapshot.resource.equipment,
            &mut snapshot.resource.space,
        ] {
            for resource in &mut category.resources {
                resource.utilization = self.jitter(resource.utilization, 0.08, 0.3, 1.0);
            }
        }

        for process in &mut snapshot.cascade.affected_processes {
            process.severity = self.jitter(process.severity, 0.2, 0.0, 1.0);
            process.resource_impact = self.jitter(process.resource_impact, 0.2, 0.0, 1.0);
            process.affected_volume_pct = self.jitter(process.affected_volume_pct, 15.0, 0.0, 100.0);
            process.time_impact_minutes = self.jitter(process.time_impact_minutes, 20.0, 0.0, 120.0);
        }

        for step in &mut snapshot.wait_time.steps {
            step.current_minutes =
                (step.benchmark_minutes * self.rng.range(0.8, 2.0)).round().max(1.0);
        }

        let counts = &mut snapshot.acuity.counts;
        counts.high = 1 + (self.rng.next_u64() % 30) as u32;
        counts.medium = (self.rng.next_u64() % 40) as u32;
        counts.low = (self.rng.next_u64() % 20) as u32;

        snapshot
    }
}
