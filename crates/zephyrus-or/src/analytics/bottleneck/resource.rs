//! Resource stress scoring across staffing, equipment, and space.
//!
//! Each category's average utilization is placed into a threshold band
//! (critical, high, medium) that scales a perfect score of 1.0 down; the
//! category factors are then weighted and mapped onto 0..=20 points.

use super::domain::{check_multiplier, round_half_up, Dimension, ValidationError};
use serde::{Deserialize, Serialize};

const CATEGORY_WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Staffing,
    Equipment,
    Space,
}

impl ResourceCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Staffing, Self::Equipment, Self::Space]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Staffing => "Staff",
            Self::Equipment => "Equipment",
            Self::Space => "Space",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Staffing => "staffing",
            Self::Equipment => "equipment",
            Self::Space => "space",
        }
    }
}

/// Utilization cut-offs, checked from the most severe band down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl UtilizationThresholds {
    pub fn band(&self, utilization: f64) -> UtilizationBand {
        if utilization >= self.critical {
            UtilizationBand::Critical
        } else if utilization >= self.high {
            UtilizationBand::High
        } else if utilization >= self.medium {
            UtilizationBand::Medium
        } else {
            UtilizationBand::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    Critical,
    High,
    Medium,
    Normal,
}

impl UtilizationBand {
    pub const fn penalty(self) -> f64 {
        match self {
            Self::Critical => 0.6,
            Self::High => 0.8,
            Self::Medium => 0.9,
            Self::Normal => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Normal => "Normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub name: String,
    pub utilization: f64,
}

impl ResourceUtilization {
    pub fn new(name: impl Into<String>, utilization: f64) -> Self {
        Self {
            name: name.into(),
            utilization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCategorySnapshot {
    pub resources: Vec<ResourceUtilization>,
    pub weight: f64,
    pub thresholds: UtilizationThresholds,
}

impl ResourceCategorySnapshot {
    fn average_utilization(&self) -> f64 {
        let total: f64 = self
            .resources
            .iter()
            .map(|resource| resource.utilization)
            .sum();
        total / self.resources.len() as f64
    }
}

/// Hour-of-day load pattern used for the 24-hour stress chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyLoadPattern {
    pub peak_start: u8,
    pub peak_end: u8,
    pub peak_multiplier: f64,
    pub low_start: u8,
    pub low_end: u8,
    pub low_multiplier: f64,
    pub normal_multiplier: f64,
}

impl Default for HourlyLoadPattern {
    fn default() -> Self {
        Self {
            peak_start: 10,
            peak_end: 18,
            peak_multiplier: 1.2,
            low_start: 2,
            low_end: 6,
            low_multiplier: 0.8,
            normal_multiplier: 1.0,
        }
    }
}

impl HourlyLoadPattern {
    pub fn multiplier_for(&self, hour: u8) -> f64 {
        if (self.peak_start..=self.peak_end).contains(&hour) {
            self.peak_multiplier
        } else if (self.low_start..=self.low_end).contains(&hour) {
            self.low_multiplier
        } else {
            self.normal_multiplier
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_multiplier("peak", self.peak_multiplier)?;
        check_multiplier("low", self.low_multiplier)?;
        check_multiplier("normal", self.normal_multiplier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub staffing: ResourceCategorySnapshot,
    pub equipment: ResourceCategorySnapshot,
    pub space: ResourceCategorySnapshot,
    #[serde(default)]
    pub hourly_pattern: HourlyLoadPattern,
}

impl ResourceSnapshot {
    pub fn category(&self, category: ResourceCategory) -> &ResourceCategorySnapshot {
        match category {
            ResourceCategory::Staffing => &self.staffing,
            ResourceCategory::Equipment => &self.equipment,
            ResourceCategory::Space => &self.space,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut weight_sum = 0.0;
        for category in ResourceCategory::ordered() {
            let snapshot = self.category(category);
            if snapshot.resources.is_empty() {
                return Err(ValidationError::EmptyCategory(category.key()));
            }
            if let Some(resource) = snapshot
                .resources
                .iter()
                .find(|resource| !resource.utilization.is_finite() || resource.utilization < 0.0)
            {
                return Err(ValidationError::InvalidUtilization {
                    resource: resource.name.clone(),
                    value: resource.utilization,
                });
            }
            if !snapshot.weight.is_finite() || snapshot.weight < 0.0 {
                return Err(ValidationError::InvalidCategoryWeight {
                    category: category.key(),
                    value: snapshot.weight,
                });
            }
            weight_sum += snapshot.weight;
        }

        if (weight_sum - 1.0).abs() > CATEGORY_WEIGHT_TOLERANCE {
            return Err(ValidationError::CategoryWeights { sum: weight_sum });
        }

        self.hourly_pattern.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStress {
    pub category: ResourceCategory,
    pub category_label: &'static str,
    pub average_utilization: f64,
    pub band: UtilizationBand,
    pub factor: f64,
    pub component_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceStressScore {
    pub total: u8,
    pub components: Vec<CategoryStress>,
}

impl ResourceStressScore {
    /// Stress score for every hour of the day under the snapshot's load pattern.
    pub fn hourly_profile(&self, pattern: &HourlyLoadPattern) -> Vec<HourlyStress> {
        (0..24u8)
            .map(|hour| {
                let multiplier = pattern.multiplier_for(hour);
                HourlyStress {
                    hour,
                    label: format!("{hour:02}:00"),
                    multiplier,
                    stress_score: round_half_up(f64::from(self.total) * multiplier) as u32,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStress {
    pub hour: u8,
    pub label: String,
    pub multiplier: f64,
    pub stress_score: u32,
}

/// One chart row per individual resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationRow {
    pub resource: String,
    pub category: ResourceCategory,
    pub category_label: &'static str,
    pub utilization_pct: u32,
    pub high_threshold_pct: u32,
    pub critical_threshold_pct: u32,
    pub band: UtilizationBand,
}

pub fn score_resource_stress(
    snapshot: &ResourceSnapshot,
) -> Result<ResourceStressScore, ValidationError> {
    snapshot.validate()?;

    let max = f64::from(Dimension::ResourceStress.max_score());
    let mut weighted = 0.0;
    let components = ResourceCategory::ordered()
        .into_iter()
        .map(|category| {
            let data = snapshot.category(category);
            let average_utilization = data.average_utilization();
            let band = data.thresholds.band(average_utilization);
            let factor = band.penalty();
            weighted += factor * data.weight;

            CategoryStress {
                category,
                category_label: category.label(),
                average_utilization,
                band,
                factor,
                component_score: round_half_up(factor * max) as u8,
            }
        })
        .collect();

    Ok(ResourceStressScore {
        total: round_half_up(weighted * max) as u8,
        components,
    })
}

pub fn utilization_rows(snapshot: &ResourceSnapshot) -> Vec<UtilizationRow> {
    let to_pct = |ratio: f64| round_half_up(ratio * 100.0).max(0.0) as u32;

    ResourceCategory::ordered()
        .into_iter()
        .flat_map(|category| {
            let data = snapshot.category(category);
            data.resources.iter().map(move |resource| UtilizationRow {
                resource: resource.name.clone(),
                category,
                category_label: category.label(),
                utilization_pct: to_pct(resource.utilization),
                high_threshold_pct: to_pct(data.thresholds.high),
                critical_threshold_pct: to_pct(data.thresholds.critical),
                band: data.thresholds.band(resource.utilization),
            })
        })
        .collect()
}
