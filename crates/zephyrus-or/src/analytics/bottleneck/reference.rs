//! Hand-authored emergency-department dataset shown on the bottleneck
//! dashboard when no live metrics are connected.

use super::acuity::{AcuityCounts, AcuityMix, AcuitySnapshot};
use super::cascade::{AffectedProcess, CascadeSnapshot, ProcessType};
use super::domain::{BottleneckCandidate, DimensionScores};
use super::report::MetricSnapshot;
use super::resource::{
    HourlyLoadPattern, ResourceCategorySnapshot, ResourceSnapshot, ResourceUtilization,
    UtilizationThresholds,
};
use super::wait_time::{PeakMultipliers, WaitStep, WaitTimeSnapshot};

fn category(
    resources: &[(&str, f64)],
    weight: f64,
    critical: f64,
    high: f64,
    medium: f64,
) -> ResourceCategorySnapshot {
    ResourceCategorySnapshot {
        resources: resources
            .iter()
            .map(|(name, utilization)| ResourceUtilization::new(*name, *utilization))
            .collect(),
        weight,
        thresholds: UtilizationThresholds {
            critical,
            high,
            medium,
        },
    }
}

pub fn resource_snapshot() -> ResourceSnapshot {
    ResourceSnapshot {
        staffing: category(
            &[("nurses", 0.92), ("physicians", 0.88), ("techs", 0.85)],
            0.4,
            0.9,
            0.8,
            0.7,
        ),
        equipment: category(
            &[("beds", 0.85), ("monitors", 0.82), ("ventilators", 0.75)],
            0.3,
            0.85,
            0.75,
            0.65,
        ),
        space: category(
            &[("ED", 0.95), ("triage", 0.80), ("fastTrack", 0.85)],
            0.3,
            0.95,
            0.85,
            0.75,
        ),
        hourly_pattern: HourlyLoadPattern::default(),
    }
}

fn affected(
    name: &str,
    severity: f64,
    time_impact_minutes: f64,
    resource_impact: f64,
    affected_volume_pct: f64,
    dependencies: &[&str],
    process_type: ProcessType,
) -> AffectedProcess {
    AffectedProcess {
        name: name.to_string(),
        severity,
        time_impact_minutes,
        resource_impact,
        affected_volume_pct,
        dependencies: dependencies.iter().map(|dep| dep.to_string()).collect(),
        process_type,
    }
}

pub fn cascade_snapshot() -> CascadeSnapshot {
    CascadeSnapshot {
        primary_process: "ED Admission".to_string(),
        affected_processes: vec![
            affected(
                "Bed Management",
                0.8,
                45.0,
                0.7,
                85.0,
                &["Nursing Assignment", "Room Cleaning"],
                ProcessType::Critical,
            ),
            affected(
                "Staff Scheduling",
                0.6,
                30.0,
                0.5,
                60.0,
                &["Shift Planning"],
                ProcessType::Operational,
            ),
            affected(
                "Medication Administration",
                0.7,
                25.0,
                0.6,
                70.0,
                &["Pharmacy", "Nursing"],
                ProcessType::Clinical,
            ),
            affected(
                "Discharge Planning",
                0.5,
                35.0,
                0.4,
                45.0,
                &["Case Management"],
                ProcessType::Support,
            ),
        ],
    }
}

pub fn wait_time_snapshot() -> WaitTimeSnapshot {
    WaitTimeSnapshot {
        steps: vec![
            WaitStep::new("registration", 15.0, 10.0),
            WaitStep::new("triage", 25.0, 15.0),
            WaitStep::new("bedAssignment", 45.0, 20.0),
            WaitStep::new("physicianInitial", 35.0, 30.0),
            WaitStep::new("nurseAssessment", 25.0, 20.0),
        ],
        peak_multipliers: PeakMultipliers::default(),
    }
}

pub fn acuity_snapshot() -> AcuitySnapshot {
    AcuitySnapshot {
        counts: AcuityCounts {
            high: 15,
            medium: 20,
            low: 7,
        },
        expected_mix: AcuityMix::default(),
    }
}

pub fn metric_snapshot() -> MetricSnapshot {
    MetricSnapshot {
        resource: resource_snapshot(),
        cascade: cascade_snapshot(),
        wait_time: wait_time_snapshot(),
        acuity: acuity_snapshot(),
    }
}

/// The six candidates reviewed in the daily bottleneck meeting.
pub fn daily_candidates() -> Vec<BottleneckCandidate> {
    [
        ("Triage Overload", 12.0, 8.0, 20.0, 6.0),
        ("Bed Assignment Delays", 15.0, 12.0, 16.0, 8.0),
        ("Radiology Queue", 10.0, 5.0, 17.0, 9.0),
        ("Nurse Staffing Gap", 18.0, 7.0, 12.0, 10.0),
        ("High-Acuity Surge", 14.0, 15.0, 10.0, 12.0),
        ("Operating Room Bottleneck", 13.0, 17.0, 8.0, 10.0),
    ]
    .into_iter()
    .map(|(name, resource_stress, cascade, wait_time, acuity)| {
        BottleneckCandidate::new(
            name,
            DimensionScores::new(resource_stress, cascade, wait_time, acuity),
        )
    })
    .collect()
}
