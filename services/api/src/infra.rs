use chrono::{Datelike, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use zephyrus_or::analytics::bottleneck::{
    reference, FixtureBuilder, HospitalId, HospitalSnapshot, SeededFixtures, SnapshotSource,
    SourceError, TimeWindow,
};

pub(crate) const REFERENCE_HOSPITAL: &str = "reference-ed";

pub(crate) const DAILY_BOTTLENECKS: [&str; 6] = [
    "Triage Overload",
    "Bed Assignment Delays",
    "Radiology Queue",
    "Nurse Staffing Gap",
    "High-Acuity Surge",
    "Operating Room Bottleneck",
];

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Serves the reference emergency department plus seeded mock hospitals
/// until a metrics warehouse is connected.
#[derive(Debug, Clone)]
pub(crate) struct FixtureSnapshotSource {
    seeds: HashMap<HospitalId, u64>,
}

impl Default for FixtureSnapshotSource {
    fn default() -> Self {
        Self::new([("mercy-west", 11), ("st-olaf", 29), ("lakeside", 47)])
    }
}

impl FixtureSnapshotSource {
    pub(crate) fn new<'a>(hospitals: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let seeds = hospitals
            .into_iter()
            .map(|(id, seed)| (HospitalId(id.to_string()), seed))
            .collect();
        Self { seeds }
    }

    pub(crate) fn hospital_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.seeds.keys().map(|id| id.0.clone()).collect();
        ids.push(REFERENCE_HOSPITAL.to_string());
        ids.sort();
        ids
    }
}

impl SnapshotSource for FixtureSnapshotSource {
    fn fetch(
        &self,
        hospital_id: &HospitalId,
        window: &TimeWindow,
    ) -> Result<HospitalSnapshot, SourceError> {
        if hospital_id.0 == REFERENCE_HOSPITAL {
            return Ok(HospitalSnapshot {
                metrics: reference::metric_snapshot(),
                candidates: reference::daily_candidates(),
            });
        }

        let seed = self
            .seeds
            .get(hospital_id)
            .ok_or_else(|| SourceError::NotFound(hospital_id.clone()))?;

        // Same hospital and window always yields the same snapshot.
        let window_key = (i64::from(window.start.num_days_from_ce()) << 16) ^ window.days();
        let mut fixtures = SeededFixtures::new(seed.wrapping_mul(0x100_0000_01B3) ^ window_key as u64);
        Ok(HospitalSnapshot {
            metrics: fixtures.metric_snapshot(),
            candidates: fixtures.candidates(&DAILY_BOTTLENECKS),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(
            parse_date(start).expect("start"),
            parse_date(end).expect("end"),
        )
        .expect("ordered window")
    }

    #[test]
    fn fixture_source_is_deterministic_per_window() {
        let source = FixtureSnapshotSource::default();
        let hospital = HospitalId("st-olaf".to_string());
        let march = window("2025-03-01", "2025-03-07");

        let first = source.fetch(&hospital, &march).expect("known hospital");
        let second = source.fetch(&hospital, &march).expect("known hospital");
        assert_eq!(first, second);

        let april = window("2025-04-01", "2025-04-07");
        let other = source.fetch(&hospital, &april).expect("known hospital");
        assert_ne!(first, other);
    }

    #[test]
    fn fixture_source_serves_reference_and_rejects_unknown() {
        let source = FixtureSnapshotSource::default();
        let day = window("2025-03-01", "2025-03-01");

        let snapshot = source
            .fetch(&HospitalId(REFERENCE_HOSPITAL.to_string()), &day)
            .expect("reference hospital");
        assert_eq!(snapshot.candidates.len(), 6);

        assert!(matches!(
            source.fetch(&HospitalId("nowhere".to_string()), &day),
            Err(SourceError::NotFound(_))
        ));
        assert!(source.hospital_ids().contains(&REFERENCE_HOSPITAL.to_string()));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2025-13-01").is_err());
        assert_eq!(
            parse_date(" 2025-03-01 ").expect("trimmed"),
            NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid")
        );
    }
}
