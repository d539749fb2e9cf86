use super::report::{ReportOptions, DEFAULT_TOP_N};
use super::severity::RangePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard panel selected for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BottleneckView {
    ResourceStress,
    CascadeImpact,
    WaitTime,
    AcuityMix,
    #[default]
    DailySummary,
}

impl BottleneckView {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ResourceStress,
            Self::CascadeImpact,
            Self::WaitTime,
            Self::AcuityMix,
            Self::DailySummary,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::ResourceStress => "resource-stress",
            Self::CascadeImpact => "cascade-impact",
            Self::WaitTime => "wait-time",
            Self::AcuityMix => "acuity-mix",
            Self::DailySummary => "daily-summary",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ResourceStress => "Resource Stress Analysis",
            Self::CascadeImpact => "Cascade Impact Analysis",
            Self::WaitTime => "Wait Time Analysis",
            Self::AcuityMix => "Acuity Mix Analysis",
            Self::DailySummary => "Daily Bottlenecks",
        }
    }
}

impl fmt::Display for BottleneckView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view '{0}'")]
pub struct ParseViewError(pub String);

impl FromStr for BottleneckView {
    type Err = ParseViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ordered()
            .into_iter()
            .find(|view| view.id() == normalized)
            .ok_or_else(|| ParseViewError(value.to_string()))
    }
}

/// Per-session view selections, passed by reference into renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub active_view: BottleneckView,
    pub top_n: usize,
    pub hour: Option<u8>,
    pub range_policy: RangePolicy,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_view: BottleneckView::default(),
            top_n: DEFAULT_TOP_N,
            hour: None,
            range_policy: RangePolicy::default(),
        }
    }
}

impl ViewState {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top_n,
            range_policy: self.range_policy,
            hour: self.hour,
        }
    }
}
