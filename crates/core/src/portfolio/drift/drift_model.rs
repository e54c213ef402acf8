use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bucket collecting holdings with no resolvable asset class.
pub const UNCLASSIFIED_CLASS: &str = "UNKNOWN";

/// Compliance status of one asset class against its tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftStatus {
    Ok,
    Warning,
    Breach,
}

impl DriftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftStatus::Ok => "OK",
            DriftStatus::Warning => "WARNING",
            DriftStatus::Breach => "BREACH",
        }
    }
}

impl std::fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Drift of one asset class against its governance target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftAssessment {
    pub asset_class: String,
    pub current_value_base: Decimal,
    pub current_pct: Decimal,
    pub target_pct: Option<Decimal>,
    pub tolerance_band: Option<Decimal>,
    /// Signed difference between current and target percent.
    pub drift_pct: Option<Decimal>,
    pub status: DriftStatus,
}

/// Full drift assessment for one portfolio filter. Configuration
/// inconsistencies are surfaced here as warnings, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub assessments: Vec<DriftAssessment>,
    pub warnings: Vec<String>,
}
