use crate::model::FreshnessStatus;
use serde::{Deserialize, Serialize};

/// Which step of the FQI evaluation produced the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGate {
    /// Mold detected in the color reading.
    Visual,
    /// Gas at or above the critical level.
    GasCritical,
    /// Gas within 80% of the critical level.
    GasWarning,
    /// Temperature at or above the critical level.
    Heat,
    /// Weighted gas risk and humidity penalty.
    Composite,
}

/// Output of the FQI calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FqiScore {
    /// Food Quality Index, 0 (spoiled) to 100 (fresh).
    pub fqi: u8,
    pub status: FreshnessStatus,
    pub gate: ScoreGate,
    /// Human-readable explanation of the decision.
    pub reason: String,
}

/// Full scoring result for one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub fqi: u8,
    pub status: FreshnessStatus,
    /// Formatted time until the food crosses the spoilage threshold.
    pub estimated_life: String,
    pub gate: ScoreGate,
    pub reason: String,
}
