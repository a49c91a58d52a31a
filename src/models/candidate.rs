use serde::{Deserialize, Serialize};

/// Tier of a fused score against the configured thresholds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Label used in logs and reports when no pick matched the actual draw.
pub const MISS_LABEL: &str = "Miss";

/// Tier label, or "Miss" when there was no hit.
pub fn hit_label(confidence: Option<Confidence>) -> String {
    confidence.map_or_else(|| MISS_LABEL.to_string(), |c| c.to_string())
}

/// Why a candidate scored. Declaration order is the display priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    #[strum(to_string = "High frequency in recent draws")]
    HighFrequency,
    #[strum(to_string = "Appears in active trend window")]
    TrendWindow,
    #[strum(to_string = "Extended absence cycle (statistically due)")]
    ExtendedAbsence,
    #[strum(to_string = "Supported by sangam pattern alignment")]
    SangamSupport,
    #[strum(to_string = "⚠ Over-represented recently (exhaustion risk)")]
    Exhausted,
}

/// One ranked candidate, rebuilt on every scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub value: String,
    pub score: f64,
    pub confidence: Confidence,
    pub reasons: Vec<Reason>,
}

impl ScoredCandidate {
    pub fn reason_labels(&self) -> Vec<String> {
        self.reasons.iter().map(|r| r.to_string()).collect()
    }
}
