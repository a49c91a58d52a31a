//! Analysis and computation configuration

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::analysis::pipeline::{DEFAULT_PIPELINE, SignalKind};
use crate::domain::DrawCalendar;

/// Weekly closed day (no draw)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub closed_weekday: Weekday,
}

/// Hot/cold windows for jodis and digits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencySettings {
    pub lookback_days: i64,
    pub top_n: usize,
}

/// Short window used for the trend-aligned jodi signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    pub lookback_days: i64,
    pub top_n: usize,
}

/// Settings for "due" detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsenceSettings {
    pub lookback_days: i64,
    // Minimum calendar days since last appearance
    pub threshold_days: i64,
}

/// Settings for "exhausted" detection (an in-window count threshold)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustionSettings {
    pub lookback_days: i64,
    pub jodi_min_count: u32,
    // Digits appear twice per draw, so they need a higher bar
    pub digit_min_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SangamSettings {
    pub hot_lookback_days: i64,
    pub hot_top_n: usize,
    pub due_lookback_days: i64,
    pub due_threshold_days: i64,
}

/// Fusion weights and tier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub weights: BTreeMap<SignalKind, f64>,
    // Inclusive lower bounds
    pub high_threshold: f64,
    pub medium_threshold: f64,
    // How many ranked jodis become "today's picks"
    pub top_picks: usize,
}

/// Windows for the report-only pattern breakdowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    // Digit sums, separations and mirror jodis
    pub lookback_days: i64,
    pub weekday_lookback_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    pub trials: usize,
    // Fixed seed for reproducible runs; None draws from OS entropy
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    // Records required before the first evaluated day
    pub warmup: usize,
    // Two-sided level for the Wilson interval on hit rates
    pub confidence_level: f64,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub calendar: CalendarSettings,
    pub frequency: FrequencySettings,
    pub trend: TrendSettings,
    pub absence: AbsenceSettings,
    pub exhaustion: ExhaustionSettings,
    pub sangam: SangamSettings,
    pub patterns: PatternSettings,
    pub scoring: ScoringSettings,
    pub monte_carlo: MonteCarloSettings,
    pub backtest: BacktestSettings,
    // Signals to compute, in order
    pub pipeline: Vec<SignalKind>,
}

pub const CALENDAR: CalendarSettings = CalendarSettings {
    closed_weekday: Weekday::Sun,
};

pub const FREQUENCY: FrequencySettings = FrequencySettings {
    lookback_days: 30,
    top_n: 3,
};

pub const TREND: TrendSettings = TrendSettings {
    lookback_days: 7,
    top_n: 5,
};

pub const ABSENCE: AbsenceSettings = AbsenceSettings {
    lookback_days: 90,
    threshold_days: 7,
};

pub const EXHAUSTION: ExhaustionSettings = ExhaustionSettings {
    lookback_days: 30,
    jodi_min_count: 3,
    digit_min_count: 8,
};

pub const SANGAM: SangamSettings = SangamSettings {
    hot_lookback_days: 30,
    hot_top_n: 5,
    due_lookback_days: 365,
    due_threshold_days: 60,
};

pub const PATTERNS: PatternSettings = PatternSettings {
    lookback_days: 30,
    weekday_lookback_days: 90,
};

pub const MONTE_CARLO: MonteCarloSettings = MonteCarloSettings {
    trials: 1000,
    seed: None,
};

pub const BACKTEST: BacktestSettings = BacktestSettings {
    warmup: 50,
    confidence_level: 0.95,
};

pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 2.5;
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 1.0;
pub const TOP_PICKS: usize = 5;

pub const DEFAULT_WEIGHTS: [(SignalKind, f64); 11] = [
    (SignalKind::HighFrequencyJodi, 1.5),
    (SignalKind::TrendAlignedJodi, 1.0),
    (SignalKind::ExtendedAbsenceJodi, 0.1),
    (SignalKind::ExhaustedJodi, -1.0),
    (SignalKind::HighFrequencyDigit, 1.0),
    (SignalKind::ExtendedAbsenceDigit, 0.1),
    (SignalKind::ExhaustedDigit, -0.25),
    (SignalKind::HighFrequencyOpenSangam, 1.0),
    (SignalKind::HighFrequencyCloseSangam, 1.0),
    (SignalKind::ExtendedAbsenceOpenSangam, 0.05),
    (SignalKind::ExtendedAbsenceCloseSangam, 0.05),
];

impl Default for CalendarSettings {
    fn default() -> Self {
        CALENDAR
    }
}

impl Default for FrequencySettings {
    fn default() -> Self {
        FREQUENCY
    }
}

impl Default for TrendSettings {
    fn default() -> Self {
        TREND
    }
}

impl Default for AbsenceSettings {
    fn default() -> Self {
        ABSENCE
    }
}

impl Default for ExhaustionSettings {
    fn default() -> Self {
        EXHAUSTION
    }
}

impl Default for SangamSettings {
    fn default() -> Self {
        SANGAM
    }
}

impl Default for PatternSettings {
    fn default() -> Self {
        PATTERNS
    }
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        MONTE_CARLO
    }
}

impl Default for BacktestSettings {
    fn default() -> Self {
        BACKTEST
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.into_iter().collect(),
            high_threshold: HIGH_CONFIDENCE_THRESHOLD,
            medium_threshold: MEDIUM_CONFIDENCE_THRESHOLD,
            top_picks: TOP_PICKS,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarSettings::default(),
            frequency: FrequencySettings::default(),
            trend: TrendSettings::default(),
            absence: AbsenceSettings::default(),
            exhaustion: ExhaustionSettings::default(),
            sangam: SangamSettings::default(),
            patterns: PatternSettings::default(),
            scoring: ScoringSettings::default(),
            monte_carlo: MonteCarloSettings::default(),
            backtest: BacktestSettings::default(),
            pipeline: DEFAULT_PIPELINE.to_vec(),
        }
    }
}

impl AnalysisConfig {
    /// Load overrides from JSON. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn draw_calendar(&self) -> DrawCalendar {
        DrawCalendar::new(self.calendar.closed_weekday)
    }
}
