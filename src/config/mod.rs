//! Configuration module for the jodi analysis application.

pub mod analysis;
pub mod debug;
pub mod persistence;

// Re-export commonly used items
pub use analysis::{
    AbsenceSettings, AnalysisConfig, BacktestSettings, CalendarSettings, ExhaustionSettings,
    FrequencySettings, MonteCarloSettings, PatternSettings, SangamSettings, ScoringSettings, TrendSettings,
};
pub use persistence::{HISTORY_PATH, REPORTS_DIR, VALIDATION_LOG_PATH, snapshot_filename};
