// Signal analyzers, fusion scoring and resampling
pub mod absence;
pub mod explain;
pub mod frequency;
pub mod monte_carlo;
pub mod patterns;
pub mod pipeline;
pub mod sangam;
pub mod scoring;
pub mod streak;

// Re-export commonly used types
pub use absence::AbsenceAnalyzer;
pub use frequency::FrequencyAnalyzer;
pub use monte_carlo::{MonteCarloResult, estimate};
pub use patterns::{PatternAnalyzer, PatternSummary, WeekdayBreakdown};
pub use pipeline::{PickTarget, SignalKind, SignalMaps, compute_signal, compute_signals};
pub use sangam::{SangamAnalyzer, SangamSignals};
pub use scoring::ScoringEngine;
pub use streak::StreakAnalyzer;
