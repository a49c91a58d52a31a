//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Most are further gated by `cfg(debug_assertions)`.

/// Emit the per-signal map sizes every time the pipeline runs.
pub const PRINT_SIGNAL_SUMMARY: bool = false;

/// Emit every scored candidate (value, score, tier, reasons) after ranking.
pub const PRINT_SCORING_DETAIL: bool = false;

/// Emit one line per evaluated backtest day.
pub const PRINT_BACKTEST_STEPS: bool = false;

/// Emit rows skipped while loading the history CSV.
pub const PRINT_SKIPPED_ROWS: bool = true;

/// Emit snapshot read/write paths.
pub const PRINT_SERDE: bool = false;
