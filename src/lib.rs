#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod backtest;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// The engine
pub mod engine;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use analysis::{MonteCarloResult, PickTarget, SignalKind};
pub use backtest::{BacktestRow, BacktestSummary, Backtester};
pub use config::AnalysisConfig;
pub use data::{ValidationRecord, load_history};
pub use domain::{DrawCalendar, Record};
pub use engine::{DailyReport, ForecastEngine};
pub use error::{HistoryError, RecordError};
pub use models::{Confidence, HistorySlice, HistoryStore, ScoredCandidate, SignalMap};

use std::path::PathBuf;

// CLI argument parsing
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Draw history CSV
    #[arg(long, default_value = config::HISTORY_PATH)]
    pub data: PathBuf,

    /// JSON file overriding the default analysis configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for daily prediction snapshots
    #[arg(long, default_value = config::REPORTS_DIR)]
    pub reports_dir: PathBuf,

    /// Seed for the Monte Carlo estimator (overrides the config)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank today's picks and write the snapshot (default)
    Analyze,
    /// Replay the pipeline over history and report hit rates
    Backtest {
        /// Records required before the first evaluated day
        #[arg(long)]
        warmup: Option<usize>,
    },
    /// Grade the previous snapshot against the latest draw
    Validate {
        /// Validation log CSV
        #[arg(long, default_value = config::VALIDATION_LOG_PATH)]
        log: PathBuf,
    },
}

impl Cli {
    /// Defaults, overlaid with the JSON config file and CLI flags.
    pub fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.monte_carlo.seed = Some(seed);
        }
        Ok(config)
    }
}
