use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::backtest::backtester::BacktestRow;
use crate::models::hit_label;
use crate::utils::maths_utils::{pct, wilson_interval, z_for_confidence};

/// Aggregate accuracy of a backtest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub total: usize,
    pub top1_hits: usize,
    pub top3_hits: usize,
    pub top5_hits: usize,
    pub top1_rate: f64,
    pub top3_rate: f64,
    pub top5_rate: f64,
    /// Wilson interval for the top-5 rate, in percent
    pub top5_interval: (f64, f64),
    /// Rows per hit tier label ("High", "Medium", "Low", "Miss")
    pub by_confidence: BTreeMap<String, usize>,
}

impl BacktestSummary {
    pub fn from_rows(rows: &[BacktestRow], confidence_level: f64) -> Self {
        let total = rows.len();
        let top1_hits = rows.iter().filter(|r| r.top1_hit).count();
        let top3_hits = rows.iter().filter(|r| r.top3_hit).count();
        let top5_hits = rows.iter().filter(|r| r.top5_hit).count();

        let mut by_confidence = BTreeMap::new();
        for row in rows {
            *by_confidence.entry(hit_label(row.confidence)).or_insert(0) += 1;
        }

        let (low, high) = wilson_interval(top5_hits, total, z_for_confidence(confidence_level));

        Self {
            total,
            top1_hits,
            top3_hits,
            top5_hits,
            top1_rate: pct(top1_hits, total),
            top3_rate: pct(top3_hits, total),
            top5_rate: pct(top5_hits, total),
            top5_interval: (low * 100.0, high * 100.0),
            by_confidence,
        }
    }

    pub fn log_summary(&self) {
        if self.total == 0 {
            log::warn!("Backtest produced no rows (history shorter than warmup?)");
            return;
        }
        log::info!("Backtest over {} days", self.total);
        log::info!("Top-1: {} hits ({:.2}%)", self.top1_hits, self.top1_rate);
        log::info!("Top-3: {} hits ({:.2}%)", self.top3_hits, self.top3_rate);
        log::info!(
            "Top-5: {} hits ({:.2}%, interval {:.2}%-{:.2}%)",
            self.top5_hits,
            self.top5_rate,
            self.top5_interval.0,
            self.top5_interval.1
        );
        for (tier, count) in &self.by_confidence {
            log::info!("  {}: {}", tier, count);
        }
    }
}
