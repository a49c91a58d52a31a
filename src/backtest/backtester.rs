//! Walk-forward replay of the scoring pipeline over past draws.
//!
//! Day `i` is predicted from the first `i` records only, so nothing from day
//! `i` or later can leak into its picks.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::PickTarget;
use crate::engine::ForecastEngine;
use crate::models::{Confidence, HistoryStore, ScoredCandidate};

/// Picks evaluated per day
pub const EVALUATED_PICKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    pub date: NaiveDate,
    pub actual: String,
    /// Records the prediction was built from
    pub train_len: usize,
    pub picks: Vec<String>,
    pub top1_hit: bool,
    pub top3_hit: bool,
    pub top5_hit: bool,
    /// Tier of the matching pick; None is a miss
    pub confidence: Option<Confidence>,
}

impl BacktestRow {
    /// Grade ranked picks against the drawn jodi.
    pub fn grade(
        date: NaiveDate,
        actual: &str,
        train_len: usize,
        ranked: &[ScoredCandidate],
    ) -> Self {
        let top: Vec<&ScoredCandidate> = ranked.iter().take(EVALUATED_PICKS).collect();
        let rank = top.iter().position(|c| c.value == actual);

        Self {
            date,
            actual: actual.to_string(),
            train_len,
            picks: top.iter().map(|c| c.value.clone()).collect(),
            top1_hit: rank.is_some_and(|r| r < 1),
            top3_hit: rank.is_some_and(|r| r < 3),
            top5_hit: rank.is_some(),
            confidence: rank.map(|r| top[r].confidence),
        }
    }
}

pub struct Backtester<'e> {
    engine: &'e ForecastEngine,
}

impl<'e> Backtester<'e> {
    pub fn new(engine: &'e ForecastEngine) -> Self {
        Self { engine }
    }

    /// One row per day from `warmup` to the end of history, in date order.
    pub fn run(&self, history: &HistoryStore, warmup: usize) -> Vec<BacktestRow> {
        let slice = history.slice();
        let records = slice.records();

        log::info!(
            "Backtesting {} days ({} warmup of {} records)",
            records.len().saturating_sub(warmup),
            warmup,
            records.len()
        );

        (warmup..records.len())
            .into_par_iter()
            .map(|i| {
                let train = slice.prefix(i);
                let target = &records[i];
                let ranked = self.engine.rank(train, PickTarget::Jodi);
                let row = BacktestRow::grade(target.date, &target.jodi, train.len(), &ranked);

                #[cfg(debug_assertions)]
                if crate::config::debug::PRINT_BACKTEST_STEPS {
                    log::info!(
                        "{} actual={} picks={:?} top5_hit={}",
                        row.date,
                        row.actual,
                        row.picks,
                        row.top5_hit
                    );
                }

                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::test_utils::{cycling_jodis, first_monday, history};

    fn candidate(value: &str, confidence: Confidence) -> ScoredCandidate {
        ScoredCandidate {
            value: value.to_string(),
            score: 1.0,
            confidence,
            reasons: Vec::new(),
        }
    }

    #[test]
    fn test_grade_first_matching_tier() {
        let ranked = vec![
            candidate("11", Confidence::High),
            candidate("22", Confidence::High),
            candidate("33", Confidence::Medium),
            candidate("44", Confidence::Low),
            candidate("55", Confidence::Low),
            candidate("66", Confidence::Low),
        ];

        let row = BacktestRow::grade(first_monday(), "33", 10, &ranked);
        assert!(!row.top1_hit && row.top3_hit && row.top5_hit);
        assert_eq!(row.confidence, Some(Confidence::Medium));
        assert_eq!(row.picks.len(), EVALUATED_PICKS);

        let row = BacktestRow::grade(first_monday(), "11", 10, &ranked);
        assert!(row.top1_hit && row.top3_hit && row.top5_hit);

        // Ranked sixth: outside the evaluated picks
        let row = BacktestRow::grade(first_monday(), "66", 10, &ranked);
        assert!(!row.top5_hit);
        assert_eq!(row.confidence, None);
    }

    #[test]
    fn test_grade_without_picks_is_a_miss() {
        let row = BacktestRow::grade(first_monday(), "12", 0, &[]);
        assert!(row.picks.is_empty());
        assert!(!row.top1_hit && !row.top3_hit && !row.top5_hit);
    }

    #[test]
    fn test_train_len_equals_step_index() {
        let jodis = cycling_jodis(3);
        let refs: Vec<&str> = jodis.iter().map(|s| s.as_str()).collect();
        let store = history(&refs);
        let engine = ForecastEngine::new(AnalysisConfig::default());

        let warmup = 10;
        let rows = Backtester::new(&engine).run(&store, warmup);
        assert_eq!(rows.len(), store.len() - warmup);
        for (offset, row) in rows.iter().enumerate() {
            let i = warmup + offset;
            assert_eq!(row.train_len, i);
            assert_eq!(row.date, store.records()[i].date);
            assert_eq!(row.actual, store.records()[i].jodi);
        }
    }

    #[test]
    fn test_prediction_ignores_the_day_it_predicts() {
        // Day 5 repeats a jodi never seen before; it must not be a pick for itself.
        let store = history(&["01", "02", "03", "04", "05", "99"]);
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let rows = Backtester::new(&engine).run(&store, 5);

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].picks.contains(&"99".to_string()));
        assert!(!rows[0].top5_hit);
    }

    #[test]
    fn test_warmup_beyond_history_is_empty() {
        let store = history(&["12", "34"]);
        let engine = ForecastEngine::new(AnalysisConfig::default());
        assert!(Backtester::new(&engine).run(&store, 50).is_empty());
    }
}
