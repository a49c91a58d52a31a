use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::analysis::monte_carlo;
use crate::analysis::pipeline::{PickTarget, compute_signals};
use crate::analysis::{FrequencyAnalyzer, PatternAnalyzer, SangamAnalyzer, ScoringEngine};
use crate::config::AnalysisConfig;
use crate::domain::Field;
use crate::models::{HistorySlice, HistoryStore, ScoredCandidate};

use super::report::{DailyReport, Rankings};

/// Runs the analyzer -> scoring pipeline over a history view.
pub struct ForecastEngine {
    /// The configuration every run reads from
    pub config: AnalysisConfig,
}

impl ForecastEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Rank one candidate family using only the signals that target it.
    pub fn rank(&self, slice: HistorySlice<'_>, target: PickTarget) -> Vec<ScoredCandidate> {
        let signals = compute_signals(slice, &self.config, target);

        #[cfg(debug_assertions)]
        if crate::config::debug::PRINT_SIGNAL_SUMMARY {
            for (kind, map) in &signals {
                log::info!("[{}] {}: {} candidates", target, kind, map.len());
            }
        }

        ScoringEngine::new(&self.config.scoring).score(&signals)
    }

    pub fn rankings(&self, slice: HistorySlice<'_>) -> Rankings {
        Rankings {
            jodis: self.rank(slice, PickTarget::Jodi),
            digits: self.rank(slice, PickTarget::Digit),
            sangams: self.rank(slice, PickTarget::Sangam),
        }
    }

    /// Today's jodi picks: the top of the jodi ranking.
    pub fn top_picks(&self, slice: HistorySlice<'_>) -> Vec<ScoredCandidate> {
        let mut picks = self.rank(slice, PickTarget::Jodi);
        picks.truncate(self.config.scoring.top_picks);
        picks
    }

    /// Full analysis of the latest state of `history`, including a resampling
    /// check of the top picks against the whole jodi record. An empty history
    /// yields an undated report with empty maps and no picks.
    pub fn daily_report<R: Rng + ?Sized>(&self, history: &HistoryStore, rng: &mut R) -> DailyReport {
        let slice = history.slice();
        let date = slice.latest_date();
        if date.is_none() {
            log::warn!("History is empty; the report has no picks");
        }

        let f = &self.config.frequency;
        let frequency = FrequencyAnalyzer::new(slice);
        let rankings = self.rankings(slice);
        let top_picks: Vec<ScoredCandidate> = rankings
            .jodis
            .iter()
            .take(self.config.scoring.top_picks)
            .cloned()
            .collect();

        let patterns = PatternAnalyzer::new(slice);
        let next_draw = date.and_then(|d| history.calendar().next_draw_day(d));
        let pick_cycle_gaps: BTreeMap<String, Vec<i64>> = top_picks
            .iter()
            .map(|c| (c.value.clone(), patterns.cycle_gaps(Field::Jodi, &c.value)))
            .collect();

        let candidates: BTreeSet<String> = top_picks.iter().map(|c| c.value.clone()).collect();
        let monte_carlo = monte_carlo::estimate(
            &slice.jodis(),
            &candidates,
            self.config.monte_carlo.trials,
            rng,
        );

        DailyReport {
            date,
            records_analyzed: slice.len(),
            hot_digits: frequency.hot(Field::Digit, f.lookback_days, f.top_n),
            cold_digits: frequency.cold(Field::Digit, f.lookback_days, f.top_n),
            hot_jodis: frequency.hot(Field::Jodi, f.lookback_days, f.top_n),
            cold_jodis: frequency.cold(Field::Jodi, f.lookback_days, f.top_n),
            sangams: SangamAnalyzer::new(slice).signals(&self.config.sangam),
            patterns: patterns.summary(&self.config.patterns, next_draw),
            pick_cycle_gaps,
            top_picks,
            rankings,
            monte_carlo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;
    use crate::test_utils::{cycling_jodis, history};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn store_of(jodis: &[String]) -> HistoryStore {
        let refs: Vec<&str> = jodis.iter().map(|s| s.as_str()).collect();
        history(&refs)
    }

    #[test]
    fn test_cycling_history_top_three() {
        let mut config = AnalysisConfig::default();
        config.pipeline = vec![crate::analysis::SignalKind::HighFrequencyJodi];
        config.frequency.top_n = 3;
        config.scoring.top_picks = 3;
        let engine = ForecastEngine::new(config);

        let store = store_of(&cycling_jodis(1));
        let picks: BTreeSet<String> = engine
            .top_picks(store.slice())
            .into_iter()
            .map(|c| c.value)
            .collect();
        let expected: BTreeSet<String> = ["00", "01", "02"].iter().map(|s| s.to_string()).collect();
        assert_eq!(picks, expected);
    }

    #[test]
    fn test_rankings_keep_families_apart() {
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let store = store_of(&cycling_jodis(3));
        let rankings = engine.rankings(store.slice());

        assert!(rankings.jodis.iter().all(|c| c.value.len() == 2));
        assert!(rankings.digits.iter().all(|c| c.value.len() == 1));
        assert!(rankings.sangams.iter().all(|c| c.value.len() == 3));
        assert!(!rankings.sangams.is_empty());
    }

    #[test]
    fn test_daily_report_is_reproducible_with_seed() {
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let store = store_of(&cycling_jodis(6));

        let a = engine
            .daily_report(&store, &mut StdRng::seed_from_u64(5));
        let b = engine
            .daily_report(&store, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.monte_carlo, b.monte_carlo);
        assert_eq!(a.date, store.slice().latest_date());
        assert_eq!(a.records_analyzed, 60);
        assert!(a.top_picks.len() <= engine.config.scoring.top_picks);
        assert_eq!(a.hot_digits.len(), engine.config.frequency.top_n);
    }

    #[test]
    fn test_daily_report_carries_patterns() {
        let engine = ForecastEngine::new(AnalysisConfig::default());
        // Mon..Sat then Mon: the next draw after Monday is Tuesday
        let store = history(&["27", "72", "12", "34", "56", "78", "27"]);
        let report = engine.daily_report(&store, &mut StdRng::seed_from_u64(2));

        assert_eq!(report.patterns.next_weekday, Some(chrono::Weekday::Tue));
        assert_eq!(report.patterns.next_weekday_jodis.get("72"), Some(&1));
        assert_eq!(report.patterns.mirrored_jodis.get("27"), Some(&2));
        assert_eq!(report.patterns.jodi_sums.values().sum::<u32>(), 7);
        assert_eq!(report.pick_cycle_gaps.len(), report.top_picks.len());
        // "27" on Monday 6th and Monday 13th
        assert_eq!(report.top_picks[0].value, "27");
        assert_eq!(report.pick_cycle_gaps["27"], vec![7]);
    }

    #[test]
    fn test_repeated_jodi_is_high_confidence() {
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let store = history(&["12", "34", "12", "56", "78", "90"]);
        let picks = engine.top_picks(store.slice());
        assert_eq!(picks[0].value, "12");
        assert_eq!(picks[0].confidence, Confidence::High);
    }

    #[test]
    fn test_empty_history_report_is_empty() {
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let empty = HistoryStore::from_records(Vec::new(), Default::default()).unwrap();
        let report = engine.daily_report(&empty, &mut StdRng::seed_from_u64(1));

        assert_eq!(report.date, None);
        assert_eq!(report.records_analyzed, 0);
        assert!(report.top_picks.is_empty());
        assert!(report.hot_digits.is_empty() && report.hot_jodis.is_empty());
        assert_eq!(report.rankings, Rankings::default());
        assert_eq!(report.patterns, crate::analysis::PatternSummary::default());
        assert!(report.pick_cycle_gaps.is_empty());
        assert_eq!(report.monte_carlo.trials, 0);
        assert_eq!(report.monte_carlo.simulated_hit_rate, 0.0);
    }
}
