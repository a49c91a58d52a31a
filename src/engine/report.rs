use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{MonteCarloResult, PatternSummary, SangamSignals};
use crate::models::{ScoredCandidate, SignalMap, ranked_desc};

/// Ranked candidates per family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub jodis: Vec<ScoredCandidate>,
    pub digits: Vec<ScoredCandidate>,
    pub sangams: Vec<ScoredCandidate>,
}

/// Everything the daily run produces for one history date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Latest draw the analysis saw (picks target the next draw day); None
    /// for an empty history
    pub date: Option<NaiveDate>,
    pub records_analyzed: usize,
    pub hot_digits: SignalMap,
    pub cold_digits: SignalMap,
    pub hot_jodis: SignalMap,
    pub cold_jodis: SignalMap,
    pub sangams: SangamSignals,
    pub patterns: PatternSummary,
    /// Days between past appearances of each top pick
    pub pick_cycle_gaps: BTreeMap<String, Vec<i64>>,
    pub rankings: Rankings,
    pub top_picks: Vec<ScoredCandidate>,
    pub monte_carlo: MonteCarloResult,
}

pub const REPORT_TITLE: &str = "Kalyan Market Analysis";
pub const DISCLAIMER: &str = "Statistical heuristics only. Past frequency does not predict future draws.";

fn render(map: &SignalMap) -> String {
    ranked_desc(map)
        .iter()
        .map(|(value, n)| format!("{}({})", value, n))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DailyReport {
    /// Console summary through the logger.
    pub fn log_summary(&self) {
        match self.date {
            Some(date) => log::info!(
                "📊 {} - data up to {} ({} draws)",
                REPORT_TITLE,
                date,
                self.records_analyzed
            ),
            None => log::info!("📊 {} - no draws in history", REPORT_TITLE),
        }
        log::info!("Hot digits: {}", render(&self.hot_digits));
        log::info!("Cold digits: {}", render(&self.cold_digits));
        log::info!("Hot jodis: {}", render(&self.hot_jodis));
        log::info!("Cold jodis: {}", render(&self.cold_jodis));
        log::info!("Jodi digit sums: {}", render(&self.patterns.jodi_sums));
        log::info!("Open/close separations: {}", render(&self.patterns.separations));
        log::info!("Mirrored jodis: {}", render(&self.patterns.mirrored_jodis));
        if let Some(weekday) = self.patterns.next_weekday {
            log::info!("Past {} jodis: {}", weekday, render(&self.patterns.next_weekday_jodis));
        }
        for day in &self.patterns.weekday_breakdown {
            log::info!(
                "{}: {} draws, {} distinct jodis",
                day.weekday,
                day.draws,
                day.distinct_jodis
            );
        }

        for (rank, pick) in self.top_picks.iter().enumerate() {
            log::info!(
                "#{} {} [{}] score {:.2} - {}",
                rank + 1,
                pick.value,
                pick.confidence,
                pick.score,
                pick.reason_labels().join("; ")
            );
            if let Some(gaps) = self.pick_cycle_gaps.get(&pick.value) {
                log::info!("   cycle gaps (days): {:?}", gaps);
            }
        }
        if let Some(digit) = self.rankings.digits.first() {
            log::info!("Top digit: {} [{}]", digit.value, digit.confidence);
        }
        if let Some(sangam) = self.rankings.sangams.first() {
            log::info!("Top sangam: {} [{}]", sangam.value, sangam.confidence);
        }
        log::info!(
            "Monte Carlo: {:.1}% hit rate, confidence {:.1}/10. {}",
            self.monte_carlo.simulated_hit_rate,
            self.monte_carlo.confidence_score,
            self.monte_carlo.details
        );
        log::info!("{}", DISCLAIMER);
    }
}
