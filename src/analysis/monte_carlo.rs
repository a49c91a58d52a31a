//! Resampling estimate of how often a pick set would have hit by chance.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Percentage of trials whose draw was a candidate
    pub simulated_hit_rate: f64,
    /// Hit rate scaled to 0-10
    pub confidence_score: f64,
    pub hits: usize,
    pub trials: usize,
    pub details: String,
}

impl MonteCarloResult {
    fn empty(details: &str) -> Self {
        Self {
            simulated_hit_rate: 0.0,
            confidence_score: 0.0,
            hits: 0,
            trials: 0,
            details: details.to_string(),
        }
    }
}

/// Draw `num_trials` jodis uniformly, with replacement, from `history` and
/// count how many land in `candidates`.
pub fn estimate<R: Rng + ?Sized>(
    history: &[String],
    candidates: &BTreeSet<String>,
    num_trials: usize,
    rng: &mut R,
) -> MonteCarloResult {
    if candidates.is_empty() {
        return MonteCarloResult::empty("No picks to simulate.");
    }
    if history.is_empty() {
        return MonteCarloResult::empty("No historical jodi outcomes.");
    }
    if num_trials == 0 {
        return MonteCarloResult::empty("No trials requested.");
    }

    let hits = (0..num_trials)
        .filter_map(|_| history.choose(rng))
        .filter(|drawn| candidates.contains(*drawn))
        .count();

    let simulated_hit_rate = hits as f64 / num_trials as f64 * 100.0;
    MonteCarloResult {
        simulated_hit_rate,
        confidence_score: (simulated_hit_rate / 10.0).min(10.0),
        hits,
        trials: num_trials,
        details: format!(
            "Simulated {} days. {} hits for current picks.",
            num_trials, hits
        ),
    }
}
