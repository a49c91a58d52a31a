//! Weighted fusion of signal maps into ranked, tiered candidates.

use std::collections::BTreeSet;

use crate::analysis::explain::{contribution, reasons_for};
use crate::analysis::pipeline::SignalMaps;
use crate::config::ScoringSettings;
use crate::models::{Confidence, ScoredCandidate};

pub struct ScoringEngine<'c> {
    settings: &'c ScoringSettings,
}

impl<'c> ScoringEngine<'c> {
    pub fn new(settings: &'c ScoringSettings) -> Self {
        Self { settings }
    }

    /// Inclusive thresholds: a score exactly at HIGH is High.
    pub fn classify(&self, score: f64) -> Confidence {
        if score >= self.settings.high_threshold {
            Confidence::High
        } else if score >= self.settings.medium_threshold {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Score every candidate in the union of `signals`, highest first.
    ///
    /// Each signal adds `weight * magnitude` for the candidates it contains; a
    /// negative weight turns a signal into a penalty. Signals without a
    /// configured weight contribute nothing. Ties keep candidate-ascending order.
    pub fn score(&self, signals: &SignalMaps) -> Vec<ScoredCandidate> {
        let universe: BTreeSet<&String> = signals.values().flat_map(|m| m.keys()).collect();

        let mut ranked: Vec<ScoredCandidate> = universe
            .into_iter()
            .map(|candidate| {
                let score: f64 = signals
                    .iter()
                    .filter_map(|(kind, map)| {
                        contribution(*kind, map, candidate, &self.settings.weights)
                    })
                    .sum();
                ScoredCandidate {
                    value: candidate.clone(),
                    score,
                    confidence: self.classify(score),
                    reasons: reasons_for(candidate, signals, &self.settings.weights),
                }
            })
            .collect();

        // Stable: equal scores stay in candidate order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        #[cfg(debug_assertions)]
        if crate::config::debug::PRINT_SCORING_DETAIL {
            for c in &ranked {
                log::info!(
                    "{} score={:.3} tier={} reasons={:?}",
                    c.value,
                    c.score,
                    c.confidence,
                    c.reason_labels()
                );
            }
        }

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::SignalKind;
    use crate::models::{Reason, SignalMap};
    use std::collections::BTreeMap;

    fn map(entries: &[(&str, u32)]) -> SignalMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn settings(weights: &[(SignalKind, f64)]) -> ScoringSettings {
        ScoringSettings {
            weights: weights.iter().copied().collect::<BTreeMap<_, _>>(),
            high_threshold: 2.5,
            medium_threshold: 1.0,
            top_picks: 5,
        }
    }

    #[test]
    fn test_hot_jodi_scores_high() {
        let cfg = settings(&[(SignalKind::HighFrequencyJodi, 1.5)]);
        let mut signals = SignalMaps::new();
        signals.insert(SignalKind::HighFrequencyJodi, map(&[("12", 5)]));

        let ranked = ScoringEngine::new(&cfg).score(&signals);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].value, "12");
        assert!((ranked[0].score - 7.5).abs() < 1e-9);
        assert_eq!(ranked[0].confidence, Confidence::High);
        assert_eq!(ranked[0].reasons, vec![Reason::HighFrequency]);
    }

    #[test]
    fn test_exhausted_penalty_lowers_rank() {
        let cfg = settings(&[
            (SignalKind::HighFrequencyJodi, 1.0),
            (SignalKind::ExhaustedJodi, -1.0),
        ]);
        let mut signals = SignalMaps::new();
        signals.insert(SignalKind::HighFrequencyJodi, map(&[("12", 5), ("34", 3)]));
        signals.insert(SignalKind::ExhaustedJodi, map(&[("34", 4)]));

        let ranked = ScoringEngine::new(&cfg).score(&signals);
        assert_eq!(ranked[0].value, "12");
        assert_eq!(ranked[0].confidence, Confidence::High);
        assert_eq!(ranked[1].value, "34");
        assert!((ranked[1].score + 1.0).abs() < 1e-9);
        assert_eq!(ranked[1].confidence, Confidence::Low);
        assert_eq!(
            ranked[1].reasons,
            vec![Reason::HighFrequency, Reason::Exhausted]
        );
    }

    #[test]
    fn test_confidence_boundaries_are_inclusive() {
        let cfg = settings(&[]);
        let engine = ScoringEngine::new(&cfg);
        assert_eq!(engine.classify(2.5), Confidence::High);
        assert_eq!(engine.classify(2.4999), Confidence::Medium);
        assert_eq!(engine.classify(1.0), Confidence::Medium);
        assert_eq!(engine.classify(0.9999), Confidence::Low);
        assert_eq!(engine.classify(-3.0), Confidence::Low);
    }

    #[test]
    fn test_score_is_monotonic_in_each_weight() {
        let mut signals = SignalMaps::new();
        signals.insert(SignalKind::HighFrequencyJodi, map(&[("12", 3), ("45", 1)]));
        signals.insert(SignalKind::ExtendedAbsenceJodi, map(&[("12", 9), ("78", 12)]));
        signals.insert(SignalKind::ExhaustedJodi, map(&[("45", 4)]));

        let base = [
            (SignalKind::HighFrequencyJodi, 1.0),
            (SignalKind::ExtendedAbsenceJodi, 0.1),
            (SignalKind::ExhaustedJodi, -1.0),
        ];
        let score_of = |weights: &[(SignalKind, f64)], value: &str| {
            let cfg = settings(weights);
            ScoringEngine::new(&cfg)
                .score(&signals)
                .into_iter()
                .find(|c| c.value == value)
                .map(|c| c.score)
                .unwrap()
        };

        for i in 0..base.len() {
            let mut bumped = base;
            bumped[i].1 += 0.5;
            for value in ["12", "45", "78"] {
                assert!(score_of(&bumped[..], value) >= score_of(&base[..], value));
            }
        }
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let cfg = settings(&[(SignalKind::TrendAlignedJodi, 1.0)]);
        let mut signals = SignalMaps::new();
        signals.insert(SignalKind::TrendAlignedJodi, map(&[("56", 2), ("07", 2), ("31", 2)]));

        let values: Vec<String> = ScoringEngine::new(&cfg)
            .score(&signals)
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec!["07", "31", "56"]);
    }

    #[test]
    fn test_unweighted_signal_contributes_zero() {
        let cfg = settings(&[]);
        let mut signals = SignalMaps::new();
        signals.insert(SignalKind::HighFrequencyDigit, map(&[("4", 10)]));

        let ranked = ScoringEngine::new(&cfg).score(&signals);
        assert_eq!(ranked[0].score, 0.0);
        assert!(ranked[0].reasons.is_empty());
    }

    #[test]
    fn test_empty_signals_score_nothing() {
        let cfg = settings(&[]);
        assert!(ScoringEngine::new(&cfg).score(&SignalMaps::new()).is_empty());
    }
}
