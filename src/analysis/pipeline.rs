//! Signal registry: every scorable signal, which candidates it ranks, and how
//! it is computed from a history slice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::absence::AbsenceAnalyzer;
use crate::analysis::frequency::FrequencyAnalyzer;
use crate::analysis::sangam::SangamAnalyzer;
use crate::analysis::streak::StreakAnalyzer;
use crate::config::AnalysisConfig;
use crate::domain::{Field, Side};
use crate::models::{HistorySlice, Reason, SignalMap};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum SignalKind {
    HighFrequencyJodi,
    TrendAlignedJodi,
    ExtendedAbsenceJodi,
    ExhaustedJodi,
    HighFrequencyDigit,
    ExtendedAbsenceDigit,
    ExhaustedDigit,
    HighFrequencyOpenSangam,
    HighFrequencyCloseSangam,
    ExtendedAbsenceOpenSangam,
    ExtendedAbsenceCloseSangam,
}

/// Candidate family a signal ranks. Families are scored separately.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum PickTarget {
    Jodi,
    Digit,
    Sangam,
}

/// Signal maps keyed by the signal that produced them.
pub type SignalMaps = BTreeMap<SignalKind, SignalMap>;

pub const DEFAULT_PIPELINE: [SignalKind; 11] = [
    SignalKind::HighFrequencyJodi,
    SignalKind::TrendAlignedJodi,
    SignalKind::ExtendedAbsenceJodi,
    SignalKind::ExhaustedJodi,
    SignalKind::HighFrequencyDigit,
    SignalKind::ExtendedAbsenceDigit,
    SignalKind::ExhaustedDigit,
    SignalKind::HighFrequencyOpenSangam,
    SignalKind::HighFrequencyCloseSangam,
    SignalKind::ExtendedAbsenceOpenSangam,
    SignalKind::ExtendedAbsenceCloseSangam,
];

impl SignalKind {
    pub fn target(self) -> PickTarget {
        use SignalKind::*;
        match self {
            HighFrequencyJodi | TrendAlignedJodi | ExtendedAbsenceJodi | ExhaustedJodi => {
                PickTarget::Jodi
            }
            HighFrequencyDigit | ExtendedAbsenceDigit | ExhaustedDigit => PickTarget::Digit,
            HighFrequencyOpenSangam
            | HighFrequencyCloseSangam
            | ExtendedAbsenceOpenSangam
            | ExtendedAbsenceCloseSangam => PickTarget::Sangam,
        }
    }

    pub fn reason(self) -> Reason {
        use SignalKind::*;
        match self {
            HighFrequencyJodi | HighFrequencyDigit => Reason::HighFrequency,
            TrendAlignedJodi => Reason::TrendWindow,
            ExtendedAbsenceJodi | ExtendedAbsenceDigit => Reason::ExtendedAbsence,
            HighFrequencyOpenSangam
            | HighFrequencyCloseSangam
            | ExtendedAbsenceOpenSangam
            | ExtendedAbsenceCloseSangam => Reason::SangamSupport,
            ExhaustedJodi | ExhaustedDigit => Reason::Exhausted,
        }
    }
}

/// Compute one signal over `slice` using the configured windows.
pub fn compute_signal(kind: SignalKind, slice: HistorySlice<'_>, config: &AnalysisConfig) -> SignalMap {
    let frequency = FrequencyAnalyzer::new(slice);
    let absence = AbsenceAnalyzer::new(slice);
    let streak = StreakAnalyzer::new(slice);
    let sangam = SangamAnalyzer::new(slice);

    let f = &config.frequency;
    let a = &config.absence;
    let e = &config.exhaustion;
    let s = &config.sangam;

    match kind {
        SignalKind::HighFrequencyJodi => frequency.hot(Field::Jodi, f.lookback_days, f.top_n),
        SignalKind::TrendAlignedJodi => {
            frequency.hot(Field::Jodi, config.trend.lookback_days, config.trend.top_n)
        }
        SignalKind::ExtendedAbsenceJodi => {
            absence.due(Field::Jodi, a.lookback_days, a.threshold_days)
        }
        SignalKind::ExhaustedJodi => streak.exhausted(Field::Jodi, e.lookback_days, e.jodi_min_count),
        SignalKind::HighFrequencyDigit => frequency.hot(Field::Digit, f.lookback_days, f.top_n),
        SignalKind::ExtendedAbsenceDigit => {
            absence.due(Field::Digit, a.lookback_days, a.threshold_days)
        }
        SignalKind::ExhaustedDigit => {
            streak.exhausted(Field::Digit, e.lookback_days, e.digit_min_count)
        }
        SignalKind::HighFrequencyOpenSangam => {
            sangam.hot(Side::Open, s.hot_lookback_days, s.hot_top_n)
        }
        SignalKind::HighFrequencyCloseSangam => {
            sangam.hot(Side::Close, s.hot_lookback_days, s.hot_top_n)
        }
        SignalKind::ExtendedAbsenceOpenSangam => {
            sangam.due(Side::Open, s.due_lookback_days, s.due_threshold_days)
        }
        SignalKind::ExtendedAbsenceCloseSangam => {
            sangam.due(Side::Close, s.due_lookback_days, s.due_threshold_days)
        }
    }
}

/// Run the configured pipeline, keeping only signals for `target`.
pub fn compute_signals(
    slice: HistorySlice<'_>,
    config: &AnalysisConfig,
    target: PickTarget,
) -> SignalMaps {
    config
        .pipeline
        .iter()
        .filter(|kind| kind.target() == target)
        .map(|&kind| (kind, compute_signal(kind, slice, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::history;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_pipeline_covers_every_signal() {
        let all: Vec<SignalKind> = SignalKind::iter().collect();
        assert_eq!(all, DEFAULT_PIPELINE.to_vec());
    }

    #[test]
    fn test_compute_signals_filters_by_target() {
        let store = history(&["12", "34", "12"]);
        let config = AnalysisConfig::default();

        let jodi = compute_signals(store.slice(), &config, PickTarget::Jodi);
        assert!(jodi.keys().all(|k| k.target() == PickTarget::Jodi));
        assert_eq!(jodi[&SignalKind::HighFrequencyJodi].get("12"), Some(&2));

        let sangam = compute_signals(store.slice(), &config, PickTarget::Sangam);
        assert_eq!(sangam.len(), 4);
    }

    #[test]
    fn test_pipeline_order_is_config_driven() {
        let store = history(&["12", "34"]);
        let mut config = AnalysisConfig::default();
        config.pipeline = vec![SignalKind::TrendAlignedJodi];

        let signals = compute_signals(store.slice(), &config, PickTarget::Jodi);
        assert_eq!(signals.len(), 1);
        assert!(signals.contains_key(&SignalKind::TrendAlignedJodi));
    }

    #[test]
    fn test_empty_slice_gives_empty_signals() {
        let store = history(&["12"]);
        let config = AnalysisConfig::default();
        for kind in SignalKind::iter() {
            assert!(compute_signal(kind, store.slice().prefix(0), &config).is_empty());
        }
    }
}
