use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::pipeline::{SignalKind, SignalMaps};
use crate::models::{Reason, SignalMap};

/// `weight * magnitude` of one signal for `candidate`; None when the signal
/// does not mention it. A missing weight counts as zero.
pub fn contribution(
    kind: SignalKind,
    map: &SignalMap,
    candidate: &str,
    weights: &BTreeMap<SignalKind, f64>,
) -> Option<f64> {
    let magnitude = map.get(candidate)?;
    let weight = weights.get(&kind).copied().unwrap_or(0.0);
    Some(weight * f64::from(*magnitude))
}

/// Reasons whose signal moved `candidate`'s score, de-duplicated, in priority order.
pub fn reasons_for(
    candidate: &str,
    signals: &SignalMaps,
    weights: &BTreeMap<SignalKind, f64>,
) -> Vec<Reason> {
    signals
        .iter()
        .filter(|(kind, map)| {
            contribution(**kind, map, candidate, weights).is_some_and(|c| c != 0.0)
        })
        .map(|(kind, _)| kind.reason())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Human-readable form of `reasons_for`.
pub fn explain(
    candidate: &str,
    signals: &SignalMaps,
    weights: &BTreeMap<SignalKind, f64>,
) -> Vec<String> {
    reasons_for(candidate, signals, weights)
        .into_iter()
        .map(|r| r.to_string())
        .collect()
}
