use std::collections::BTreeMap;

/// Candidate value -> signal strength (an occurrence count or days since last seen).
/// A missing key means the signal did not fire for that candidate. Ordered so that
/// iteration, and every ranking built from it, is deterministic.
pub type SignalMap = BTreeMap<String, u32>;

/// Entries ordered by strength descending, then candidate ascending.
pub fn ranked_desc(map: &SignalMap) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // BTreeMap order is already ascending by key, so a stable sort keeps ties in key order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}
