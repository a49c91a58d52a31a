//! "Exhausted" analysis.
//!
//! A value counts as exhausted when it occurs at least `min_count` times inside
//! the trailing window. This is a frequency threshold over the window, not a
//! detector of consecutive repeats.

use crate::analysis::frequency::FrequencyAnalyzer;
use crate::domain::Field;
use crate::models::{HistorySlice, SignalMap};

pub struct StreakAnalyzer<'a> {
    frequency: FrequencyAnalyzer<'a>,
}

impl<'a> StreakAnalyzer<'a> {
    pub fn new(slice: HistorySlice<'a>) -> Self {
        Self {
            frequency: FrequencyAnalyzer::new(slice),
        }
    }

    /// Values with at least `min_count` occurrences, mapped to their count.
    pub fn exhausted(&self, field: Field, lookback_days: i64, min_count: u32) -> SignalMap {
        // Zero-filled digits never count as exhausted, even with a zero threshold.
        let floor = min_count.max(1);
        self.frequency
            .counts(field, lookback_days)
            .into_iter()
            .filter(|(_, n)| *n >= floor)
            .collect()
    }
}
