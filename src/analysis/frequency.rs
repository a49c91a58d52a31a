//! Hot/cold frequency analysis over a trailing window.

use itertools::Itertools;

use crate::domain::Field;
use crate::models::{HistorySlice, SignalMap, ranked_desc};

pub struct FrequencyAnalyzer<'a> {
    slice: HistorySlice<'a>,
}

impl<'a> FrequencyAnalyzer<'a> {
    pub fn new(slice: HistorySlice<'a>) -> Self {
        Self { slice }
    }

    /// Full occurrence counts inside the window. Digits are zero-filled across 0-9
    /// when the window holds any record; other fields list only observed values.
    pub fn counts(&self, field: Field, lookback_days: i64) -> SignalMap {
        let window = self.slice.trailing_window(lookback_days);
        let mut counts: SignalMap = window
            .observations(field)
            .into_iter()
            .map(|(_, value)| value)
            .counts()
            .into_iter()
            .map(|(value, n)| (value, n as u32))
            .collect();

        if field == Field::Digit && !window.is_empty() {
            for digit in 0..=9u8 {
                counts.entry(digit.to_string()).or_insert(0);
            }
        }
        counts
    }

    /// Top `top_n` by count, ties broken by candidate ascending.
    pub fn hot(&self, field: Field, lookback_days: i64, top_n: usize) -> SignalMap {
        ranked_desc(&self.counts(field, lookback_days))
            .into_iter()
            .take(top_n)
            .collect()
    }

    /// Bottom `top_n` by count, ties broken by candidate ascending.
    pub fn cold(&self, field: Field, lookback_days: i64, top_n: usize) -> SignalMap {
        self.counts(field, lookback_days)
            .into_iter()
            .sorted_by(|a, b| a.1.cmp(&b.1))
            .take(top_n)
            .collect()
    }
}
