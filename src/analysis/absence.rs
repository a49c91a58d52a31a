//! "Due" analysis: candidates that have not shown up for a while.
//!
//! Only values seen at least once inside the lookback window are considered;
//! a value with no appearance in the window gets no entry at all.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::Field;
use crate::models::{HistorySlice, SignalMap};

pub struct AbsenceAnalyzer<'a> {
    slice: HistorySlice<'a>,
}

impl<'a> AbsenceAnalyzer<'a> {
    pub fn new(slice: HistorySlice<'a>) -> Self {
        Self { slice }
    }

    /// Most recent appearance date of every value seen in the window.
    pub fn last_seen(&self, field: Field, lookback_days: i64) -> BTreeMap<String, NaiveDate> {
        let mut last = BTreeMap::new();
        // Observations are oldest first, so later inserts overwrite earlier dates.
        for (date, value) in self.slice.trailing_window(lookback_days).observations(field) {
            last.insert(value, date);
        }
        last
    }

    /// Values whose calendar-day gap to the latest date is at least `threshold_days`,
    /// mapped to that gap.
    pub fn due(&self, field: Field, lookback_days: i64, threshold_days: i64) -> SignalMap {
        let Some(latest) = self.slice.latest_date() else {
            return SignalMap::new();
        };

        self.last_seen(field, lookback_days)
            .into_iter()
            .filter_map(|(value, seen)| {
                let gap = (latest - seen).num_days();
                (gap >= threshold_days).then_some((value, gap as u32))
            })
            .collect()
    }
}
