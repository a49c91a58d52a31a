use chrono::{NaiveDate, TimeDelta};

use crate::domain::{DrawCalendar, Field, Record};
use crate::error::HistoryError;

// ============================================================================
// HistoryStore: validated, date-ordered draw records
// ============================================================================

/// Immutable once built. Every time-bounded view is a `HistorySlice` borrowed
/// from here; nothing filters the store in place.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    records: Vec<Record>,
    calendar: DrawCalendar,
}

impl HistoryStore {
    /// Sorts by date and rejects duplicate dates and closed-day records.
    pub fn from_records(
        mut records: Vec<Record>,
        calendar: DrawCalendar,
    ) -> Result<Self, HistoryError> {
        records.sort_by_key(|r| r.date);

        if let Some(r) = records.iter().find(|r| !calendar.is_draw_day(r.date)) {
            return Err(HistoryError::ClosedDayRecord {
                date: r.date,
                weekday: calendar.closed_weekday,
            });
        }
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(HistoryError::DuplicateDate(pair[1].date));
        }

        Ok(Self { records, calendar })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn calendar(&self) -> DrawCalendar {
        self.calendar
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whole-history view.
    pub fn slice(&self) -> HistorySlice<'_> {
        HistorySlice {
            records: &self.records,
        }
    }
}

// ============================================================================
// HistorySlice: read-only windowed view into HistoryStore
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct HistorySlice<'a> {
    records: &'a [Record],
}

impl<'a> HistorySlice<'a> {
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// The first `len` records: strictly the past relative to record `len`.
    pub fn prefix(&self, len: usize) -> HistorySlice<'a> {
        HistorySlice {
            records: &self.records[..len.min(self.records.len())],
        }
    }

    /// Records with `date >= latest - lookback_days` (inclusive boundary). A
    /// lookback reaching past the representable date range covers the whole slice.
    pub fn trailing_window(&self, lookback_days: i64) -> HistorySlice<'a> {
        let Some(latest) = self.latest_date() else {
            return *self;
        };
        let Some(start) = TimeDelta::try_days(lookback_days.max(0))
            .and_then(|lookback| latest.checked_sub_signed(lookback))
        else {
            return *self;
        };
        let first = self.records.partition_point(|r| r.date < start);
        HistorySlice {
            records: &self.records[first..],
        }
    }

    /// Every observed value for `field`, oldest first.
    pub fn observations(&self, field: Field) -> Vec<(NaiveDate, String)> {
        self.records
            .iter()
            .flat_map(|r| r.values(field).into_iter().map(move |v| (r.date, v)))
            .collect()
    }

    /// Jodi sequence, oldest first.
    pub fn jodis(&self) -> Vec<String> {
        self.records.iter().map(|r| r.jodi.clone()).collect()
    }
}
