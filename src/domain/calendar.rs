//! Draw-day calendar: one weekday per week has no draw.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCalendar {
    pub closed_weekday: Weekday,
}

impl Default for DrawCalendar {
    fn default() -> Self {
        Self {
            closed_weekday: Weekday::Sun,
        }
    }
}

impl DrawCalendar {
    pub fn new(closed_weekday: Weekday) -> Self {
        Self { closed_weekday }
    }

    #[inline]
    pub fn is_draw_day(&self, date: NaiveDate) -> bool {
        date.weekday() != self.closed_weekday
    }

    /// Latest record that falls on a draw day. `records` must be sorted by date.
    pub fn last_draw<'a>(&self, records: &'a [Record]) -> Option<&'a Record> {
        records.iter().rev().find(|r| self.is_draw_day(r.date))
    }

    /// First draw day strictly after `after`.
    pub fn next_draw_day(&self, after: NaiveDate) -> Option<NaiveDate> {
        after
            .iter_days()
            .skip(1)
            .take(7)
            .find(|d| self.is_draw_day(*d))
    }

    /// Latest draw-day record strictly before `before`.
    pub fn previous_draw<'a>(&self, records: &'a [Record], before: NaiveDate) -> Option<&'a Record> {
        records
            .iter()
            .rev()
            .find(|r| r.date < before && self.is_draw_day(r.date))
    }
}
