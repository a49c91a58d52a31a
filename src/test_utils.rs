//! Shared fixtures for unit tests.

use chrono::{Duration, NaiveDate};

use crate::domain::{DrawCalendar, Record};
use crate::models::HistoryStore;

/// Monday 2025-01-06.
pub fn first_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

/// Record for `jodi` whose sangams are `{open}11` and `{close}22`.
pub fn record(date: NaiveDate, jodi: &str) -> Record {
    let open = jodi[..1].parse::<u8>().unwrap();
    let close = jodi[1..].parse::<u8>().unwrap();
    Record::new(date, open, close, jodi, format!("{open}11"), format!("{close}22")).unwrap()
}

/// `n` consecutive draw days from `start`, skipping the closed weekday.
pub fn draw_dates(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let calendar = DrawCalendar::default();
    let mut date = start;
    let mut dates = Vec::with_capacity(n);
    while dates.len() < n {
        if calendar.is_draw_day(date) {
            dates.push(date);
        }
        date += Duration::days(1);
    }
    dates
}

/// One record per jodi on consecutive draw days from `first_monday()`.
pub fn history(jodis: &[&str]) -> HistoryStore {
    let records = draw_dates(first_monday(), jodis.len())
        .into_iter()
        .zip(jodis)
        .map(|(date, jodi)| record(date, jodi))
        .collect();
    HistoryStore::from_records(records, DrawCalendar::default()).unwrap()
}

/// Records on explicit dates (must be draw days).
pub fn history_on(entries: &[(NaiveDate, &str)]) -> HistoryStore {
    let records = entries.iter().map(|(d, j)| record(*d, j)).collect();
    HistoryStore::from_records(records, DrawCalendar::default()).unwrap()
}

/// Ten jodis `00`..`09`, repeated `cycles` times.
pub fn cycling_jodis(cycles: usize) -> Vec<String> {
    (0..10 * cycles).map(|i| format!("{:02}", i % 10)).collect()
}
