//! Typed validation errors for draw records and history construction.
//!
//! Application flows wrap these in `anyhow` at I/O boundaries; the types stay
//! distinguishable so callers can match on the exact failure.

use chrono::{NaiveDate, Weekday};
use std::fmt;

use crate::domain::record::Side;

/// A single record failed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Digit outside 0-9
    DigitOutOfRange { side: Side, value: u8 },
    /// Jodi is not exactly two ASCII digits
    BadJodi(String),
    /// Sangam code is not exactly three characters
    BadSangamLength { side: Side, code: String },
    /// Sangam code does not start with its side's digit
    SangamDigitMismatch { side: Side, code: String, digit: u8 },
}

impl std::error::Error for RecordError {}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::DigitOutOfRange { side, value } => {
                write!(f, "{} digit {} is outside 0-9", side, value)
            }
            RecordError::BadJodi(jodi) => write!(f, "jodi '{}' is not two digits", jodi),
            RecordError::BadSangamLength { side, code } => {
                write!(f, "{} sangam '{}' is not three characters", side, code)
            }
            RecordError::SangamDigitMismatch { side, code, digit } => write!(
                f,
                "{} sangam '{}' does not start with {} digit {}",
                side, code, side, digit
            ),
        }
    }
}

/// History could not be assembled from its records or source file.
#[derive(Debug)]
pub enum HistoryError {
    /// Two records share a date
    DuplicateDate(NaiveDate),
    /// A record falls on the weekly closed day
    ClosedDayRecord { date: NaiveDate, weekday: Weekday },
    /// A required column is absent from the source header
    MissingColumn(String),
    /// A source row could not be turned into a record
    BadRow { line: u64, reason: String },
    /// A record failed field validation
    InvalidRecord { date: NaiveDate, source: RecordError },
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::DuplicateDate(date) => write!(f, "duplicate record for {}", date),
            HistoryError::ClosedDayRecord { date, weekday } => {
                write!(f, "record on closed day {} ({})", date, weekday)
            }
            HistoryError::MissingColumn(column) => write!(f, "missing required column '{}'", column),
            HistoryError::BadRow { line, reason } => write!(f, "line {}: {}", line, reason),
            HistoryError::InvalidRecord { date, source } => {
                write!(f, "invalid record for {}: {}", date, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_record_exposes_source() {
        let err = HistoryError::InvalidRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            source: RecordError::BadJodi("7".to_string()),
        };
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid record for 2025-03-04: jodi '7' is not two digits"
        );
    }
}
