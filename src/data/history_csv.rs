//! Draw history loader.
//!
//! Headers are normalized (trimmed, lowercased, spaces to `_`) and the legacy
//! `panel` column is read as `sangam`. Sangams come either from
//! `open_sangam`/`close_sangam` columns or from a combined `sangam` column in
//! `OOO-JJ-CCC` form. A missing `jodi` column is derived from open + close.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Deserialize;

use crate::config::debug;
use crate::domain::{DrawCalendar, Record, normalize_jodi};
use crate::error::HistoryError;
use crate::models::HistoryStore;
use crate::utils::TimeUtils;

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    #[serde(default)]
    open: Option<String>,
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    jodi: Option<String>,
    #[serde(default)]
    open_sangam: Option<String>,
    #[serde(default)]
    close_sangam: Option<String>,
    #[serde(default)]
    sangam: Option<String>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Blank or placeholder ("**") draw fields mean no draw that day.
fn is_blank(field: &Option<String>) -> bool {
    field
        .as_deref()
        .is_none_or(|s| s.trim().chars().all(|c| c == '*'))
}

fn check_columns(headers: &StringRecord) -> Result<(), HistoryError> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    for required in ["date", "open", "close"] {
        if !has(required) {
            return Err(HistoryError::MissingColumn(required.to_string()));
        }
    }
    if !has("sangam") {
        for required in ["open_sangam", "close_sangam"] {
            if !has(required) {
                return Err(HistoryError::MissingColumn(required.to_string()));
            }
        }
    }
    Ok(())
}

fn parse_digit(raw: &str, name: &str, line: u64) -> Result<u8, HistoryError> {
    raw.trim().parse::<u8>().map_err(|_| HistoryError::BadRow {
        line,
        reason: format!("{} '{}' is not a digit", name, raw),
    })
}

/// Open and close sangam for a row, preferring the split columns.
fn sangams(row: &RawRow, line: u64) -> Result<(String, String), HistoryError> {
    if let (Some(open), Some(close)) = (&row.open_sangam, &row.close_sangam) {
        return Ok((open.trim().to_string(), close.trim().to_string()));
    }
    let combined = row.sangam.as_deref().unwrap_or("").trim();
    let parts: Vec<&str> = combined.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [open, _, close] => Ok((open.to_string(), close.to_string())),
        _ => Err(HistoryError::BadRow {
            line,
            reason: format!("sangam '{}' is not in OOO-JJ-CCC form", combined),
        }),
    }
}

/// Parse CSV text into a validated history.
pub fn parse_history<R: Read>(reader: R, calendar: DrawCalendar) -> Result<HistoryStore, HistoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let raw_headers = csv_reader.headers().map_err(|e| HistoryError::BadRow {
        line: 1,
        reason: e.to_string(),
    })?;
    let mut names: Vec<String> = raw_headers.iter().map(normalize_header).collect();
    if !names.iter().any(|n| n == "sangam")
        && let Some(panel) = names.iter_mut().find(|n| *n == "panel")
    {
        *panel = "sangam".to_string();
    }
    let headers = StringRecord::from(names);
    check_columns(&headers)?;

    let mut records = Vec::new();
    let mut skipped_blank = 0usize;
    let mut skipped_closed = 0usize;

    for result in csv_reader.records() {
        let row = result.map_err(|e| HistoryError::BadRow {
            line: e.position().map_or(0, |p| p.line()),
            reason: e.to_string(),
        })?;
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRow = row.deserialize(Some(&headers)).map_err(|e| HistoryError::BadRow {
            line,
            reason: e.to_string(),
        })?;

        let date = TimeUtils::parse_date(&raw.date).ok_or_else(|| HistoryError::BadRow {
            line,
            reason: format!("unreadable date '{}'", raw.date),
        })?;

        if is_blank(&raw.open) || is_blank(&raw.close) {
            skipped_blank += 1;
            if debug::PRINT_SKIPPED_ROWS {
                log::debug!("line {}: no draw on {}, skipped", line, date);
            }
            continue;
        }
        if !calendar.is_draw_day(date) {
            skipped_closed += 1;
            if debug::PRINT_SKIPPED_ROWS {
                log::warn!("line {}: {} falls on the closed day, skipped", line, date);
            }
            continue;
        }

        let open = parse_digit(raw.open.as_deref().unwrap_or(""), "open", line)?;
        let close = parse_digit(raw.close.as_deref().unwrap_or(""), "close", line)?;
        let jodi = match raw.jodi.as_deref() {
            Some(j) if !j.trim().is_empty() => normalize_jodi(j),
            _ => format!("{}{}", open, close),
        };
        let (open_sangam, close_sangam) = sangams(&raw, line)?;

        let record = Record::new(date, open, close, jodi, open_sangam, close_sangam)
            .map_err(|source| HistoryError::InvalidRecord { date, source })?;
        records.push(record);
    }

    if skipped_blank + skipped_closed > 0 {
        log::info!(
            "Skipped {} rows without a draw and {} closed-day rows",
            skipped_blank,
            skipped_closed
        );
    }

    HistoryStore::from_records(records, calendar)
}

/// Load and validate the history CSV at `path`.
pub fn load_history(path: &Path, calendar: DrawCalendar) -> Result<HistoryStore> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open history {}", path.display()))?;
    let history = parse_history(file, calendar)
        .with_context(|| format!("Invalid history in {}", path.display()))?;
    log::info!("Loaded {} draws from {}", history.len(), path.display());
    Ok(history)
}
