//! Append-only CSV log of predictions graded against the actual draw.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::TimeUtils;
use crate::utils::maths_utils::pct;

/// Column order of the log file.
pub const LOG_HEADER: [&str; 10] = [
    "date",
    "prediction_date",
    "actual_jodi",
    "predicted_top5",
    "hit_rank",
    "top1_hit",
    "top3_hit",
    "top5_hit",
    "confidence",
    "report_path",
];

/// One graded draw day. Field order matches `LOG_HEADER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Day whose actual jodi was graded
    pub date: NaiveDate,
    /// Day the graded snapshot was produced
    pub prediction_date: NaiveDate,
    pub actual_jodi: String,
    /// Comma-joined top-5 jodis
    pub predicted_top5: String,
    /// 1-based rank of the actual jodi in the top 5; 0 on a miss
    pub hit_rank: usize,
    #[serde(deserialize_with = "lenient_bool")]
    pub top1_hit: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub top3_hit: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub top5_hit: bool,
    pub confidence: String,
    pub report_path: String,
}

/// Accepts `true`/`false` in any case, plus `1`/`0`, so logs written by other
/// tools (`True`/`False`) still load.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid boolean {:?}", other))),
    }
}

#[derive(Deserialize)]
struct LoggedDate {
    date: String,
}

/// Dates already present in a log. Rows with an unreadable date are skipped.
pub fn logged_dates<R: Read>(reader: R) -> Result<BTreeSet<NaiveDate>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut dates = BTreeSet::new();
    for row in csv_reader.deserialize::<LoggedDate>() {
        let row = row.context("Failed to read validation log row")?;
        if let Some(date) = TimeUtils::parse_date(&row.date) {
            dates.insert(date);
        }
    }
    Ok(dates)
}

/// Write one row, preceded by the header when `write_header` is set.
pub fn append_record<W: Write>(writer: W, record: &ValidationRecord, write_header: bool) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(writer);
    csv_writer
        .serialize(record)
        .context("Failed to serialize validation record")?;
    csv_writer.flush().context("Failed to flush validation log")?;
    Ok(())
}

/// All rows of the log at `path`. A missing file is an empty log.
pub fn read_log(path: &Path) -> Result<Vec<ValidationRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open validation log {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<ValidationRecord>, _>>()
        .with_context(|| format!("Failed to parse validation log {}", path.display()))
}

/// Live hit rates from the validation log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitRateSummary {
    pub games: usize,
    pub top1_hits: usize,
    pub top3_hits: usize,
    pub top5_hits: usize,
    pub top5_rate: f64,
}

pub fn summarize(records: &[ValidationRecord]) -> HitRateSummary {
    let top5_hits = records.iter().filter(|r| r.top5_hit).count();
    HitRateSummary {
        games: records.len(),
        top1_hits: records.iter().filter(|r| r.top1_hit).count(),
        top3_hits: records.iter().filter(|r| r.top3_hit).count(),
        top5_hits,
        top5_rate: pct(top5_hits, records.len()),
    }
}

impl HitRateSummary {
    pub fn log_summary(&self) {
        if self.games == 0 {
            log::warn!("Validation log is empty");
            return;
        }
        log::info!("Games validated: {}", self.games);
        log::info!("Top-1 hits: {}", self.top1_hits);
        log::info!("Top-3 hits: {}", self.top3_hits);
        log::info!("Top-5 hits: {}", self.top5_hits);
        log::info!("Hit rate (top-5): {:.2}%", self.top5_rate);
    }
}
