//! Live validation: grade yesterday's snapshot against today's actual draw and
//! append the result to the validation log, at most once per draw date.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::snapshot::{read_snapshot_picks, snapshot_path};
use crate::data::validation_log::{ValidationRecord, append_record, logged_dates};
use crate::domain::normalize_jodi;
use crate::models::{HistoryStore, MISS_LABEL};

/// Number of snapshot picks graded
const GRADED_PICKS: usize = 5;

/// Grade the latest draw against the snapshot of the draw before it.
///
/// Returns the appended row, or Ok(None) when there is nothing to do: too little
/// history, the date is already logged, or the snapshot is missing. A snapshot
/// without picks is graded as a miss. The log file is held under an exclusive
/// lock across the check and the append.
pub fn validate(
    history: &HistoryStore,
    reports_dir: &Path,
    log_path: &Path,
) -> Result<Option<ValidationRecord>> {
    let calendar = history.calendar();
    let records = history.records();

    let Some(actual) = calendar.last_draw(records) else {
        log::warn!("No draw days in history; nothing to validate");
        return Ok(None);
    };
    let Some(previous) = calendar.previous_draw(records, actual.date) else {
        log::warn!("No draw before {}; nothing to validate", actual.date);
        return Ok(None);
    };

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(log_path)
        .with_context(|| format!("Failed to open validation log {}", log_path.display()))?;
    file.lock()
        .with_context(|| format!("Failed to lock validation log {}", log_path.display()))?;

    let is_new = file.metadata().context("Failed to stat validation log")?.len() == 0;
    if !is_new {
        file.seek(SeekFrom::Start(0))
            .context("Failed to rewind validation log")?;
        if logged_dates(&file)?.contains(&actual.date) {
            log::info!("Validation already logged for {}", actual.date);
            return Ok(None);
        }
    }

    let report_path = snapshot_path(reports_dir, previous.date);
    let Some(picks) = read_snapshot_picks(&report_path)? else {
        log::warn!("Missing snapshot {}; skipping validation", report_path.display());
        return Ok(None);
    };
    if picks.is_empty() {
        log::warn!("Snapshot {} has no picks; logging a miss", report_path.display());
    }

    let top5: Vec<&str> = picks
        .iter()
        .take(GRADED_PICKS)
        .map(|p| p.value.as_str())
        .collect();
    let actual_jodi = normalize_jodi(&actual.jodi);
    let position = top5.iter().position(|v| *v == actual_jodi);
    let confidence = position.map_or_else(|| MISS_LABEL.to_string(), |i| picks[i].confidence.clone());

    let record = ValidationRecord {
        date: actual.date,
        prediction_date: previous.date,
        actual_jodi,
        predicted_top5: top5.join(","),
        hit_rank: position.map_or(0, |i| i + 1),
        top1_hit: position.is_some_and(|i| i < 1),
        top3_hit: position.is_some_and(|i| i < 3),
        top5_hit: position.is_some(),
        confidence,
        report_path: report_path.display().to_string(),
    };

    append_record(&file, &record, is_new)?;
    file.unlock().context("Failed to unlock validation log")?;

    log::info!(
        "Validated {}: actual {} rank {} ({})",
        record.date,
        record.actual_jodi,
        record.hit_rank,
        record.confidence
    );
    Ok(Some(record))
}
