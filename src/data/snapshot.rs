//! Daily prediction snapshots: written after each analysis, read back when the
//! next draw is validated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{MonteCarloResult, PatternSummary};
use crate::config::{debug, snapshot_filename};
use crate::domain::normalize_jodi;
use crate::engine::DailyReport;
use crate::engine::report::{DISCLAIMER, REPORT_TITLE};
use crate::models::{ScoredCandidate, SignalMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPick {
    pub value: String,
    pub confidence: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl From<&ScoredCandidate> for SnapshotPick {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            value: candidate.value.clone(),
            confidence: candidate.confidence.to_string(),
            score: candidate.score,
            reasons: candidate.reason_labels(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub top_picks_with_confidence: Vec<SnapshotPick>,
    pub hot_digits: SignalMap,
    pub cold_digits: SignalMap,
    pub hot_jodis: SignalMap,
    pub cold_jodis: SignalMap,
    pub top_digits: Vec<SnapshotPick>,
    pub top_sangams: Vec<SnapshotPick>,
    pub pick_cycle_gaps: BTreeMap<String, Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    pub date: NaiveDate,
    pub records_analyzed: usize,
    pub daily_summary: DailySummary,
    pub ranked_picks: Vec<SnapshotPick>,
    pub patterns: PatternSummary,
    pub monte_carlo: MonteCarloResult,
    pub disclaimer: String,
}

/// How many digit and sangam picks go into the summary
const SECONDARY_PICKS: usize = 3;

fn picks(list: &[ScoredCandidate], n: usize) -> Vec<SnapshotPick> {
    list.iter().take(n).map(SnapshotPick::from).collect()
}

impl Snapshot {
    /// None for an undated (empty-history) report.
    pub fn from_report(report: &DailyReport) -> Option<Self> {
        Some(Self {
            title: REPORT_TITLE.to_string(),
            date: report.date?,
            records_analyzed: report.records_analyzed,
            daily_summary: DailySummary {
                top_picks_with_confidence: picks(&report.top_picks, report.top_picks.len()),
                hot_digits: report.hot_digits.clone(),
                cold_digits: report.cold_digits.clone(),
                hot_jodis: report.hot_jodis.clone(),
                cold_jodis: report.cold_jodis.clone(),
                top_digits: picks(&report.rankings.digits, SECONDARY_PICKS),
                top_sangams: picks(&report.rankings.sangams, SECONDARY_PICKS),
                pick_cycle_gaps: report.pick_cycle_gaps.clone(),
            },
            ranked_picks: picks(&report.rankings.jodis, report.rankings.jodis.len()),
            patterns: report.patterns.clone(),
            monte_carlo: report.monte_carlo.clone(),
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}

pub fn snapshot_path(reports_dir: &Path, date: NaiveDate) -> PathBuf {
    reports_dir.join(snapshot_filename(date))
}

/// Write the report's snapshot into `reports_dir`, returning its path.
/// Ok(None) when the report has no date to name the file after.
pub fn write_snapshot(report: &DailyReport, reports_dir: &Path) -> Result<Option<PathBuf>> {
    let Some(snapshot) = Snapshot::from_report(report) else {
        log::warn!("Report has no draw date; snapshot not written");
        return Ok(None);
    };
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("Failed to create {}", reports_dir.display()))?;
    let path = snapshot_path(reports_dir, snapshot.date);
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    if debug::PRINT_SERDE {
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(Some(path))
}

/// Picks recorded in a snapshot: `daily_summary.top_picks_with_confidence`,
/// falling back to `ranked_picks`. Ok(None) when the file does not exist.
///
/// Parsed loosely so older snapshots with numeric values or missing tiers still
/// load. A pick without a tier reads as "Hit".
pub fn read_snapshot_picks(path: &Path) -> Result<Option<Vec<SnapshotPick>>> {
    if !path.exists() {
        return Ok(None);
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    if debug::PRINT_SERDE {
        log::info!("Snapshot read from {}", path.display());
    }

    let non_empty = |v: Option<&Value>| v.and_then(Value::as_array).filter(|a| !a.is_empty()).cloned();
    let entries = non_empty(json.pointer("/daily_summary/top_picks_with_confidence"))
        .or_else(|| non_empty(json.get("ranked_picks")))
        .unwrap_or_default();

    let picks = entries
        .iter()
        .filter_map(|entry| {
            let value = match entry.get("value")? {
                Value::String(s) => normalize_jodi(s),
                Value::Number(n) => normalize_jodi(&n.to_string()),
                _ => return None,
            };
            let confidence = entry
                .get("confidence")
                .and_then(Value::as_str)
                .unwrap_or("Hit")
                .to_string();
            Some(SnapshotPick {
                value,
                confidence,
                score: entry.get("score").and_then(Value::as_f64).unwrap_or(0.0),
                reasons: Vec::new(),
            })
        })
        .collect();
    Ok(Some(picks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::engine::ForecastEngine;
    use crate::test_utils::{cycling_jodis, history};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_written_snapshot_reads_back_top_picks() {
        let jodis = cycling_jodis(4);
        let refs: Vec<&str> = jodis.iter().map(|s| s.as_str()).collect();
        let store = history(&refs);
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let report = engine.daily_report(&store, &mut StdRng::seed_from_u64(3));

        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(&report, dir.path()).unwrap().unwrap();
        assert_eq!(path, snapshot_path(dir.path(), report.date.unwrap()));

        let picks = read_snapshot_picks(&path).unwrap().unwrap();
        let expected: Vec<String> = report.top_picks.iter().map(|c| c.value.clone()).collect();
        let got: Vec<String> = picks.iter().map(|p| p.value.clone()).collect();
        assert_eq!(got, expected);
        assert_eq!(picks[0].confidence, report.top_picks[0].confidence.to_string());

        let text = std::fs::read_to_string(&path).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snapshot.patterns, report.patterns);
        assert_eq!(snapshot.daily_summary.pick_cycle_gaps, report.pick_cycle_gaps);
    }

    #[test]
    fn test_falls_back_to_ranked_picks_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        let json = r#"{
            "daily_summary": { "top_picks_with_confidence": [] },
            "ranked_picks": [ { "value": 7, "confidence": "Medium" }, { "value": "45" } ]
        }"#;
        std::fs::write(&path, json).unwrap();

        let picks = read_snapshot_picks(&path).unwrap().unwrap();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].value, "07");
        assert_eq!(picks[0].confidence, "Medium");
        assert_eq!(picks[1].confidence, "Hit");
    }

    #[test]
    fn test_empty_history_writes_no_snapshot() {
        let store = history(&[]);
        let engine = ForecastEngine::new(AnalysisConfig::default());
        let report = engine.daily_report(&store, &mut StdRng::seed_from_u64(3));

        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        assert!(write_snapshot(&report, &reports).unwrap().is_none());
        assert!(!reports.exists());
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_snapshot_picks(&dir.path().join("none.json")).unwrap().is_none());
    }
}
