use anyhow::{Context, Result};
use jodi_sniper::config::VALIDATION_LOG_PATH;
use jodi_sniper::data::{read_log, summarize};
use std::path::PathBuf;

fn main() -> Result<()> {
    print_hit_rate()
}

fn print_hit_rate() -> Result<()> {
    // Optional first argument overrides the default log path
    let log_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(VALIDATION_LOG_PATH));

    let records =
        read_log(&log_path).with_context(|| format!("Failed to load {:?}", log_path))?;
    if records.is_empty() {
        println!("No validation data yet in {:?}", log_path);
        return Ok(());
    }

    let summary = summarize(&records);
    println!("Total games validated: {}", summary.games);
    println!("Top-1 hits: {}", summary.top1_hits);
    println!("Top-3 hits: {}", summary.top3_hits);
    println!("Top-5 hits: {}", summary.top5_hits);
    println!("Hit rate (top-5): {:.2}%", summary.top5_rate);

    if let Some(last) = records.last() {
        println!(
            "Last validated: {} (actual {}, {})",
            last.date, last.actual_jodi, last.confidence
        );
    }
    Ok(())
}
