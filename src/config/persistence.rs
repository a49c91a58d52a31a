//! File persistence and serialization configuration

use chrono::NaiveDate;

use crate::utils::TimeUtils;

/// Default draw history CSV
pub const HISTORY_PATH: &str = "data/kalyan.csv";

/// Directory holding daily prediction snapshots
pub const REPORTS_DIR: &str = "reports";

/// Append-only validation log
pub const VALIDATION_LOG_PATH: &str = "reports/validation_log_v2.csv";

/// Base filename for prediction snapshots (without date or extension)
pub const SNAPSHOT_FILENAME_PREFIX: &str = "kalyan_analysis";

/// Snapshot filename for the draw day the prediction was made on.
/// Example: "kalyan_analysis_2025-03-04.json"
pub fn snapshot_filename(date: NaiveDate) -> String {
    format!(
        "{}_{}.json",
        SNAPSHOT_FILENAME_PREFIX,
        TimeUtils::format_date(date)
    )
}
