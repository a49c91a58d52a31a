// History loading, snapshot persistence and the validation log
pub mod history_csv;
pub mod snapshot;
pub mod validation_log;

// Re-export commonly used types
pub use history_csv::{load_history, parse_history};
pub use snapshot::{Snapshot, SnapshotPick, read_snapshot_picks, snapshot_path, write_snapshot};
pub use validation_log::{HitRateSummary, ValidationRecord, read_log, summarize};
