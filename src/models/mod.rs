// Domain models for draw analysis
// These modules contain pure business logic independent of I/O

pub mod candidate;
pub mod history;
pub mod signal_map;

// Re-export key types for convenience
pub use candidate::{Confidence, MISS_LABEL, Reason, ScoredCandidate, hit_label};
pub use history::{HistorySlice, HistoryStore};
pub use signal_map::{SignalMap, ranked_desc};
