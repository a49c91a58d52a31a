// Domain types and value objects
pub mod calendar;
pub mod record;

// Re-export commonly used types
pub use calendar::DrawCalendar;
pub use record::{Field, Record, Side, normalize_jodi};
