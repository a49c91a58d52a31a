pub mod core;
pub mod report;

// Re-export key components
pub use core::ForecastEngine;
pub use report::{DailyReport, Rankings};
