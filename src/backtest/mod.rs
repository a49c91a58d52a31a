pub mod backtester;
pub mod summary;
pub mod validation;

pub use backtester::{BacktestRow, Backtester};
pub use summary::BacktestSummary;
pub use validation::validate;
