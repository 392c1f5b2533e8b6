//! Window aggregation and trajectory smoothing

pub mod smoother;
pub mod window;

pub use smoother::TrajectorySmoother;
pub use window::{WindowAdvance, WindowAggregator, WindowSummary};
