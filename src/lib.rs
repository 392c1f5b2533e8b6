//! Indoor Locator
//!
//! Estimates a moving person's 2-D trajectory inside a building from
//! noisy BLE proximity hits logged by fixed receivers. A sliding-window
//! multilateration engine turns sparse, asynchronous RSSI readings into
//! a smoothed, timestamped path with a room label per point.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod utils;
pub mod validation;
pub mod locator;

// Re-export commonly used types
pub use crate::core::{Hit, ObservationPeriod, ReceiverStats, TrajectoryPoint};
pub use algorithms::estimator::{PositionEstimator, RawEstimate, TriangulationStrategy};
pub use algorithms::rooms::{RoomClassifier, RoomRule};
pub use algorithms::signal_model::SignalModel;
pub use processing::smoother::TrajectorySmoother;
pub use processing::window::{WindowAdvance, WindowAggregator, WindowSummary};
pub use utils::config::{
    LocatorConfig, MapConfig, ReceiverPosition, ReceiverTable, SignalConfig, SmoothingConfig,
    WindowConfig,
};
pub use validation::LocatorError;
pub use locator::Locator;
