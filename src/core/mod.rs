//! Core data types and deployment constants

pub mod constants;
pub mod types;

pub use types::{Hit, ObservationPeriod, ReceiverStats, TrajectoryPoint};
