//! Signal modelling, multilateration, and room classification

pub mod estimator;
pub mod rooms;
pub mod signal_model;

pub use estimator::{PositionEstimator, RawEstimate, TriangulationStrategy};
pub use rooms::{RoomClassifier, RoomRule};
pub use signal_model::SignalModel;
