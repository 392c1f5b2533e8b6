//! Error types and run-parameter validation

pub mod error;

pub use error::LocatorError;
