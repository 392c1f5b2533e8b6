use std::fmt;
use serde::{Serialize, Deserialize};

/// Error classification for the locator pipeline
///
/// Configuration-integrity problems are fatal to a run; everything else
/// (empty windows, degenerate radii) is absorbed by the pipeline itself
/// and never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocatorError {
    /// A hit references a receiver with no entry in the position table
    UnknownReceiver {
        receiver_id: u16,
    },
    /// A configuration parameter is outside its valid range
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration or receiver-table file I/O failure
    IoError {
        message: String,
    },
    /// JSON serialization/deserialization failure
    SerializationError {
        message: String,
    },
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::UnknownReceiver { receiver_id } => {
                write!(
                    f,
                    "receiver {} appears in the hit log but has no entry in the receiver position table",
                    receiver_id
                )
            }
            LocatorError::InvalidParameter { parameter, value, reason } => {
                write!(f, "invalid parameter {} = {}: {}", parameter, value, reason)
            }
            LocatorError::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
            LocatorError::SerializationError { message } => {
                write!(f, "serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for LocatorError {}

impl From<std::io::Error> for LocatorError {
    fn from(err: std::io::Error) -> Self {
        LocatorError::IoError { message: err.to_string() }
    }
}

impl From<serde_json::Error> for LocatorError {
    fn from(err: serde_json::Error) -> Self {
        LocatorError::SerializationError { message: err.to_string() }
    }
}
