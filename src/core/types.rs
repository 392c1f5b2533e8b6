//! Core data types for the locator pipeline

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Deserialize};

/// Single proximity reading logged by a fixed receiver
///
/// The hit log handed to the locator must be sorted by `timestamp`;
/// hits are immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Seconds since the Unix epoch (fractional)
    pub timestamp: f64,
    /// Receiver that logged the reading
    pub receiver_id: u16,
    /// Received signal strength (dBm)
    pub rssi: f64,
    /// Human-readable receiver label from the ingestion step
    pub label: String,
}

impl Hit {
    pub fn new(timestamp: f64, receiver_id: u16, rssi: f64, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            receiver_id,
            rssi,
            label: label.into(),
        }
    }
}

/// Per-receiver aggregate over one time window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceiverStats {
    /// Number of hits from this receiver inside the window
    pub hit_count: u32,
    /// Mean signal strength of those hits (dBm)
    pub mean_rssi: f64,
}

/// One entry of the output trajectory
///
/// Coordinates are in display-map pixels. A point is either computed
/// from the window's receivers or carried forward verbatim from the
/// previous point with its timestamp advanced by one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    /// Room label classified from (x, y)
    pub room: String,
    /// Receivers that contributed to this point, ascending by id
    pub receivers: Vec<u16>,
    /// Hit counts aligned with `receivers`
    pub hit_counts: Vec<u32>,
}

/// Observation interval for one locator run, in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPeriod {
    pub start: f64,
    pub end: f64,
}

impl ObservationPeriod {
    /// Build a period directly from epoch seconds
    pub fn from_epoch(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a period from a calendar date and two wall-clock times,
    /// interpreted as UTC
    pub fn from_date_times(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        let start_ts = date.and_time(start).and_utc().timestamp() as f64;
        let end_ts = date.and_time(end).and_utc().timestamp() as f64;
        Self {
            start: start_ts,
            end: end_ts,
        }
    }

    /// A period with start at or past end covers nothing and yields an
    /// empty trajectory
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
