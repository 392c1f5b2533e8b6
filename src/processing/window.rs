//! Sliding/stepping window aggregation over the hit log
//!
//! Windows are inclusive on both bounds, so in slide mode a hit that
//! lands exactly on a shared boundary is counted by both adjacent
//! windows. That duplication is intentional; it smooths resolution at
//! boundary instants.

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

use crate::core::types::{Hit, ReceiverStats};

/// How the window start advances between iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowAdvance {
    /// Advance by one second; consecutive windows overlap
    Slide,
    /// Advance by the full window width; windows are disjoint
    Step,
}

/// Per-window aggregation of the hit log
///
/// Receivers are keyed in ascending id order, which keeps every
/// downstream computation deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub start: f64,
    pub end: f64,
    receivers: BTreeMap<u16, ReceiverStats>,
}

impl WindowSummary {
    fn from_hits(start: f64, end: f64, hits: &[Hit]) -> Self {
        let mut sums: BTreeMap<u16, (u32, f64)> = BTreeMap::new();
        for hit in hits {
            let entry = sums.entry(hit.receiver_id).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += hit.rssi;
        }

        let receivers = sums
            .into_iter()
            .map(|(id, (count, rssi_sum))| {
                (
                    id,
                    ReceiverStats {
                        hit_count: count,
                        mean_rssi: rssi_sum / count as f64,
                    },
                )
            })
            .collect();

        Self { start, end, receivers }
    }

    /// Distinct receivers that fired in this window, ascending by id
    pub fn receivers(&self) -> impl Iterator<Item = (&u16, &ReceiverStats)> {
        self.receivers.iter()
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn receiver_ids(&self) -> Vec<u16> {
        self.receivers.keys().copied().collect()
    }

    pub fn hit_counts(&self) -> Vec<u32> {
        self.receivers.values().map(|s| s.hit_count).collect()
    }

    pub fn stats(&self, id: u16) -> Option<&ReceiverStats> {
        self.receivers.get(&id)
    }
}

/// Iterator of window summaries over a time-sorted hit log
///
/// Yields one summary per window whose end does not pass the
/// observation end time. A run whose start is at or past its end
/// produces no windows at all.
pub struct WindowAggregator<'a> {
    hits: &'a [Hit],
    cursor: f64,
    end: f64,
    width: f64,
    advance: WindowAdvance,
}

impl<'a> WindowAggregator<'a> {
    /// `hits` must be sorted by timestamp.
    pub fn new(hits: &'a [Hit], start: f64, end: f64, width: f64, advance: WindowAdvance) -> Self {
        Self {
            hits,
            cursor: start,
            end,
            width,
            advance,
        }
    }

    /// Hits with `start <= t <= end`, both bounds inclusive
    fn hits_in(&self, start: f64, end: f64) -> &'a [Hit] {
        let lo = self.hits.partition_point(|h| h.timestamp < start);
        let hi = self.hits.partition_point(|h| h.timestamp <= end);
        &self.hits[lo..hi]
    }
}

impl<'a> Iterator for WindowAggregator<'a> {
    type Item = WindowSummary;

    fn next(&mut self) -> Option<WindowSummary> {
        let start = self.cursor;
        let end = start + self.width;
        if end > self.end {
            return None;
        }

        let summary = WindowSummary::from_hits(start, end, self.hits_in(start, end));

        self.cursor = match self.advance {
            WindowAdvance::Slide => start + 1.0,
            WindowAdvance::Step => start + self.width,
        };

        Some(summary)
    }
}
