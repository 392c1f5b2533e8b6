//! Pairwise multilateration over one window summary
//!
//! The estimator is a small state machine on the number of distinct
//! receivers that fired: zero receivers give no estimate, one receiver
//! pins the estimate to its own position, and two or more receivers
//! trigger pairwise edge-point triangulation over every ordered pair.
//!
//! Ordered pairs are deliberate: both (i, j) and (j, i) contribute an
//! edge point, matching the calibrated behavior of this deployment.
//! Collapsing to unordered pairs changes the hit-count weighting for
//! three or more receivers and must not be done.

use nalgebra::Vector2;
use serde::{Serialize, Deserialize};

use crate::algorithms::signal_model::SignalModel;
use crate::core::constants::MULTI_RECEIVER_RADIUS_M;
use crate::processing::window::WindowSummary;
use crate::utils::config::{MapConfig, ReceiverTable};
use crate::validation::error::LocatorError;

/// Pairwise weighting strategy for multi-receiver windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriangulationStrategy {
    /// Edge points from full per-receiver radii, combined as a
    /// hit-count-weighted mean
    Aggregate,
    /// Per-pair radii rescaled by each receiver's share of the pair's
    /// hits, combined as an unweighted mean (run default)
    Edge,
}

impl Default for TriangulationStrategy {
    fn default() -> Self {
        TriangulationStrategy::Edge
    }
}

/// Raw (pre-smoothing) position estimate for one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEstimate {
    /// Display-map coordinates
    pub position: Vector2<f64>,
    /// Effective radius in pixels; fixed for multi-receiver estimates
    pub radius_px: f64,
}

/// Converts a window summary into a raw position estimate
#[derive(Debug, Clone)]
pub struct PositionEstimator {
    signal: SignalModel,
    strategy: TriangulationStrategy,
    map: MapConfig,
}

/// Per-receiver working data resolved from a summary
struct FiringReceiver {
    position: Vector2<f64>,
    distance_m: f64,
    radius_px: f64,
    hit_count: u32,
}

impl PositionEstimator {
    pub fn new(signal: SignalModel, strategy: TriangulationStrategy, map: MapConfig) -> Self {
        Self { signal, strategy, map }
    }

    /// Estimate a display-map position from one window's receiver
    /// summary.
    ///
    /// Returns `Ok(None)` when no receivers fired. Fails if a firing
    /// receiver is missing from the position table; dropping it instead
    /// would silently skew the weighting.
    pub fn estimate(
        &self,
        summary: &WindowSummary,
        receivers: &ReceiverTable,
    ) -> Result<Option<RawEstimate>, LocatorError> {
        // Summary iteration order is ascending receiver id, so the
        // whole computation is deterministic.
        let mut firing = Vec::with_capacity(summary.receiver_count());
        for (&id, stats) in summary.receivers() {
            let position = receivers.display_position(id, &self.map)?;
            let distance_m = self.signal.distance_m(stats.mean_rssi);
            firing.push(FiringReceiver {
                position,
                distance_m,
                radius_px: self.signal.planar_radius_px(distance_m),
                hit_count: stats.hit_count,
            });
        }

        match firing.len() {
            0 => Ok(None),
            1 => Ok(Some(RawEstimate {
                position: firing[0].position,
                radius_px: firing[0].radius_px,
            })),
            _ => Ok(Some(self.triangulate(&firing))),
        }
    }

    fn triangulate(&self, firing: &[FiringReceiver]) -> RawEstimate {
        let position = match self.strategy {
            TriangulationStrategy::Aggregate => self.aggregate_estimate(firing),
            TriangulationStrategy::Edge => self.edge_estimate(firing),
        };
        RawEstimate {
            position,
            radius_px: MULTI_RECEIVER_RADIUS_M * self.map.pixels_per_meter,
        }
    }

    /// Hit-count-weighted mean of edge points computed from each
    /// receiver's independently estimated radius
    fn aggregate_estimate(&self, firing: &[FiringReceiver]) -> Vector2<f64> {
        let mut weighted_sum = Vector2::zeros();
        let mut total_weight = 0.0;

        for (i, a) in firing.iter().enumerate() {
            for (j, b) in firing.iter().enumerate() {
                if i == j {
                    continue;
                }
                let edge = edge_point(a.position, b.position, a.radius_px, b.radius_px);
                let weight = (a.hit_count + b.hit_count) as f64;
                weighted_sum += edge * weight;
                total_weight += weight;
            }
        }

        weighted_sum / total_weight
    }

    /// Unweighted mean of edge points whose radii are first rescaled by
    /// each receiver's share of the pair's combined hits, biasing each
    /// edge point toward the receiver that fired more often
    fn edge_estimate(&self, firing: &[FiringReceiver]) -> Vector2<f64> {
        let mut sum = Vector2::zeros();
        let mut pairs = 0usize;

        for (i, a) in firing.iter().enumerate() {
            for (j, b) in firing.iter().enumerate() {
                if i == j {
                    continue;
                }
                let pair_hits = (a.hit_count + b.hit_count) as f64;
                let r_a = self
                    .signal
                    .planar_radius_px(a.distance_m * a.hit_count as f64 / pair_hits);
                let r_b = self
                    .signal
                    .planar_radius_px(b.distance_m * b.hit_count as f64 / pair_hits);
                sum += edge_point(a.position, b.position, r_a, r_b);
                pairs += 1;
            }
        }

        sum / pairs as f64
    }
}

/// Point on segment a->b at fraction r_a / (r_a + r_b) from a.
///
/// When both radii clamp to zero the ratio is undefined; the midpoint
/// stands in so no NaN can enter the trajectory.
fn edge_point(a: Vector2<f64>, b: Vector2<f64>, r_a: f64, r_b: f64) -> Vector2<f64> {
    let total = r_a + r_b;
    let fraction = if total > 0.0 { r_a / total } else { 0.5 };
    a + (b - a) * fraction
}
