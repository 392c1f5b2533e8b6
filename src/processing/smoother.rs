//! Short-memory trajectory smoothing and carry-forward
//!
//! The smoother owns the only state that survives across windows: the
//! last two accepted coordinates and the last emitted trajectory point.
//! Raw estimates blend with that history through a 3-term weighted
//! moving average; windows without an estimate reuse the last point
//! with its timestamp advanced by one second.

use nalgebra::Vector2;

use crate::core::types::TrajectoryPoint;

/// Weighted-moving-average smoother with a two-point memory
#[derive(Debug, Clone)]
pub struct TrajectorySmoother {
    weights: [f64; 3],
    /// Last two accepted coordinates, most recent last
    history: Vec<Vector2<f64>>,
    /// Carry-forward cache
    last_point: Option<TrajectoryPoint>,
}

impl TrajectorySmoother {
    pub fn new(weights: [f64; 3]) -> Self {
        Self {
            weights,
            history: Vec::with_capacity(2),
            last_point: None,
        }
    }

    /// Blend a raw estimate with the accepted history.
    ///
    /// The average only applies once two accepted points exist and they
    /// are distinct; a frozen history (as after a carry-forward) passes
    /// the raw estimate through untouched.
    pub fn smooth(&self, raw: Vector2<f64>) -> Vector2<f64> {
        if self.history.len() < 2 {
            return raw;
        }
        let prev1 = self.history[1];
        let prev2 = self.history[0];
        if (prev1 - prev2).norm() == 0.0 {
            return raw;
        }
        let [w1, w2, w3] = self.weights;
        raw * w1 + prev1 * w2 + prev2 * w3
    }

    /// Accept an emitted trajectory point into the smoother state
    pub fn record(&mut self, point: &TrajectoryPoint) {
        if self.history.len() == 2 {
            self.history.remove(0);
        }
        self.history.push(Vector2::new(point.x, point.y));
        self.last_point = Some(point.clone());
    }

    /// Frozen copy of the last point for a window with no estimate.
    ///
    /// Returns `None` until two points have been accepted; earlier
    /// empty windows contribute nothing to the trajectory.
    pub fn carry_forward(&self) -> Option<TrajectoryPoint> {
        if self.history.len() < 2 {
            return None;
        }
        self.last_point.as_ref().map(|last| {
            let mut point = last.clone();
            point.timestamp = last.timestamp + 1.0;
            point
        })
    }
}
