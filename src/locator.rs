//! Locator orchestration
//!
//! Drives the window aggregator, position estimator, and trajectory
//! smoother in strict time order and folds their output into the final
//! trajectory. The whole run is a deterministic, single-threaded batch
//! computation over a pre-loaded hit log.

use crate::algorithms::estimator::PositionEstimator;
use crate::algorithms::rooms::RoomClassifier;
use crate::algorithms::signal_model::SignalModel;
use crate::core::types::{Hit, ObservationPeriod, TrajectoryPoint};
use crate::processing::smoother::TrajectorySmoother;
use crate::processing::window::WindowAggregator;
use crate::utils::config::{LocatorConfig, ReceiverTable};
use crate::validation::error::LocatorError;

/// End-to-end locator for one deployment
pub struct Locator {
    config: LocatorConfig,
    receivers: ReceiverTable,
    estimator: PositionEstimator,
    classifier: RoomClassifier,
}

impl Locator {
    /// Build a locator from validated configuration and the receiver
    /// position table.
    ///
    /// Bad run parameters abort here, before any window is processed.
    pub fn new(config: LocatorConfig, receivers: ReceiverTable) -> Result<Self, LocatorError> {
        config.validate()?;
        let signal = SignalModel::new(&config.signal, config.map.pixels_per_meter);
        let estimator = PositionEstimator::new(signal, config.strategy, config.map.clone());
        let classifier = config.rooms.clone();
        Ok(Self {
            config,
            receivers,
            estimator,
            classifier,
        })
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Run the full pipeline over a time-sorted hit log.
    ///
    /// Each window yields at most one trajectory point: a smoothed
    /// estimate when receivers fired, a carried-forward copy of the
    /// last point when none did, or nothing while no history exists.
    pub fn locate(
        &self,
        hits: &[Hit],
        period: &ObservationPeriod,
    ) -> Result<Vec<TrajectoryPoint>, LocatorError> {
        let windows = WindowAggregator::new(
            hits,
            period.start,
            period.end,
            self.config.window.width_s,
            self.config.window.advance,
        );

        let mut smoother = TrajectorySmoother::new(self.config.smoothing.weights);
        let mut trajectory = Vec::new();

        for summary in windows {
            match self.estimator.estimate(&summary, &self.receivers)? {
                Some(raw) => {
                    let position = smoother.smooth(raw.position);
                    let point = TrajectoryPoint {
                        timestamp: summary.end,
                        x: position.x,
                        y: position.y,
                        // Classified from the smoothed coordinate, not
                        // from any pairwise intermediate
                        room: self.classifier.classify(&position),
                        receivers: summary.receiver_ids(),
                        hit_counts: summary.hit_counts(),
                    };
                    smoother.record(&point);
                    trajectory.push(point);
                }
                None => {
                    if let Some(frozen) = smoother.carry_forward() {
                        smoother.record(&frozen);
                        trajectory.push(frozen);
                    }
                }
            }
        }

        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::{MapConfig, SignalConfig};

    /// Calibration with no vertical offset and unit pixel scale, so the
    /// geometry is checkable by hand.
    fn flat_config() -> LocatorConfig {
        LocatorConfig {
            signal: SignalConfig {
                reference_power_dbm: -40.0,
                path_loss_exponent: 2.0,
                max_range_m: 100.0,
                vertical_offset_m: 0.0,
            },
            map: MapConfig {
                pixels_per_meter: 1.0,
                display_scale_x: 1.0,
                display_scale_y: 1.0,
            },
            ..LocatorConfig::default()
        }
    }

    fn two_receiver_table() -> ReceiverTable {
        let mut table = ReceiverTable::new();
        table.insert(1, 100.0, 100.0);
        table.insert(2, 200.0, 100.0);
        table
    }

    #[test]
    fn test_end_to_end_single_window_pair() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![
            Hit::new(0.0, 1, -60.0, "p01"),
            Hit::new(0.5, 2, -65.0, "p02"),
        ];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 1.0))
            .unwrap();

        assert_eq!(trajectory.len(), 1);
        let point = &trajectory[0];

        // Strictly between the two receivers, pulled toward the
        // stronger signal at receiver 1
        assert!(point.x > 100.0 && point.x < 200.0);
        assert!(point.x < 150.0);
        assert_eq!(point.y, 100.0);
        assert_eq!(point.receivers, vec![1, 2]);
        assert_eq!(point.hit_counts, vec![1, 1]);
        assert_eq!(point.room, locator.config.rooms.classify(&nalgebra::Vector2::new(point.x, point.y)));
    }

    #[test]
    fn test_single_receiver_window_is_exact_position() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![Hit::new(0.3, 1, -70.0, "p01")];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 1.0))
            .unwrap();

        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory[0].x, 100.0);
        assert_eq!(trajectory[0].y, 100.0);
    }

    #[test]
    fn test_carry_forward_after_silent_window() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        // Three active windows, then silence
        let hits = vec![
            Hit::new(0.2, 1, -60.0, "p01"),
            Hit::new(1.2, 2, -60.0, "p02"),
            Hit::new(2.2, 1, -60.0, "p01"),
        ];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 4.0))
            .unwrap();

        assert_eq!(trajectory.len(), 4);
        let last_active = &trajectory[2];
        let frozen = &trajectory[3];

        assert_eq!(frozen.timestamp, last_active.timestamp + 1.0);
        assert_eq!(frozen.x, last_active.x);
        assert_eq!(frozen.y, last_active.y);
        assert_eq!(frozen.room, last_active.room);
        assert_eq!(frozen.receivers, last_active.receivers);
        assert_eq!(frozen.hit_counts, last_active.hit_counts);
    }

    #[test]
    fn test_leading_silence_is_skipped() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![Hit::new(5.2, 1, -60.0, "p01")];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 6.0))
            .unwrap();

        // Empty windows before any history produce nothing
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory[0].timestamp, 6.0);
    }

    #[test]
    fn test_empty_log_gives_empty_trajectory() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let trajectory = locator
            .locate(&[], &ObservationPeriod::from_epoch(0.0, 10.0))
            .unwrap();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn test_degenerate_period_gives_empty_trajectory() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![Hit::new(0.5, 1, -60.0, "p01")];
        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(10.0, 10.0))
            .unwrap();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn test_unknown_receiver_aborts_run() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![Hit::new(0.5, 77, -60.0, "p77")];

        let err = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 1.0))
            .unwrap_err();
        assert_eq!(err, LocatorError::UnknownReceiver { receiver_id: 77 });
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = flat_config();
        config.window.width_s = -1.0;
        assert!(Locator::new(config, two_receiver_table()).is_err());
    }

    #[test]
    fn test_trajectory_is_deterministic() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        let hits = vec![
            Hit::new(0.2, 1, -60.0, "p01"),
            Hit::new(0.9, 2, -64.0, "p02"),
            Hit::new(1.4, 2, -58.0, "p02"),
            Hit::new(2.1, 1, -66.0, "p01"),
            Hit::new(3.8, 2, -61.0, "p02"),
        ];
        let period = ObservationPeriod::from_epoch(0.0, 5.0);

        let first = locator.locate(&hits, &period).unwrap();
        let second = locator.locate(&hits, &period).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_trajectory_timestamps_strictly_increase() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        // Mix of active windows, silence mid-run, and more activity
        let hits = vec![
            Hit::new(0.2, 1, -60.0, "p01"),
            Hit::new(1.2, 2, -64.0, "p02"),
            Hit::new(2.4, 1, -58.0, "p01"),
            Hit::new(5.1, 2, -66.0, "p02"),
            Hit::new(6.3, 1, -61.0, "p01"),
        ];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 8.0))
            .unwrap();

        assert!(trajectory.len() >= 2);
        for pair in trajectory.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
    }

    #[test]
    fn test_smoothing_blends_consecutive_estimates() {
        let locator = Locator::new(flat_config(), two_receiver_table()).unwrap();
        // Three single-receiver windows alternating position
        let hits = vec![
            Hit::new(0.2, 1, -60.0, "p01"),
            Hit::new(1.2, 2, -60.0, "p02"),
            Hit::new(2.2, 1, -60.0, "p01"),
        ];

        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 3.0))
            .unwrap();

        assert_eq!(trajectory.len(), 3);
        // First two points are raw receiver positions; the third blends
        // 0.6 * 100 + 0.4 * 200
        assert_eq!(trajectory[0].x, 100.0);
        assert_eq!(trajectory[1].x, 200.0);
        assert!((trajectory[2].x - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_mode_covers_range_without_overlap() {
        let mut config = flat_config();
        config.window.advance = crate::processing::window::WindowAdvance::Step;
        config.window.width_s = 2.0;
        let locator = Locator::new(config, two_receiver_table()).unwrap();

        let hits = vec![
            Hit::new(0.5, 1, -60.0, "p01"),
            Hit::new(2.5, 2, -60.0, "p02"),
        ];
        let trajectory = locator
            .locate(&hits, &ObservationPeriod::from_epoch(0.0, 4.0))
            .unwrap();

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0].timestamp, 2.0);
        assert_eq!(trajectory[1].timestamp, 4.0);
    }
}
