use nalgebra::Vector2;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::algorithms::estimator::TriangulationStrategy;
use crate::algorithms::rooms::RoomClassifier;
use crate::core::constants;
use crate::processing::window::WindowAdvance;
use crate::validation::error::LocatorError;

/// Signal-model calibration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Reference received power at 1 m (dBm)
    pub reference_power_dbm: f64,
    /// Path-loss exponent for the environment
    pub path_loss_exponent: f64,
    /// Distance clamp applied to every estimate (m)
    pub max_range_m: f64,
    /// Receiver-to-target height difference removed in quadrature (m)
    pub vertical_offset_m: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            reference_power_dbm: constants::REFERENCE_POWER_DBM,
            path_loss_exponent: constants::PATH_LOSS_EXPONENT,
            max_range_m: constants::MAX_RANGE_M,
            vertical_offset_m: constants::VERTICAL_OFFSET_M,
        }
    }
}

/// Coordinate-system parameters for the floor plan and display map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Real-world-to-pixel conversion for the floor-plan image
    pub pixels_per_meter: f64,
    /// Raw floor-plan x to display x
    pub display_scale_x: f64,
    /// Raw floor-plan y to display y
    pub display_scale_y: f64,
}

impl MapConfig {
    /// Rescale a raw floor-plan coordinate into display coordinates.
    ///
    /// This is the only place the display rescale happens; receiver
    /// positions pass through it exactly once, at lookup time.
    pub fn to_display(&self, raw: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(raw.x * self.display_scale_x, raw.y * self.display_scale_y)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: constants::PIXELS_PER_METER,
            display_scale_x: constants::DISPLAY_SCALE_X,
            display_scale_y: constants::DISPLAY_SCALE_Y,
        }
    }
}

/// Time-window parameters for the aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Nominal window width (seconds)
    pub width_s: f64,
    /// Slide (overlapping) or step (disjoint) advancement
    pub advance: WindowAdvance,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width_s: constants::WINDOW_WIDTH_S,
            advance: WindowAdvance::Slide,
        }
    }
}

/// Weights for the 3-term trajectory moving average
///
/// Order is (current raw estimate, previous point, point before that).
/// The third slot is currently zero but stays configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    pub weights: [f64; 3],
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            weights: constants::SMOOTHING_WEIGHTS,
        }
    }
}

/// Complete, immutable configuration for one locator run
///
/// Components receive the pieces they need at construction; nothing in
/// the pipeline reads ambient or global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocatorConfig {
    pub signal: SignalConfig,
    pub map: MapConfig,
    pub window: WindowConfig,
    pub strategy: TriangulationStrategy,
    pub smoothing: SmoothingConfig,
    pub rooms: RoomClassifier,
}

impl LocatorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LocatorError> {
        let content = fs::read_to_string(path)?;
        let config: LocatorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LocatorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check every parameter against its valid range.
    ///
    /// The first offending parameter aborts validation with a
    /// diagnostic naming it and its value.
    pub fn validate(&self) -> Result<(), LocatorError> {
        if !(self.window.width_s > 0.0) || !self.window.width_s.is_finite() {
            return Err(invalid("window.width_s", self.window.width_s, "must be positive and finite"));
        }
        if !(self.signal.path_loss_exponent > 0.0) {
            return Err(invalid(
                "signal.path_loss_exponent",
                self.signal.path_loss_exponent,
                "must be positive",
            ));
        }
        if !(self.signal.max_range_m > 0.0) {
            return Err(invalid("signal.max_range_m", self.signal.max_range_m, "must be positive"));
        }
        if self.signal.vertical_offset_m < 0.0 {
            return Err(invalid(
                "signal.vertical_offset_m",
                self.signal.vertical_offset_m,
                "must be non-negative",
            ));
        }
        if !(self.map.pixels_per_meter > 0.0) {
            return Err(invalid("map.pixels_per_meter", self.map.pixels_per_meter, "must be positive"));
        }
        if !(self.map.display_scale_x > 0.0) || !(self.map.display_scale_y > 0.0) {
            return Err(invalid(
                "map.display_scale",
                self.map.display_scale_x,
                "display scales must be positive",
            ));
        }
        for (i, w) in self.smoothing.weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(invalid(&format!("smoothing.weights[{}]", i), *w, "must be finite"));
            }
        }
        Ok(())
    }
}

fn invalid(parameter: &str, value: f64, reason: &str) -> LocatorError {
    LocatorError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// One row of the receiver position reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReceiverPosition {
    pub id: u16,
    /// Raw floor-plan x (pixels)
    pub x: f64,
    /// Raw floor-plan y (pixels)
    pub y: f64,
}

/// Static receiver_id -> raw floor-plan position table
///
/// Loaded once per run and read-only afterwards. Lookups of ids the
/// table does not know fail hard: silently dropping a firing receiver
/// would corrupt the triangulation weighting.
#[derive(Debug, Clone, Default)]
pub struct ReceiverTable {
    positions: HashMap<u16, Vector2<f64>>,
}

impl ReceiverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from reference rows
    pub fn from_rows(rows: &[ReceiverPosition]) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row.id, row.x, row.y);
        }
        table
    }

    /// Load the table from a JSON file containing an array of rows
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LocatorError> {
        let content = fs::read_to_string(path)?;
        let rows: Vec<ReceiverPosition> = serde_json::from_str(&content)?;
        Ok(Self::from_rows(&rows))
    }

    pub fn insert(&mut self, id: u16, x: f64, y: f64) {
        self.positions.insert(id, Vector2::new(x, y));
    }

    pub fn contains(&self, id: u16) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Raw floor-plan position of a receiver
    pub fn raw_position(&self, id: u16) -> Result<Vector2<f64>, LocatorError> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(LocatorError::UnknownReceiver { receiver_id: id })
    }

    /// Receiver position rescaled into display coordinates
    pub fn display_position(&self, id: u16, map: &MapConfig) -> Result<Vector2<f64>, LocatorError> {
        Ok(map.to_display(self.raw_position(id)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LocatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_window_width_rejected() {
        let mut config = LocatorConfig::default();
        config.window.width_s = 0.0;

        let err = config.validate().unwrap_err();
        match err {
            LocatorError::InvalidParameter { parameter, .. } => {
                assert_eq!(parameter, "window.width_s");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_path_loss_exponent_rejected() {
        let mut config = LocatorConfig::default();
        config.signal.path_loss_exponent = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = LocatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: LocatorConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.window.width_s, config.window.width_s);
        assert_eq!(back.smoothing.weights, config.smoothing.weights);
        assert_eq!(back.signal.reference_power_dbm, config.signal.reference_power_dbm);
    }

    #[test]
    fn test_display_transform_applied_once() {
        let map = MapConfig {
            pixels_per_meter: 1.0,
            display_scale_x: 0.5,
            display_scale_y: 0.25,
        };
        let mut table = ReceiverTable::new();
        table.insert(1, 100.0, 200.0);

        let display = table.display_position(1, &map).unwrap();
        assert_eq!(display, Vector2::new(50.0, 50.0));

        // Raw lookup stays untransformed
        let raw = table.raw_position(1).unwrap();
        assert_eq!(raw, Vector2::new(100.0, 200.0));
    }

    #[test]
    fn test_unknown_receiver_lookup_fails() {
        let table = ReceiverTable::new();
        let err = table.raw_position(42).unwrap_err();
        assert_eq!(err, LocatorError::UnknownReceiver { receiver_id: 42 });
    }

    #[test]
    fn test_table_from_rows() {
        let rows = vec![
            ReceiverPosition { id: 1, x: 10.0, y: 20.0 },
            ReceiverPosition { id: 2, x: 30.0, y: 40.0 },
        ];
        let table = ReceiverTable::from_rows(&rows);

        assert_eq!(table.len(), 2);
        assert!(table.contains(1));
        assert!(!table.contains(3));
    }
}
