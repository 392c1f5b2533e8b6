//! Calibration constants and floor-plan parameters
//!
//! All of these are tied to one deployment (one floor plan, one beacon
//! model) and feed the config defaults; they are never read directly by
//! the pipeline components.

/// Reference received power at 1 m from the beacon (dBm)
pub const REFERENCE_POWER_DBM: f64 = -73.0;

/// Path-loss exponent for the deployment environment
pub const PATH_LOSS_EXPONENT: f64 = 3.5;

/// Distance clamp for weak or noisy readings (m)
pub const MAX_RANGE_M: f64 = 10.0;

/// Vertical offset between ceiling-mounted receivers and the target's
/// waist height (m)
pub const VERTICAL_OFFSET_M: f64 = 2.0;

/// Empirical real-world-to-pixel conversion for the floor-plan image
pub const PIXELS_PER_METER: f64 = (955.0 - 130.0) / 33.4772;

/// Raw floor-plan x to display-map x
pub const DISPLAY_SCALE_X: f64 = 1830.0 / 2432.0;

/// Raw floor-plan y to display-map y
pub const DISPLAY_SCALE_Y: f64 = 1167.0 / 1632.0;

/// Fixed radius reported for multi-receiver estimates (m)
pub const MULTI_RECEIVER_RADIUS_M: f64 = 1.5;

/// Default 3-term moving-average weights (current, previous, one before)
pub const SMOOTHING_WEIGHTS: [f64; 3] = [0.6, 0.4, 0.0];

/// Default window width (seconds)
pub const WINDOW_WIDTH_S: f64 = 1.0;

/// Label returned when no room rectangle matches
pub const DEFAULT_ROOM_LABEL: &str = "Transition Zone";
