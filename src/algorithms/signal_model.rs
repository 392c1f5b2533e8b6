//! Log-distance path-loss model
//!
//! Converts a received signal strength into an estimated distance in
//! metres and from there into an effective planar radius in floor-plan
//! pixels. Intermediate arithmetic stays in metres; the pixel
//! conversion happens once, at the end.

use crate::utils::config::SignalConfig;

/// RSSI-to-radius conversion for one calibrated deployment
#[derive(Debug, Clone)]
pub struct SignalModel {
    reference_power_dbm: f64,
    path_loss_exponent: f64,
    max_range_m: f64,
    pixels_per_meter: f64,
    /// Vertical receiver-to-target offset, pre-converted to pixels
    vertical_offset_px: f64,
}

impl SignalModel {
    pub fn new(config: &SignalConfig, pixels_per_meter: f64) -> Self {
        Self {
            reference_power_dbm: config.reference_power_dbm,
            path_loss_exponent: config.path_loss_exponent,
            max_range_m: config.max_range_m,
            pixels_per_meter,
            vertical_offset_px: config.vertical_offset_m * pixels_per_meter,
        }
    }

    /// Estimated beacon-to-receiver distance in metres,
    /// clamped to the configured maximum range.
    ///
    /// d = 10^((P0 - RSSI) / (10 * N))
    pub fn distance_m(&self, rssi: f64) -> f64 {
        let exponent = (self.reference_power_dbm - rssi) / (10.0 * self.path_loss_exponent);
        let distance = 10_f64.powf(exponent);
        distance.min(self.max_range_m)
    }

    /// Project a slant distance (metres) onto the floor plane and
    /// convert to pixels.
    ///
    /// Distances shorter than the vertical offset clamp to a zero
    /// planar radius rather than raising a domain error.
    pub fn planar_radius_px(&self, distance_m: f64) -> f64 {
        let slant_px = distance_m * self.pixels_per_meter;
        let squared = slant_px * slant_px - self.vertical_offset_px * self.vertical_offset_px;
        squared.max(0.0).sqrt()
    }

    /// Full RSSI-to-planar-radius conversion
    pub fn estimate_radius_px(&self, rssi: f64) -> f64 {
        self.planar_radius_px(self.distance_m(rssi))
    }
}
