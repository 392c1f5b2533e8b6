//! Room classification from display-map coordinates
//!
//! The rules are axis-aligned rectangles tied to one floor plan,
//! evaluated in order with first match winning. Bounds are exclusive on
//! all four sides; anything unmatched falls into the default zone.

use nalgebra::Vector2;
use serde::{Serialize, Deserialize};

use crate::core::constants::DEFAULT_ROOM_LABEL;

/// One rectangular classification rule, exclusive on every bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRule {
    pub label: String,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl RoomRule {
    pub fn new(label: impl Into<String>, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            label: label.into(),
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn contains(&self, point: &Vector2<f64>) -> bool {
        self.x_min < point.x && point.x < self.x_max && self.y_min < point.y && point.y < self.y_max
    }
}

/// Ordered first-match room classifier
///
/// Total over the plane: every coordinate gets a label. Rule order is
/// part of the configuration; overlapping rectangles resolve to the
/// earlier rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomClassifier {
    pub rules: Vec<RoomRule>,
    pub default_label: String,
}

impl RoomClassifier {
    pub fn new(rules: Vec<RoomRule>, default_label: impl Into<String>) -> Self {
        Self {
            rules,
            default_label: default_label.into(),
        }
    }

    /// Label the zone containing `point`
    pub fn classify(&self, point: &Vector2<f64>) -> String {
        self.rules
            .iter()
            .find(|rule| rule.contains(point))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.default_label.clone())
    }
}

impl Default for RoomClassifier {
    fn default() -> Self {
        Self::new(
            vec![
                RoomRule::new("Activity Studio", 350.0, 430.0, 310.0, 920.0),
                RoomRule::new("LC", 620.0, 670.0, 200.0, 950.0),
                RoomRule::new("RC", 1060.0, 1260.0, 200.0, 950.0),
                RoomRule::new("Kitchen", 600.0, 1210.0, 130.0, 200.0),
                RoomRule::new("Lounge", 700.0, 1100.0, 680.0, 800.0),
                RoomRule::new("Staff Zone", 1400.0, 1480.0, 320.0, 730.0),
            ],
            DEFAULT_ROOM_LABEL,
        )
    }
}
