//! Arc entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A circular arc swept counter-clockwise from `start_angle` to `end_angle`
/// (degrees, codes 50/51)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    pub center: Vector2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Create a zero arc at the origin
    pub fn new() -> Self {
        Arc {
            center: Vector2::ZERO,
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
        }
    }

    /// Create an arc from center, radius and angles in degrees
    pub fn from_center(center: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc { center, radius, start_angle, end_angle }
    }

    /// Counter-clockwise sweep in degrees, normalized to `(0, 360]`
    pub fn sweep_degrees(&self) -> f64 {
        let sweep = (self.end_angle - self.start_angle).rem_euclid(360.0);
        if sweep == 0.0 { 360.0 } else { sweep }
    }

    /// Start point in model space
    pub fn start_point(&self) -> Vector2 {
        self.center.polar(self.radius, self.start_angle.to_radians())
    }

    /// End point in model space
    pub fn end_point(&self) -> Vector2 {
        self.center.polar(self.radius, self.end_angle.to_radians())
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Arc {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![
            Vector2::new(self.center.x - self.radius, self.center.y - self.radius),
            Vector2::new(self.center.x + self.radius, self.center.y + self.radius),
        ]
    }
}
