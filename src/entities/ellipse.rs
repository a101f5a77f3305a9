//! Ellipse entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// An ellipse given by its center, the major-axis endpoint relative to the
/// center, and the minor/major ratio. Start and end are parameters in
/// radians (codes 41/42), `0..2π` for a full ellipse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    pub center: Vector2,
    pub major_axis: Vector2,
    pub ratio: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Ellipse {
    /// Create a degenerate full ellipse at the origin
    pub fn new() -> Self {
        Ellipse {
            center: Vector2::ZERO,
            major_axis: Vector2::ZERO,
            ratio: 1.0,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
        }
    }

    /// Create a full ellipse from center, major axis vector and ratio
    pub fn from_axes(center: Vector2, major_axis: Vector2, ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            ratio,
            ..Self::new()
        }
    }

    /// Length of the semi-major axis
    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    /// Length of the semi-minor axis
    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.ratio
    }

    /// Orientation of the major axis in degrees, counter-clockwise from +X
    pub fn rotation_degrees(&self) -> f64 {
        self.major_axis.angle_degrees()
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Ellipse {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.center]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes() {
        let e = Ellipse::from_axes(Vector2::ZERO, Vector2::new(0.0, 4.0), 0.5);
        assert_eq!(e.major_radius(), 4.0);
        assert_eq!(e.minor_radius(), 2.0);
        assert!((e.rotation_degrees() - 90.0).abs() < 1e-12);
    }
}
