//! Circle entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A full circle (center 10/20, radius 40)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
}

impl Circle {
    /// Create a unit-less circle at the origin
    pub fn new() -> Self {
        Circle {
            center: Vector2::ZERO,
            radius: 0.0,
        }
    }

    /// Create a circle from a center point and radius
    pub fn from_center(center: Vector2, radius: f64) -> Self {
        Circle { center, radius }
    }

    /// Approximate the circle with `segments` chords.
    ///
    /// Returns `segments + 1` points; the last repeats the first.
    pub fn to_ring(&self, segments: usize) -> Vec<Vector2> {
        let step = std::f64::consts::TAU / segments as f64;
        (0..=segments)
            .map(|i| {
                if i == segments {
                    self.center.polar(self.radius, 0.0)
                } else {
                    self.center.polar(self.radius, step * i as f64)
                }
            })
            .collect()
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Circle {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![
            Vector2::new(self.center.x - self.radius, self.center.y - self.radius),
            Vector2::new(self.center.x + self.radius, self.center.y + self.radius),
        ]
    }
}
