//! Planar vector type used for every model-space coordinate

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// 2D vector / point in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Zero vector
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Calculate the length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of the vector measured counter-clockwise from +X, in degrees
    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Vector2) -> f64 {
        (*self - *other).length()
    }

    /// Point on a circle of `radius` around `self` at `angle` radians
    pub fn polar(&self, radius: f64, angle: f64) -> Vector2 {
        Vector2::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector2::new(3.0, 4.0);
        let b = Vector2::new(1.0, 1.0);
        assert_eq!(a + b, Vector2::new(4.0, 5.0));
        assert_eq!(a - b, Vector2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(6.0, 8.0));
        assert_eq!(a.length(), 5.0);
    }

    #[test]
    fn test_angle_degrees() {
        assert!((Vector2::new(0.0, 2.0).angle_degrees() - 90.0).abs() < 1e-12);
        assert!((Vector2::new(-1.0, 0.0).angle_degrees() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar() {
        let p = Vector2::new(5.0, 5.0).polar(2.0, std::f64::consts::FRAC_PI_2);
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!((p.y - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_is_origin() {
        assert_eq!(Vector2::default(), Vector2::ZERO);
        assert_eq!(Vector2::default(), Vector2::new(0.0, 0.0));
    }
}
