//! Line entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A straight segment between two endpoints (codes 10/20 and 11/21)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            start: Vector2::ZERO,
            end: Vector2::ZERO,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector2, end: Vector2) -> Self {
        Line { start, end }
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Line {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.start, self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_extent() {
        let line = Line::from_points(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0));
        assert_eq!(line.length(), 10.0);
        assert_eq!(line.extent_points(), vec![Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0)]);
    }
}
