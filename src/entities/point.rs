//! Point entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A single model-space point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub position: Vector2,
}

impl Point {
    /// Create a point at the origin
    pub fn new() -> Self {
        Point { position: Vector2::ZERO }
    }

    /// Create a point at `position`
    pub fn at(position: Vector2) -> Self {
        Point { position }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Point {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.position]
    }
}
