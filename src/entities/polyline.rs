//! Polyline entity (LWPOLYLINE and old-style POLYLINE)

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A polyline vertex; `bulge` encodes the arc segment to the next vertex
/// (tangent of a quarter of the included angle, 0 for a straight segment)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolylineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PolylineVertex {
    /// Create a straight-segment vertex
    pub fn new(x: f64, y: f64) -> Self {
        PolylineVertex { x, y, bulge: 0.0 }
    }

    /// Vertex location
    pub fn location(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// An ordered vertex chain, optionally closed back to its first vertex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
    pub closed: bool,
}

impl Polyline {
    /// Create an empty open polyline
    pub fn new() -> Self {
        Polyline {
            vertices: Vec::new(),
            closed: false,
        }
    }

    /// Create a polyline from vertex locations
    pub fn from_points(points: &[Vector2], closed: bool) -> Self {
        Polyline {
            vertices: points.iter().map(|p| PolylineVertex::new(p.x, p.y)).collect(),
            closed,
        }
    }

    /// Add a straight-segment vertex
    pub fn add_point(&mut self, point: Vector2) {
        self.vertices.push(PolylineVertex::new(point.x, point.y));
    }

    /// Vertex locations in order
    pub fn points(&self) -> Vec<Vector2> {
        self.vertices.iter().map(PolylineVertex::location).collect()
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Polyline {
    fn extent_points(&self) -> Vec<Vector2> {
        self.points()
    }
}
