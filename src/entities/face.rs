//! Filled quadrilateral (SOLID) and 3D face (3DFACE)

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// Four corners (codes 10-13 / 20-23). Triangles repeat the third corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    pub corners: [Vector2; 4],
}

impl Face {
    pub fn new() -> Self {
        Face { corners: [Vector2::ZERO; 4] }
    }

    /// Create a triangular face; the fourth corner duplicates the third
    pub fn triangle(a: Vector2, b: Vector2, c: Vector2) -> Self {
        Face { corners: [a, b, c, c] }
    }

    /// True when the fourth corner duplicates the third
    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Face {
    fn extent_points(&self) -> Vec<Vector2> {
        self.corners.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let face = Face::triangle(Vector2::ZERO, Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
        assert!(face.is_triangle());
        assert_eq!(face.extent_points().len(), 4);
        assert_eq!(face.extent_points()[3], Vector2::new(0.0, 1.0));
    }
}
