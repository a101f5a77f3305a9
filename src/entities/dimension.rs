//! Dimension annotation

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A dimension reduced to its definition point, override text and type code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Definition point (codes 10/20)
    pub position: Vector2,
    /// Annotation text override (code 1); empty means measured value
    pub text: String,
    /// Dimension type code (code 70): 0 rotated, 1 aligned, 2 angular, ...
    pub dimension_type: i16,
}

impl Dimension {
    pub fn new() -> Self {
        Dimension {
            position: Vector2::ZERO,
            text: String::new(),
            dimension_type: 0,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Dimension {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.position]
    }
}
