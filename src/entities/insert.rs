//! Block reference (INSERT)

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// Placement of a named block definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insert {
    /// Referenced block name (code 2)
    pub block_name: String,
    /// Insertion point (codes 10/20)
    pub position: Vector2,
    /// X scale factor (code 41)
    pub scale_x: f64,
    /// Y scale factor (code 42)
    pub scale_y: f64,
    /// Rotation in degrees (code 50)
    pub rotation: f64,
}

impl Insert {
    /// Create an unscaled reference with no block name
    pub fn new() -> Self {
        Insert {
            block_name: String::new(),
            position: Vector2::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    /// Create a reference to `block_name` at `position`
    pub fn at(block_name: impl Into<String>, position: Vector2) -> Self {
        Insert {
            block_name: block_name.into(),
            position,
            ..Self::new()
        }
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Insert {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.position]
    }
}
