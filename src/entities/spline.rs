//! Spline entity

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// A spline with its control polygon (codes 10/20) and fit points (11/21)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spline {
    pub control_points: Vec<Vector2>,
    pub fit_points: Vec<Vector2>,
    /// Curve degree (code 71)
    pub degree: i16,
}

impl Spline {
    pub fn new() -> Self {
        Spline {
            control_points: Vec::new(),
            fit_points: Vec::new(),
            degree: 3,
        }
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Spline {
    // The control polygon encloses the curve; fit points lie on it.
    fn extent_points(&self) -> Vec<Vector2> {
        if self.control_points.is_empty() {
            self.fit_points.clone()
        } else {
            self.control_points.clone()
        }
    }
}
