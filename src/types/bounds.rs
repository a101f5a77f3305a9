//! Axis-aligned drawing extents

use super::Vector2;
use crate::entities::Entity;
use serde::Serialize;
use std::fmt;

/// Axis-aligned bounding rectangle of everything decoded so far.
///
/// A fresh value is the "empty" sentinel (`+∞` minimums, `−∞` maximums);
/// the first included point collapses it to that point. Folding only ever
/// widens the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// The empty sentinel
    pub const EMPTY: Bounds = Bounds {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Create bounds from explicit extremes
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Bounds { min_x, min_y, max_x, max_y }
    }

    /// True until at least one point has been included
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Extent along X (zero when empty)
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    /// Extent along Y (zero when empty)
    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    /// Check if this rectangle contains a point
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Expand the rectangle to include a point. Non-finite coordinates are ignored.
    pub fn expand_to_include(&mut self, point: Vector2) {
        if point.x.is_finite() {
            self.min_x = self.min_x.min(point.x);
            self.max_x = self.max_x.max(point.x);
        }
        if point.y.is_finite() {
            self.min_y = self.min_y.min(point.y);
            self.max_y = self.max_y.max(point.y);
        }
    }

    /// Fold an entity's representative points into the rectangle.
    ///
    /// Entities without extractable points leave the rectangle untouched.
    pub fn update(&mut self, entity: &Entity) {
        for point in entity.extent_points() {
            self.expand_to_include(point);
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Bounds[empty]")
        } else {
            write!(
                f,
                "Bounds[({}, {}) -> ({}, {})]",
                self.min_x, self.min_y, self.max_x, self.max_y
            )
        }
    }
}
