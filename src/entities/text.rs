//! Single-line (TEXT) and paragraph (MTEXT) text

use super::Geometry;
use crate::types::Vector2;
use serde::Serialize;

/// Text anchored at `position`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub position: Vector2,
    /// Text content (code 1, MTEXT chunks from code 3 prepended)
    pub text: String,
    /// Character height in drawing units (code 40)
    pub height: f64,
    /// Rotation in degrees, counter-clockwise (code 50)
    pub rotation: f64,
    /// Text style name (code 7)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Text {
    /// Create empty text at the origin
    pub fn new() -> Self {
        Text {
            position: Vector2::ZERO,
            text: String::new(),
            height: 0.0,
            rotation: 0.0,
            style: None,
        }
    }

    /// Create text with content and height
    pub fn with_value(position: Vector2, text: impl Into<String>, height: f64) -> Self {
        Text {
            position,
            text: text.into(),
            height,
            ..Self::new()
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry for Text {
    fn extent_points(&self) -> Vec<Vector2> {
        vec![self.position]
    }
}
