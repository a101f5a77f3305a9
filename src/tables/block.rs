//! Block definitions

use super::TableEntry;
use crate::entities::Entity;
use crate::types::Vector2;
use serde::Serialize;

/// A named, reusable group of entities placed by INSERT references.
///
/// Block entities are kept here and never copied into the drawing's
/// top-level entity list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub name: String,
    /// Origin used when the block is placed
    pub base_point: Vector2,
    pub entities: Vec<Entity>,
}

impl Block {
    /// Create an empty block definition
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            base_point: Vector2::ZERO,
            entities: Vec::new(),
        }
    }
}

impl TableEntry for Block {
    fn name(&self) -> &str {
        &self.name
    }
}
