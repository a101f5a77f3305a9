//! Parsed drawing document

use crate::entities::Entity;
use crate::notification::ParseDiagnostics;
use crate::tables::{Block, Layer, Table};
use crate::types::{AcadVersion, Bounds};
use indexmap::IndexMap;
use serde::Serialize;

/// One code/value pair captured under a header variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderEntry {
    pub code: i32,
    pub value: String,
}

/// Value(s) of a `$VARIABLE` in the HEADER section.
///
/// A variable followed by exactly one pair stores that pair's value;
/// anything else (points, empty variables) keeps every pair in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<HeaderEntry>),
}

impl HeaderValue {
    /// Build from the pairs captured for one variable
    pub fn from_entries(mut entries: Vec<HeaderEntry>) -> Self {
        if entries.len() == 1 {
            HeaderValue::Single(entries.remove(0).value)
        } else {
            HeaderValue::Multiple(entries)
        }
    }

    /// The scalar value, if this variable held exactly one pair
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Multiple(_) => None,
        }
    }

    /// Value stored under `code`, searching multi-pair variables too
    pub fn value_for_code(&self, code: i32) -> Option<&str> {
        match self {
            HeaderValue::Single(_) => None,
            HeaderValue::Multiple(entries) => entries
                .iter()
                .find(|e| e.code == code)
                .map(|e| e.value.as_str()),
        }
    }
}

/// Summary counts of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub entity_count: usize,
    pub layer_count: usize,
    pub block_count: usize,
}

/// Top-level result of decoding a drawing.
///
/// Built once by a single parse; query helpers return new documents
/// instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub header: IndexMap<String, HeaderValue>,
    pub layers: Table<Layer>,
    pub blocks: Table<Block>,
    /// Top-level entities in file order
    pub entities: Vec<Entity>,
    /// Extents of `entities`; the empty sentinel when nothing was placed
    pub bounds: Bounds,
    pub diagnostics: ParseDiagnostics,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document {
            header: IndexMap::new(),
            layers: Table::new(),
            blocks: Table::new(),
            entities: Vec::new(),
            bounds: Bounds::EMPTY,
            diagnostics: ParseDiagnostics::new(),
        }
    }

    /// Append an entity and widen the bounds to cover it
    pub fn add_entity(&mut self, entity: Entity) {
        self.bounds.update(&entity);
        self.entities.push(entity);
    }

    /// Same header, tables, bounds and diagnostics with a different entity list.
    ///
    /// Bounds are carried over unchanged, not recomputed.
    pub fn with_entities(&self, entities: Vec<Entity>) -> Document {
        Document {
            header: self.header.clone(),
            layers: self.layers.clone(),
            blocks: self.blocks.clone(),
            entities,
            bounds: self.bounds,
            diagnostics: self.diagnostics.clone(),
        }
    }

    /// Look up a header variable, e.g. `"$ACADVER"`
    pub fn header_value(&self, name: &str) -> Option<&HeaderValue> {
        self.header.get(name)
    }

    /// Drawing version from `$ACADVER`, `None` when the header lacks it
    pub fn version(&self) -> Option<AcadVersion> {
        self.header_value("$ACADVER")
            .and_then(HeaderValue::as_str)
            .map(AcadVersion::from_version_string)
    }

    /// Entity, layer and block counts
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            entity_count: self.entities.len(),
            layer_count: self.layers.len(),
            block_count: self.blocks.len(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
