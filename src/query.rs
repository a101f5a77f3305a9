//! Per-layer statistics and entity filters.
//!
//! Filters return a new [`Document`] whose header, tables, bounds and
//! diagnostics are those of the input; only the entity list changes.
//! Bounds are not recomputed.

use crate::document::Document;
use crate::entities::EntityKind;
use ahash::AHashSet;
use indexmap::IndexMap;
use serde::Serialize;

/// Entity counts for one layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStats {
    pub name: String,
    pub entity_count: usize,
    /// Count per entity kind, in first-seen order
    pub types: IndexMap<EntityKind, usize>,
    /// Color from the layer table, when the layer is defined there (any case)
    pub color: Option<i16>,
}

/// Statistics for every layer referenced by an entity, in first-seen order
pub fn layer_stats(document: &Document) -> IndexMap<String, LayerStats> {
    let mut stats: IndexMap<String, LayerStats> = IndexMap::new();
    for entity in &document.entities {
        let layer = entity.layer();
        let entry = stats.entry(layer.to_string()).or_insert_with(|| LayerStats {
            name: layer.to_string(),
            entity_count: 0,
            types: IndexMap::new(),
            color: document.layers.get_ignore_case(layer).map(|l| l.color),
        });
        entry.entity_count += 1;
        *entry.types.entry(entity.kind).or_insert(0) += 1;
    }
    stats
}

/// Keep entities on any of `layers`, compared case-insensitively
pub fn filter_by_layers<S: AsRef<str>>(document: &Document, layers: &[S]) -> Document {
    let wanted: AHashSet<String> = layers.iter().map(|l| l.as_ref().to_lowercase()).collect();
    let entities = document
        .entities
        .iter()
        .filter(|e| wanted.contains(&e.layer().to_lowercase()))
        .cloned()
        .collect();
    document.with_entities(entities)
}

/// Keep entities whose type is one of `types`, compared after upper-casing.
///
/// Names that are not entity types match nothing.
pub fn filter_by_types<S: AsRef<str>>(document: &Document, types: &[S]) -> Document {
    let wanted: AHashSet<String> = types.iter().map(|t| t.as_ref().to_uppercase()).collect();
    let entities = document
        .entities
        .iter()
        .filter(|e| wanted.contains(e.kind.name()))
        .cloned()
        .collect();
    document.with_entities(entities)
}
