//! Named table records (layers, block definitions)

use indexmap::IndexMap;
use serde::Serialize;

pub mod block;
pub mod layer;

pub use block::Block;
pub use layer::{Layer, LayerFlags};

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;
}

/// Name-keyed table preserving first-seen order.
///
/// Names are matched exactly; re-adding a name replaces the stored entry
/// in place (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry, returning the entry it replaced
    pub fn add(&mut self, entry: T) -> Option<T> {
        self.entries.insert(entry.name().to_string(), entry)
    }

    /// Get an entry by exact name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Get an entry by name ignoring ASCII case
    pub fn get_ignore_case(&self, name: &str) -> Option<&T> {
        self.get(name).or_else(|| {
            self.entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, entry)| entry)
        })
    }

    /// Check if an entry exists (exact name)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        assert!(table.add(Layer::new("Walls")).is_none());
        assert!(table.contains("Walls"));
        assert!(!table.contains("walls"));
        assert!(table.get_ignore_case("WALLS").is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut table = Table::new();
        table.add(Layer::new("A"));
        table.add(Layer::new("B"));
        let replaced = table.add(Layer::with_color("A", 1));

        assert_eq!(replaced.map(|l| l.color), Some(7));
        assert_eq!(table.len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(table.get("A").map(|l| l.color), Some(1));
    }
}
