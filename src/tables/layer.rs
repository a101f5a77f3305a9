//! Layer table entry

use super::TableEntry;
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Standard flags of a LAYER record (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: i16 {
        /// Layer is frozen
        const FROZEN = 1;
        /// Layer is locked
        const LOCKED = 4;
    }
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Color index; 7 (white / by-block) when unspecified
    pub color: i16,
    pub frozen: bool,
    pub locked: bool,
    /// A negative color index in the file marks the layer as switched off
    pub off: bool,
    /// Line type name (code 6)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
}

impl Layer {
    /// Default color index
    pub const DEFAULT_COLOR: i16 = 7;

    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            color: Self::DEFAULT_COLOR,
            frozen: false,
            locked: false,
            off: false,
            line_type: None,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Self::new("0")
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: i16) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    /// Apply a raw color index; negative values switch the layer off
    pub fn set_color_index(&mut self, index: i16) {
        self.off = index < 0;
        self.color = index.saturating_abs();
    }

    /// Apply the code 70 flag word
    pub fn set_flags(&mut self, flags: LayerFlags) {
        self.frozen = flags.contains(LayerFlags::FROZEN);
        self.locked = flags.contains(LayerFlags::LOCKED);
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let layer = Layer::layer_0();
        assert_eq!(layer.name, "0");
        assert_eq!(layer.color, 7);
        assert!(!layer.frozen && !layer.locked && !layer.off);
    }

    #[test]
    fn test_flag_bits() {
        let mut layer = Layer::new("Hidden");
        layer.set_flags(LayerFlags::from_bits_retain(5));
        assert!(layer.frozen);
        assert!(layer.locked);

        layer.set_flags(LayerFlags::from_bits_retain(2));
        assert!(!layer.frozen);
        assert!(!layer.locked);
    }

    #[test]
    fn test_negative_color_switches_off() {
        let mut layer = Layer::new("Dims");
        layer.set_color_index(-3);
        assert!(layer.off);
        assert_eq!(layer.color, 3);
    }
}
