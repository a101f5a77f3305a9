//! Output renderers: SVG markup and GeoJSON feature collections

pub mod geojson;
pub mod svg;

pub use geojson::{to_geojson, Feature, FeatureCollection, FeatureGeometry, FeatureProperties};
pub use svg::{to_svg, ViewTransform};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// SVG rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    /// Margin kept free on every side, in output units
    pub padding: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub background_color: String,
    /// Stroke color per layer name, overriding `stroke_color`
    pub layer_colors: IndexMap<String, String>,
}

impl SvgOptions {
    /// Options for a `width` x `height` canvas, everything else default
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Stroke color for entities on `layer`
    pub fn color_for(&self, layer: &str) -> &str {
        self.layer_colors
            .get(layer)
            .map(String::as_str)
            .unwrap_or(&self.stroke_color)
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 20.0,
            stroke_color: "#000000".to_string(),
            stroke_width: 1.0,
            background_color: "#ffffff".to_string(),
            layer_colors: IndexMap::new(),
        }
    }
}
