//! Drawing entity model
//!
//! An [`Entity`] is a tagged record: the [`EntityKind`] discriminant as it
//! appears in the file (`LINE`, `LWPOLYLINE`, `3DFACE`, ...), the
//! [`EntityCommon`] properties every record may carry, and an
//! [`EntityType`] payload holding the geometry for that shape. Several kinds
//! share one payload (`TEXT`/`MTEXT`, `LWPOLYLINE`/`POLYLINE`,
//! `SOLID`/`3DFACE`).

use crate::types::Vector2;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod arc;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod face;
pub mod insert;
pub mod line;
pub mod point;
pub mod polyline;
pub mod spline;
pub mod text;

pub use arc::Arc;
pub use circle::Circle;
pub use dimension::Dimension;
pub use ellipse::Ellipse;
pub use face::Face;
pub use insert::Insert;
pub use line::Line;
pub use point::Point;
pub use polyline::{Polyline, PolylineVertex};
pub use spline::Spline;
pub use text::Text;

/// Geometry behaviour shared by every payload
pub trait Geometry {
    /// Points folded into the drawing extents.
    ///
    /// Circles and arcs report the two corners of their bounding square,
    /// even for arcs whose sweep covers less than the full circle.
    fn extent_points(&self) -> Vec<Vector2>;
}

/// Entity type tag as written after group code 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Line,
    Circle,
    Arc,
    LwPolyline,
    Polyline,
    Text,
    MText,
    Insert,
    Ellipse,
    Dimension,
    Spline,
    Point,
    Solid,
    Face3D,
}

impl EntityKind {
    /// Every supported kind
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Line,
        EntityKind::Circle,
        EntityKind::Arc,
        EntityKind::LwPolyline,
        EntityKind::Polyline,
        EntityKind::Text,
        EntityKind::MText,
        EntityKind::Insert,
        EntityKind::Ellipse,
        EntityKind::Dimension,
        EntityKind::Spline,
        EntityKind::Point,
        EntityKind::Solid,
        EntityKind::Face3D,
    ];

    /// Type name as it appears in the file
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Line => "LINE",
            EntityKind::Circle => "CIRCLE",
            EntityKind::Arc => "ARC",
            EntityKind::LwPolyline => "LWPOLYLINE",
            EntityKind::Polyline => "POLYLINE",
            EntityKind::Text => "TEXT",
            EntityKind::MText => "MTEXT",
            EntityKind::Insert => "INSERT",
            EntityKind::Ellipse => "ELLIPSE",
            EntityKind::Dimension => "DIMENSION",
            EntityKind::Spline => "SPLINE",
            EntityKind::Point => "POINT",
            EntityKind::Solid => "SOLID",
            EntityKind::Face3D => "3DFACE",
        }
    }

    /// Look up a kind by its exact file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Empty payload a decoder starts filling for this kind
    pub fn empty_geometry(&self) -> EntityType {
        match self {
            EntityKind::Line => EntityType::Line(Line::new()),
            EntityKind::Circle => EntityType::Circle(Circle::new()),
            EntityKind::Arc => EntityType::Arc(Arc::new()),
            EntityKind::LwPolyline | EntityKind::Polyline => EntityType::Polyline(Polyline::new()),
            EntityKind::Text | EntityKind::MText => EntityType::Text(Text::new()),
            EntityKind::Insert => EntityType::Insert(Insert::new()),
            EntityKind::Ellipse => EntityType::Ellipse(Ellipse::new()),
            EntityKind::Dimension => EntityType::Dimension(Dimension::new()),
            EntityKind::Spline => EntityType::Spline(Spline::new()),
            EntityKind::Point => EntityType::Point(Point::new()),
            EntityKind::Solid | EntityKind::Face3D => EntityType::Face(Face::new()),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = crate::error::DxfError;

    /// Case-insensitive parse, used by query filters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.trim().to_ascii_uppercase())
            .ok_or_else(|| crate::error::DxfError::Custom(format!("unknown entity type: {s}")))
    }
}

impl Serialize for EntityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Properties every entity record may carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCommon {
    /// Layer name (code 8), `"0"` when absent
    pub layer: String,
    /// Color index override (code 62)
    pub color: Option<i16>,
    /// Opaque handle (code 5)
    pub handle: Option<String>,
    /// Line type name (code 6)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            layer: "0".to_string(),
            color: None,
            handle: None,
            line_type: None,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry payload, one variant per shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityType {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Polyline(Polyline),
    Text(Text),
    Insert(Insert),
    Ellipse(Ellipse),
    Dimension(Dimension),
    Spline(Spline),
    Point(Point),
    Face(Face),
}

impl EntityType {
    fn as_geometry(&self) -> &dyn Geometry {
        match self {
            EntityType::Line(g) => g,
            EntityType::Circle(g) => g,
            EntityType::Arc(g) => g,
            EntityType::Polyline(g) => g,
            EntityType::Text(g) => g,
            EntityType::Insert(g) => g,
            EntityType::Ellipse(g) => g,
            EntityType::Dimension(g) => g,
            EntityType::Spline(g) => g,
            EntityType::Point(g) => g,
            EntityType::Face(g) => g,
        }
    }
}

/// A decoded drawing entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(flatten)]
    pub common: EntityCommon,
    #[serde(flatten)]
    pub geometry: EntityType,
}

impl Entity {
    /// Create an entity of `kind` with default common data and empty geometry
    pub fn new(kind: EntityKind) -> Self {
        Entity {
            kind,
            common: EntityCommon::new(),
            geometry: kind.empty_geometry(),
        }
    }

    /// Create an entity from an already built payload
    pub fn with_geometry(kind: EntityKind, common: EntityCommon, geometry: EntityType) -> Self {
        Entity { kind, common, geometry }
    }

    /// Layer name
    pub fn layer(&self) -> &str {
        &self.common.layer
    }

    /// Points folded into the drawing extents
    pub fn extent_points(&self) -> Vec<Vector2> {
        self.geometry.as_geometry().extent_points()
    }
}
