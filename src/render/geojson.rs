//! GeoJSON FeatureCollection mapping.
//!
//! Points, lines, polylines and circles become features; every other kind
//! has no planar geometry mapping and is left out.

use crate::document::Document;
use crate::entities::{Entity, EntityKind, EntityType};
use crate::error::Result;
use crate::types::Vector2;
use serde::Serialize;

/// Chords used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 36;

const CRS84: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

type Position = [f64; 2];

fn position(point: Vector2) -> Position {
    [point.x, point.y]
}

/// Feature geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum FeatureGeometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub layer: String,
    pub color: Option<i16>,
    #[serde(rename = "type")]
    pub entity_type: EntityKind,
    pub handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub geometry: FeatureGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrsProperties {
    pub name: String,
}

/// Named coordinate reference system member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "name")]
pub struct Crs {
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub crs: Crs,
}

impl FeatureCollection {
    /// Serialize as a JSON string
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Map a document to a feature collection
pub fn to_geojson(document: &Document) -> FeatureCollection {
    FeatureCollection {
        features: document.entities.iter().filter_map(to_feature).collect(),
        crs: Crs {
            properties: CrsProperties {
                name: CRS84.to_string(),
            },
        },
    }
}

fn to_feature(entity: &Entity) -> Option<Feature> {
    let geometry = match &entity.geometry {
        EntityType::Point(point) => FeatureGeometry::Point(position(point.position)),
        EntityType::Line(line) => FeatureGeometry::LineString(vec![position(line.start), position(line.end)]),
        EntityType::Polyline(polyline) => {
            if polyline.vertices.len() < 2 {
                return None;
            }
            let mut coords: Vec<Position> = polyline.vertices.iter().map(|v| [v.x, v.y]).collect();
            if polyline.closed {
                coords.push(coords[0]);
                FeatureGeometry::Polygon(vec![coords])
            } else {
                FeatureGeometry::LineString(coords)
            }
        }
        EntityType::Circle(circle) => FeatureGeometry::Polygon(vec![circle
            .to_ring(CIRCLE_SEGMENTS)
            .into_iter()
            .map(position)
            .collect()]),
        _ => return None,
    };

    Some(Feature {
        properties: FeatureProperties {
            layer: entity.common.layer.clone(),
            color: entity.common.color,
            entity_type: entity.kind,
            handle: entity.common.handle.clone(),
        },
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, EntityCommon, Polyline};

    fn doc_with(kind: EntityKind, geometry: EntityType) -> Document {
        let mut doc = Document::new();
        doc.add_entity(Entity::with_geometry(kind, EntityCommon::new(), geometry));
        doc
    }

    #[test]
    fn test_closed_polyline_polygon() {
        let points = [Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), Vector2::new(10.0, 10.0)];
        let doc = doc_with(EntityKind::LwPolyline, EntityType::Polyline(Polyline::from_points(&points, true)));
        let fc = to_geojson(&doc);
        let FeatureGeometry::Polygon(rings) = &fc.features[0].geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][3], rings[0][0]);
    }

    #[test]
    fn test_circle_ring() {
        let doc = doc_with(
            EntityKind::Circle,
            EntityType::Circle(Circle::from_center(Vector2::new(5.0, 5.0), 2.0)),
        );
        let fc = to_geojson(&doc);
        let FeatureGeometry::Polygon(rings) = &fc.features[0].geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0].len(), 37);
        assert_eq!(rings[0][0], rings[0][36]);
    }

    #[test]
    fn test_short_polyline_omitted() {
        let doc = doc_with(
            EntityKind::LwPolyline,
            EntityType::Polyline(Polyline::from_points(&[Vector2::new(1.0, 1.0)], false)),
        );
        assert!(to_geojson(&doc).features.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let doc = doc_with(EntityKind::Point, EntityType::Point(crate::entities::Point::at(Vector2::new(1.0, 2.0))));
        let json = serde_json::to_value(to_geojson(&doc)).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["crs"]["type"], "name");
        assert_eq!(json["crs"]["properties"]["name"], CRS84);
        let feature = &json["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], serde_json::json!([1.0, 2.0]));
        assert_eq!(feature["properties"]["type"], "POINT");
        assert_eq!(feature["properties"]["layer"], "0");
    }
}
