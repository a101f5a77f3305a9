//! Integration tests for SVG and GeoJSON output and layer queries

mod common;

use common::{entities_only, floor_plan, read};
use dxf_lens::render::FeatureGeometry;
use dxf_lens::{filter_by_layers, filter_by_types, layer_stats, to_geojson, to_svg, EntityKind, SvgOptions};

#[test]
fn test_svg_floor_plan() {
    let doc = read(&floor_plan());
    let svg = to_svg(&doc, &SvgOptions::default());

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
    assert_eq!(svg.matches("<line ").count(), 2);
    assert_eq!(svg.matches("<polyline ").count(), 1);
    assert_eq!(svg.matches("<circle ").count(), 1);
    assert!(svg.contains("Kitchen &amp; Dining"));
    // (0,0) lands on the bottom-left padding corner, scale 7.6
    assert!(svg.contains("x1=\"20\" y1=\"580\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_respects_canvas_size_and_layer_colors() {
    let doc = read(&floor_plan());
    let mut options = SvgOptions::sized(400.0, 400.0);
    options.padding = 0.0;
    options.layer_colors.insert("Doors".into(), "#00aa00".into());
    let svg = to_svg(&doc, &options);

    assert!(svg.contains("width=\"400\" height=\"400\""));
    assert_eq!(svg.matches("stroke=\"#00aa00\"").count(), 1);
}

#[test]
fn test_svg_skips_shapes_without_drawing_rule() {
    let text = entities_only(|b| {
        b.point("0", (0.0, 0.0))
            .pair(0, "INSERT")
            .pair(2, "Door")
            .pair(10, 5.0)
            .pair(20, 5.0)
    });
    let svg = to_svg(&read(&text), &SvgOptions::default());
    assert_eq!(svg.matches("<circle ").count(), 1);
    assert!(!svg.contains("Door"));
}

#[test]
fn test_geojson_floor_plan() {
    let doc = read(&floor_plan());
    let collection = to_geojson(&doc);

    // text is not mapped
    assert_eq!(collection.features.len(), 4);
    assert!(matches!(collection.features[0].geometry, FeatureGeometry::LineString(ref c) if c.len() == 2));
    assert!(matches!(collection.features[3].geometry, FeatureGeometry::Polygon(ref r) if r[0].len() == 37));

    let json: serde_json::Value = serde_json::from_str(&collection.to_json_string().unwrap()).unwrap();
    assert_eq!(json["features"][3]["properties"]["layer"], "Doors");
    assert_eq!(json["features"][3]["properties"]["type"], "CIRCLE");
}

#[test]
fn test_layer_stats_floor_plan() {
    let doc = read(&floor_plan());
    let stats = layer_stats(&doc);

    let names: Vec<&str> = stats.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Walls", "Doors", "Annotations"]);
    assert_eq!(stats["Walls"].entity_count, 3);
    assert_eq!(stats["Walls"].types[&EntityKind::LwPolyline], 1);
    assert_eq!(stats["Doors"].color, Some(3));
    assert_eq!(stats["Annotations"].color, None);
}

#[test]
fn test_filters_compose() {
    let doc = read(&floor_plan());
    let walls = filter_by_layers(&doc, &["walls"]);
    let lines = filter_by_types(&walls, &["line"]);

    assert_eq!(walls.entities.len(), 3);
    assert_eq!(lines.entities.len(), 2);
    assert_eq!(lines.bounds, doc.bounds);
    assert_eq!(lines.layers, doc.layers);
    assert_eq!(doc.entities.len(), 5);
}
