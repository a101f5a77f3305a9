//! SVG rendering.
//!
//! The drawing's bounds are fitted into the canvas minus padding, keeping
//! the aspect ratio, and the Y axis is flipped (model space is Y-up, SVG
//! is Y-down). Each entity maps to at most one element; kinds without a
//! drawing rule are left out.

use super::SvgOptions;
use crate::document::Document;
use crate::entities::{Arc, Entity, EntityType};
use crate::types::{Bounds, Vector2};

/// Model-space to canvas mapping for one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    origin: Vector2,
    scale: f64,
    padding: f64,
    height: f64,
}

impl ViewTransform {
    /// Fit `bounds` into the canvas described by `options`.
    ///
    /// Returns `None` for empty bounds. An axis with zero extent does not
    /// constrain the scale; when both do, the scale is 1.
    pub fn fit(bounds: &Bounds, options: &SvgOptions) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        let available_width = options.width - 2.0 * options.padding;
        let available_height = options.height - 2.0 * options.padding;

        let scale_x = (bounds.width() > 0.0).then(|| available_width / bounds.width());
        let scale_y = (bounds.height() > 0.0).then(|| available_height / bounds.height());
        let scale = match (scale_x, scale_y) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        Some(Self {
            origin: Vector2::new(bounds.min_x, bounds.min_y),
            scale,
            padding: options.padding,
            height: options.height,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a model point onto the canvas
    pub fn apply(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            self.padding + (point.x - self.origin.x) * self.scale,
            self.height - self.padding - (point.y - self.origin.y) * self.scale,
        )
    }

    /// Map a model length onto the canvas
    pub fn length(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// Render a document as a standalone SVG document
pub fn to_svg(document: &Document, options: &SvgOptions) -> String {
    let elements: Vec<String> = match ViewTransform::fit(&document.bounds, options) {
        Some(view) => document
            .entities
            .iter()
            .filter_map(|entity| entity_to_svg(entity, &view, options.color_for(entity.layer())))
            .collect(),
        None => Vec::new(),
    };

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" style=\"background-color: {bg}\">\n",
        w = num(options.width),
        h = num(options.height),
        bg = escape_xml(&options.background_color),
    ));
    out.push_str(&format!(
        "  <g stroke=\"{}\" stroke-width=\"{}\" fill=\"none\">\n",
        escape_xml(&options.stroke_color),
        num(options.stroke_width),
    ));
    for element in &elements {
        out.push_str("    ");
        out.push_str(element);
        out.push('\n');
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn entity_to_svg(entity: &Entity, view: &ViewTransform, color: &str) -> Option<String> {
    let color = escape_xml(color);
    let element = match &entity.geometry {
        EntityType::Line(line) => {
            let a = view.apply(line.start);
            let b = view.apply(line.end);
            format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{color}\"/>",
                num(a.x),
                num(a.y),
                num(b.x),
                num(b.y)
            )
        }
        EntityType::Circle(circle) => circle_element(view.apply(circle.center), view.length(circle.radius), &color),
        EntityType::Arc(arc) => arc_element(arc, view, &color),
        EntityType::Polyline(polyline) => {
            if polyline.vertices.len() < 2 {
                return None;
            }
            let points: Vec<String> = polyline
                .vertices
                .iter()
                .map(|v| {
                    let p = view.apply(v.location());
                    format!("{},{}", num(p.x), num(p.y))
                })
                .collect();
            let tag = if polyline.closed { "polygon" } else { "polyline" };
            format!("<{tag} points=\"{}\" stroke=\"{color}\"/>", points.join(" "))
        }
        EntityType::Text(text) => {
            let p = view.apply(text.position);
            let height = if text.height > 0.0 { text.height } else { 1.0 };
            format!(
                "<text x=\"{x}\" y=\"{y}\" font-size=\"{}\" transform=\"rotate({} {x} {y})\" fill=\"{color}\" stroke=\"none\">{}</text>",
                num(view.length(height)),
                num(-text.rotation),
                escape_xml(&text.text),
                x = num(p.x),
                y = num(p.y),
            )
        }
        EntityType::Ellipse(ellipse) => {
            let c = view.apply(ellipse.center);
            format!(
                "<ellipse cx=\"{x}\" cy=\"{y}\" rx=\"{}\" ry=\"{}\" transform=\"rotate({} {x} {y})\" stroke=\"{color}\"/>",
                num(view.length(ellipse.major_radius())),
                num(view.length(ellipse.minor_radius())),
                num(-ellipse.rotation_degrees()),
                x = num(c.x),
                y = num(c.y),
            )
        }
        EntityType::Point(point) => {
            let p = view.apply(point.position);
            format!("<circle cx=\"{}\" cy=\"{}\" r=\"2\" fill=\"{color}\"/>", num(p.x), num(p.y))
        }
        EntityType::Insert(_)
        | EntityType::Dimension(_)
        | EntityType::Spline(_)
        | EntityType::Face(_) => return None,
    };
    Some(element)
}

fn circle_element(center: Vector2, radius: f64, color: &str) -> String {
    format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" stroke=\"{color}\"/>",
        num(center.x),
        num(center.y),
        num(radius)
    )
}

fn arc_element(arc: &Arc, view: &ViewTransform, color: &str) -> String {
    let sweep = arc.sweep_degrees();
    let radius = view.length(arc.radius);
    if sweep >= 360.0 {
        return circle_element(view.apply(arc.center), radius, color);
    }
    let start = view.apply(arc.start_point());
    let end = view.apply(arc.end_point());
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "<path d=\"M {} {} A {r} {r} 0 {large_arc} 0 {} {}\" stroke=\"{color}\"/>",
        num(start.x),
        num(start.y),
        num(end.x),
        num(end.y),
        r = num(radius),
    )
}

/// Round to 4 decimals without trailing zeros
fn num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityCommon, EntityKind, Line, Text};

    fn view_for(bounds: Bounds) -> ViewTransform {
        ViewTransform::fit(&bounds, &SvgOptions::default()).unwrap()
    }

    #[test]
    fn test_fit_scale() {
        let view = view_for(Bounds::new(0.0, 0.0, 100.0, 50.0));
        assert!((view.scale() - 7.6).abs() < 1e-12);
        assert_eq!(view.apply(Vector2::new(0.0, 0.0)), Vector2::new(20.0, 580.0));
    }

    #[test]
    fn test_degenerate_axes() {
        let horizontal = view_for(Bounds::new(0.0, 0.0, 10.0, 0.0));
        assert!((horizontal.scale() - 76.0).abs() < 1e-12);
        let single_point = view_for(Bounds::new(3.0, 3.0, 3.0, 3.0));
        assert_eq!(single_point.scale(), 1.0);
        assert!(ViewTransform::fit(&Bounds::EMPTY, &SvgOptions::default()).is_none());
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(7.6), "7.6");
        assert_eq!(num(1.23456789), "1.2346");
        assert_eq!(num(-0.00001), "0");
        assert_eq!(num(20.0), "20");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_empty_document() {
        let svg = to_svg(&Document::new(), &SvgOptions::default());
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn test_layer_color_override() {
        let mut doc = Document::new();
        doc.add_entity(Entity::with_geometry(
            EntityKind::Line,
            EntityCommon::with_layer("Walls"),
            EntityType::Line(Line::from_points(Vector2::new(0.0, 0.0), Vector2::new(10.0, 5.0))),
        ));
        let mut options = SvgOptions::default();
        options.layer_colors.insert("Walls".into(), "#ff0000".into());
        let svg = to_svg(&doc, &options);
        assert!(svg.contains("stroke=\"#ff0000\""));
    }

    #[test]
    fn test_arc_flags() {
        let view = view_for(Bounds::new(-1.0, -1.0, 1.0, 1.0));
        let small = arc_element(&Arc::from_center(Vector2::ZERO, 1.0, 0.0, 90.0), &view, "#000");
        assert!(small.contains(" 0 0 0 "));
        let large = arc_element(&Arc::from_center(Vector2::ZERO, 1.0, 0.0, 270.0), &view, "#000");
        assert!(large.contains(" 0 1 0 "));
        let wrapped = arc_element(&Arc::from_center(Vector2::ZERO, 1.0, 350.0, 10.0), &view, "#000");
        assert!(wrapped.contains(" 0 0 0 "));
        let full = arc_element(&Arc::from_center(Vector2::ZERO, 1.0, 45.0, 45.0), &view, "#000");
        assert!(full.starts_with("<circle"));
    }

    #[test]
    fn test_text_height_fallback() {
        let mut doc = Document::new();
        let mut entity = Entity::new(EntityKind::Text);
        entity.geometry = EntityType::Text(Text::with_value(Vector2::new(0.0, 0.0), "A&B", 0.0));
        doc.add_entity(entity);
        doc.bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let svg = to_svg(&doc, &SvgOptions::default());
        assert!(svg.contains("font-size=\"56\""));
        assert!(svg.contains(">A&amp;B</text>"));
    }
}
