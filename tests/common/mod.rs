//! Shared test utilities for dxf-lens integration tests.
//!
//! [`DxfBuilder`] assembles DXF text pair by pair so each test can state
//! only the records it cares about.

#![allow(dead_code)]

use dxf_lens::{Document, DxfReader};
use std::path::PathBuf;

// ===========================================================================
// DXF text builder
// ===========================================================================

/// Incremental writer for group-code/value text
#[derive(Debug, Default, Clone)]
pub struct DxfBuilder {
    lines: Vec<String>,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pair, code right-aligned the way CAD exporters write it
    pub fn pair(mut self, code: i32, value: impl ToString) -> Self {
        self.lines.push(format!("{code:>3}"));
        self.lines.push(value.to_string());
        self
    }

    pub fn section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    /// HEADER section holding a single `$ACADVER`
    pub fn header_version(self, version: &str) -> Self {
        self.section("HEADER")
            .pair(9, "$ACADVER")
            .pair(1, version)
            .end_section()
    }

    /// TABLES section with one LAYER table
    pub fn layers(self, layers: &[(&str, i16)]) -> Self {
        let mut builder = self.section("TABLES").pair(0, "TABLE").pair(2, "LAYER").pair(70, layers.len());
        for (name, color) in layers {
            builder = builder.pair(0, "LAYER").pair(2, name).pair(70, 0).pair(62, color).pair(6, "CONTINUOUS");
        }
        builder.pair(0, "ENDTAB").end_section()
    }

    pub fn line(self, layer: &str, start: (f64, f64), end: (f64, f64)) -> Self {
        self.pair(0, "LINE")
            .pair(8, layer)
            .pair(10, start.0)
            .pair(20, start.1)
            .pair(11, end.0)
            .pair(21, end.1)
    }

    pub fn circle(self, layer: &str, center: (f64, f64), radius: f64) -> Self {
        self.pair(0, "CIRCLE")
            .pair(8, layer)
            .pair(10, center.0)
            .pair(20, center.1)
            .pair(40, radius)
    }

    pub fn point(self, layer: &str, at: (f64, f64)) -> Self {
        self.pair(0, "POINT").pair(8, layer).pair(10, at.0).pair(20, at.1)
    }

    pub fn lwpolyline(mut self, layer: &str, points: &[(f64, f64)], closed: bool) -> Self {
        self = self
            .pair(0, "LWPOLYLINE")
            .pair(8, layer)
            .pair(90, points.len())
            .pair(70, if closed { 1 } else { 0 });
        for (x, y) in points {
            self = self.pair(10, x).pair(20, y);
        }
        self
    }

    pub fn text(self, layer: &str, at: (f64, f64), height: f64, value: &str) -> Self {
        self.pair(0, "TEXT")
            .pair(8, layer)
            .pair(10, at.0)
            .pair(20, at.1)
            .pair(40, height)
            .pair(1, value)
    }

    pub fn spline(mut self, layer: &str, control_points: &[(f64, f64)]) -> Self {
        self = self.pair(0, "SPLINE").pair(8, layer).pair(71, 3);
        for (x, y) in control_points {
            self = self.pair(10, x).pair(20, y);
        }
        self
    }

    /// Triangular SOLID; the fourth corner is left for the reader to default
    pub fn solid(self, layer: &str, a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        self.pair(0, "SOLID")
            .pair(8, layer)
            .pair(10, a.0)
            .pair(20, a.1)
            .pair(11, b.0)
            .pair(21, b.1)
            .pair(12, c.0)
            .pair(22, c.1)
    }

    /// Raw line, for malformed input
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Terminate with EOF and join
    pub fn build(self) -> String {
        let mut text = self.pair(0, "EOF").lines.join("\n");
        text.push('\n');
        text
    }

    /// Join without an EOF marker
    pub fn build_unterminated(self) -> String {
        self.lines.join("\n")
    }
}

/// An ENTITIES-only drawing with the given body
pub fn entities_only(body: impl FnOnce(DxfBuilder) -> DxfBuilder) -> String {
    body(DxfBuilder::new().section("ENTITIES")).end_section().build()
}

/// Parse DXF text with default settings
pub fn read(text: &str) -> Document {
    DxfReader::from_text(text).read()
}

// ===========================================================================
// Files
// ===========================================================================

/// Write `contents` to a fresh file under the system temp dir
pub fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dxf-lens-tests-{}", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}

/// A small floor plan used across the rendering tests
pub fn floor_plan() -> String {
    DxfBuilder::new()
        .header_version("AC1015")
        .layers(&[("Walls", 1), ("Doors", 3)])
        .section("ENTITIES")
        .line("Walls", (0.0, 0.0), (100.0, 0.0))
        .line("Walls", (100.0, 0.0), (100.0, 50.0))
        .lwpolyline("Walls", &[(0.0, 0.0), (0.0, 50.0), (100.0, 50.0)], false)
        .circle("Doors", (20.0, 10.0), 5.0)
        .text("Annotations", (50.0, 25.0), 2.5, "Kitchen & Dining")
        .end_section()
        .build()
}
