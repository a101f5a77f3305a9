//! Per-kind entity decoding.
//!
//! Each supported [`EntityKind`] has a [`ShapeDecoder`] registered in a
//! lookup table. The shared loop in [`decode_entity`] handles the common
//! codes (layer, color, handle, line type) and hands every other pair of
//! the record to the kind's decoder. Codes a decoder does not know are
//! ignored.

use super::pair_cursor::PairCursor;
use super::tokenizer::CodePair;
use crate::entities::*;
use crate::notification::ParseDiagnostics;
use crate::types::Vector2;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::mem;

/// What a decoder did with one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Applied,
    Ignored,
    /// The code belongs to the shape but its value could not be used
    Malformed,
}

/// Builds one geometry payload from the pairs of a single record
pub trait ShapeDecoder {
    /// Apply one type-specific pair
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome;

    /// Produce the payload once the record ends
    fn finish(self: Box<Self>) -> EntityType;
}

type DecoderFactory = fn() -> Box<dyn ShapeDecoder>;

fn boxed<D: ShapeDecoder + Default + 'static>() -> Box<dyn ShapeDecoder> {
    Box::new(D::default())
}

fn text_decoder() -> Box<dyn ShapeDecoder> {
    Box::new(TextDecoder::new(false))
}

fn mtext_decoder() -> Box<dyn ShapeDecoder> {
    Box::new(TextDecoder::new(true))
}

static DECODERS: Lazy<AHashMap<EntityKind, DecoderFactory>> = Lazy::new(|| {
    let mut table: AHashMap<EntityKind, DecoderFactory> = AHashMap::new();
    table.insert(EntityKind::Line, boxed::<LineDecoder>);
    table.insert(EntityKind::Circle, boxed::<CircleDecoder>);
    table.insert(EntityKind::Arc, boxed::<ArcDecoder>);
    table.insert(EntityKind::LwPolyline, boxed::<PolylineDecoder>);
    table.insert(EntityKind::Polyline, boxed::<PolylineDecoder>);
    table.insert(EntityKind::Text, text_decoder);
    table.insert(EntityKind::MText, mtext_decoder);
    table.insert(EntityKind::Insert, boxed::<InsertDecoder>);
    table.insert(EntityKind::Ellipse, boxed::<EllipseDecoder>);
    table.insert(EntityKind::Dimension, boxed::<DimensionDecoder>);
    table.insert(EntityKind::Spline, boxed::<SplineDecoder>);
    table.insert(EntityKind::Point, boxed::<PointDecoder>);
    table.insert(EntityKind::Solid, boxed::<FaceDecoder>);
    table.insert(EntityKind::Face3D, boxed::<FaceDecoder>);
    table
});

/// Kind for a record tag, if a decoder is registered for it
pub fn supported_kind(tag: &str) -> Option<EntityKind> {
    EntityKind::from_name(tag).filter(|kind| DECODERS.contains_key(kind))
}

/// Decode one entity record.
///
/// `cursor` must sit just after the record's `(0, <type>)` tag. Pairs are
/// consumed up to the next tag; for `POLYLINE` the trailing `VERTEX`
/// records and the closing `SEQEND` are consumed as well.
pub fn decode_entity(
    kind: EntityKind,
    cursor: &mut PairCursor<'_>,
    diagnostics: &mut ParseDiagnostics,
) -> Entity {
    let Some(factory) = DECODERS.get(&kind) else {
        cursor.skip_record_body();
        return Entity::new(kind);
    };
    let mut shape = factory();
    let mut common = EntityCommon::new();

    while let Some(pair) = cursor.next_if(|p| p.code != 0) {
        let outcome = match pair.code {
            8 => {
                if !pair.value.is_empty() {
                    common.layer = pair.value.to_string();
                }
                FieldOutcome::Applied
            }
            62 => match pair.as_i16() {
                Some(color) => {
                    common.color = Some(color);
                    FieldOutcome::Applied
                }
                None => FieldOutcome::Malformed,
            },
            5 => {
                common.handle = Some(pair.value.to_string());
                FieldOutcome::Applied
            }
            6 => {
                common.line_type = Some(pair.value.to_string());
                FieldOutcome::Applied
            }
            _ => shape.apply(&pair),
        };

        if outcome == FieldOutcome::Malformed {
            tracing::trace!(
                entity = %kind,
                code = pair.code,
                value = pair.value,
                pair = cursor.position(),
                "malformed field"
            );
            diagnostics.malformed_fields += 1;
        }
    }

    let mut geometry = shape.finish();
    if kind == EntityKind::Polyline {
        let vertices = read_vertex_records(cursor, diagnostics);
        if let EntityType::Polyline(polyline) = &mut geometry {
            if !vertices.is_empty() {
                polyline.vertices = vertices;
            }
        }
    }

    Entity::with_geometry(kind, common, geometry)
}

/// Read the `VERTEX` records and `SEQEND` trailing an old-style POLYLINE
fn read_vertex_records(
    cursor: &mut PairCursor<'_>,
    diagnostics: &mut ParseDiagnostics,
) -> Vec<PolylineVertex> {
    let mut vertices = Vec::new();
    while cursor.next_if(|p| p.is_tag("VERTEX")).is_some() {
        let mut vertex = PolylineVertex::new(0.0, 0.0);
        while let Some(pair) = cursor.next_if(|p| p.code != 0) {
            let target = match pair.code {
                10 => &mut vertex.x,
                20 => &mut vertex.y,
                42 => &mut vertex.bulge,
                _ => continue,
            };
            if set_f64(target, &pair) == FieldOutcome::Malformed {
                diagnostics.malformed_fields += 1;
            }
        }
        vertices.push(vertex);
    }

    if cursor.next_if(|p| p.is_tag("SEQEND")).is_some() {
        cursor.skip_record_body();
    }
    vertices
}

fn set_f64(target: &mut f64, pair: &CodePair<'_>) -> FieldOutcome {
    match pair.as_double() {
        Some(value) => {
            *target = value;
            FieldOutcome::Applied
        }
        None => FieldOutcome::Malformed,
    }
}

fn set_i16(target: &mut i16, pair: &CodePair<'_>) -> FieldOutcome {
    match pair.as_i16() {
        Some(value) => {
            *target = value;
            FieldOutcome::Applied
        }
        None => FieldOutcome::Malformed,
    }
}

#[derive(Debug, Default)]
enum ChainState {
    /// No vertex open; a y or bulge here has nothing to attach to
    #[default]
    Idle,
    /// Vertex opened by its x, waiting for y and bulge
    Open(PolylineVertex),
}

/// Vertex builder for shapes that list points as repeated 10/20(/42) codes.
///
/// Code 10 opens a vertex; 20 and 42 complete the open one. A 20 or 42
/// arriving while idle is malformed and dropped.
#[derive(Debug, Default)]
pub struct VertexChain {
    vertices: Vec<PolylineVertex>,
    state: ChainState,
}

impl VertexChain {
    /// Code 10. An unreadable x drops the vertex and leaves the chain idle.
    pub fn open(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        self.close();
        match pair.as_double() {
            Some(x) => {
                self.state = ChainState::Open(PolylineVertex::new(x, 0.0));
                FieldOutcome::Applied
            }
            None => FieldOutcome::Malformed,
        }
    }

    /// Code 20
    pub fn set_y(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match &mut self.state {
            ChainState::Open(vertex) => set_f64(&mut vertex.y, pair),
            ChainState::Idle => FieldOutcome::Malformed,
        }
    }

    /// Code 42
    pub fn set_bulge(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match &mut self.state {
            ChainState::Open(vertex) => set_f64(&mut vertex.bulge, pair),
            ChainState::Idle => FieldOutcome::Malformed,
        }
    }

    fn close(&mut self) {
        if let ChainState::Open(vertex) = mem::take(&mut self.state) {
            self.vertices.push(vertex);
        }
    }

    /// All completed vertices, including the one still open
    pub fn finish(mut self) -> Vec<PolylineVertex> {
        self.close();
        self.vertices
    }

    /// Vertex locations, bulges dropped
    pub fn finish_points(self) -> Vec<Vector2> {
        self.finish().iter().map(PolylineVertex::location).collect()
    }
}

#[derive(Default)]
struct LineDecoder(Line);

impl ShapeDecoder for LineDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => set_f64(&mut self.0.start.x, pair),
            20 => set_f64(&mut self.0.start.y, pair),
            11 => set_f64(&mut self.0.end.x, pair),
            21 => set_f64(&mut self.0.end.y, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Line(self.0)
    }
}

#[derive(Default)]
struct CircleDecoder(Circle);

impl ShapeDecoder for CircleDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => set_f64(&mut self.0.center.x, pair),
            20 => set_f64(&mut self.0.center.y, pair),
            40 => set_f64(&mut self.0.radius, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Circle(self.0)
    }
}

#[derive(Default)]
struct ArcDecoder(Arc);

impl ShapeDecoder for ArcDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => set_f64(&mut self.0.center.x, pair),
            20 => set_f64(&mut self.0.center.y, pair),
            40 => set_f64(&mut self.0.radius, pair),
            50 => set_f64(&mut self.0.start_angle, pair),
            51 => set_f64(&mut self.0.end_angle, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Arc(self.0)
    }
}

#[derive(Default)]
struct PolylineDecoder {
    chain: VertexChain,
    flags: i16,
}

impl ShapeDecoder for PolylineDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => self.chain.open(pair),
            20 => self.chain.set_y(pair),
            42 => self.chain.set_bulge(pair),
            70 => set_i16(&mut self.flags, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Polyline(Polyline {
            vertices: self.chain.finish(),
            closed: self.flags & 1 != 0,
        })
    }
}

struct TextDecoder {
    text: Text,
    /// MTEXT only: code 3 continuation chunks
    chunks: Option<String>,
}

impl TextDecoder {
    fn new(long_text: bool) -> Self {
        Self {
            text: Text::new(),
            chunks: long_text.then(String::new),
        }
    }
}

impl ShapeDecoder for TextDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match (pair.code, self.chunks.as_mut()) {
            (1, _) => {
                self.text.text = pair.value.to_string();
                FieldOutcome::Applied
            }
            (3, Some(chunks)) => {
                chunks.push_str(pair.value);
                FieldOutcome::Applied
            }
            (7, _) => {
                self.text.style = Some(pair.value.to_string());
                FieldOutcome::Applied
            }
            (10, _) => set_f64(&mut self.text.position.x, pair),
            (20, _) => set_f64(&mut self.text.position.y, pair),
            (40, _) => set_f64(&mut self.text.height, pair),
            (50, _) => set_f64(&mut self.text.rotation, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        let TextDecoder { mut text, chunks } = *self;
        if let Some(mut chunks) = chunks.filter(|c| !c.is_empty()) {
            chunks.push_str(&text.text);
            text.text = chunks;
        }
        EntityType::Text(text)
    }
}

#[derive(Default)]
struct InsertDecoder(Insert);

impl ShapeDecoder for InsertDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            2 => {
                self.0.block_name = pair.value.to_string();
                FieldOutcome::Applied
            }
            10 => set_f64(&mut self.0.position.x, pair),
            20 => set_f64(&mut self.0.position.y, pair),
            41 => set_f64(&mut self.0.scale_x, pair),
            42 => set_f64(&mut self.0.scale_y, pair),
            50 => set_f64(&mut self.0.rotation, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Insert(self.0)
    }
}

#[derive(Default)]
struct EllipseDecoder(Ellipse);

impl ShapeDecoder for EllipseDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => set_f64(&mut self.0.center.x, pair),
            20 => set_f64(&mut self.0.center.y, pair),
            11 => set_f64(&mut self.0.major_axis.x, pair),
            21 => set_f64(&mut self.0.major_axis.y, pair),
            40 => set_f64(&mut self.0.ratio, pair),
            41 => set_f64(&mut self.0.start_angle, pair),
            42 => set_f64(&mut self.0.end_angle, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Ellipse(self.0)
    }
}

#[derive(Default)]
struct DimensionDecoder(Dimension);

impl ShapeDecoder for DimensionDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            1 => {
                self.0.text = pair.value.to_string();
                FieldOutcome::Applied
            }
            10 => set_f64(&mut self.0.position.x, pair),
            20 => set_f64(&mut self.0.position.y, pair),
            70 => set_i16(&mut self.0.dimension_type, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Dimension(self.0)
    }
}

#[derive(Default)]
struct SplineDecoder {
    control: VertexChain,
    fit: VertexChain,
    degree: Option<i16>,
}

impl ShapeDecoder for SplineDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => self.control.open(pair),
            20 => self.control.set_y(pair),
            11 => self.fit.open(pair),
            21 => self.fit.set_y(pair),
            71 => match pair.as_i16() {
                Some(degree) => {
                    self.degree = Some(degree);
                    FieldOutcome::Applied
                }
                None => FieldOutcome::Malformed,
            },
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        let mut spline = Spline::new();
        spline.control_points = self.control.finish_points();
        spline.fit_points = self.fit.finish_points();
        if let Some(degree) = self.degree {
            spline.degree = degree;
        }
        EntityType::Spline(spline)
    }
}

#[derive(Default)]
struct PointDecoder(Point);

impl ShapeDecoder for PointDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        match pair.code {
            10 => set_f64(&mut self.0.position.x, pair),
            20 => set_f64(&mut self.0.position.y, pair),
            _ => FieldOutcome::Ignored,
        }
    }

    fn finish(self: Box<Self>) -> EntityType {
        EntityType::Point(self.0)
    }
}

#[derive(Default)]
struct FaceDecoder {
    corners: [Vector2; 4],
    has_fourth: bool,
}

impl ShapeDecoder for FaceDecoder {
    fn apply(&mut self, pair: &CodePair<'_>) -> FieldOutcome {
        let (index, is_x) = match pair.code {
            10..=13 => ((pair.code - 10) as usize, true),
            20..=23 => ((pair.code - 20) as usize, false),
            _ => return FieldOutcome::Ignored,
        };
        let corner = &mut self.corners[index];
        let outcome = set_f64(if is_x { &mut corner.x } else { &mut corner.y }, pair);
        if index == 3 && outcome == FieldOutcome::Applied {
            self.has_fourth = true;
        }
        outcome
    }

    fn finish(self: Box<Self>) -> EntityType {
        let mut corners = self.corners;
        if !self.has_fourth {
            corners[3] = corners[2];
        }
        EntityType::Face(Face { corners })
    }
}
