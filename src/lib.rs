//! # dxf-lens
//!
//! A DXF drawing reader with SVG and GeoJSON renderers.
//!
//! ASCII DXF text is tokenized into group code / value pairs, decoded
//! section by section into a [`Document`] (header variables, layers,
//! blocks, entities and their bounds), and rendered to SVG markup or a
//! GeoJSON feature collection. DWG input is recognised and routed to an
//! optional decoding bridge; when no bridge is available the parse
//! degrades to a descriptive result instead of failing.
//!
//! ## Features
//!
//! - Tolerant single-pass DXF decoding with diagnostics for skipped data
//! - 14 entity kinds of the common 2D drafting set
//! - Code page aware decoding of pre-2007 files
//! - Memoized, process-wide DWG bridge acquisition
//! - Layer statistics and layer/type filters
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_lens::{io::dxf::DxfReader, render};
//!
//! let doc = DxfReader::from_file("plan.dxf")?.read();
//! println!("{} entities in {}", doc.entities.len(), doc.bounds);
//!
//! let svg = render::to_svg(&doc, &render::SvgOptions::default());
//! let geojson = render::to_geojson(&doc).to_json_string()?;
//! # Ok::<(), dxf_lens::error::DxfError>(())
//! ```
//!
//! Mixed DXF/DWG input goes through [`DrawingParser`]:
//!
//! ```rust,ignore
//! let parsed = DrawingParser::new().parse(bytes.into(), Some("plan.dwg")).await?;
//! match parsed.fallback() {
//!     Some(fallback) => eprintln!("{}: {}", fallback.error, fallback.suggestion),
//!     None => { /* parsed.document() */ }
//! }
//! ```

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod parser;
pub mod query;
pub mod render;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{AcadVersion, Bounds, Vector2};

// Re-export entity types
pub use entities::{Entity, EntityCommon, EntityKind, EntityType};

// Re-export table types
pub use tables::{Block, Layer, Table, TableEntry};

// Re-export document
pub use document::{Document, DocumentStats, HeaderValue};
pub use notification::{Notification, NotificationType, ParseDiagnostics};

// Re-export dispatch, rendering and queries
pub use io::dxf::DxfReader;
pub use parser::{DrawingFormat, DrawingInput, DrawingParser, DwgFallback, ParsedDrawing, ParserOptions};
pub use query::{filter_by_layers, filter_by_types, layer_stats, LayerStats};
pub use render::{to_geojson, to_svg, SvgOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
