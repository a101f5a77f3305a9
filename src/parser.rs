//! Format dispatch: DXF text pipeline or the DWG bridge.
//!
//! [`DrawingParser::parse`] sniffs the input (file extension, text prefix
//! or byte magic), runs the DXF reader for text drawings, and routes DWG
//! content to the bridge held in a [`BridgeSlot`]. A DWG input that cannot
//! be decoded yields a [`DwgFallback`] instead of an error.

use crate::document::Document;
use crate::error::{DxfError, Result};
use crate::io::dwg::{self, BridgeLoader, BridgeSlot, DwgFileSignature, ModuleFileLoader};
use crate::io::dxf::DxfReader;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DISABLED_SUGGESTION: &str = "Enable it in options or use server-side parsing";
const CONVERT_SUGGESTION: &str = "Convert DWG to DXF using AutoCAD or use server-side parsing";

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Route DWG input to the bridge; when false DWG input degrades at once
    pub enable_dwg: bool,
    /// Where the bridge loader looks for the decoding module
    pub bridge_path: PathBuf,
    /// Fallback endpoint reported in degraded DWG results
    pub server_parse_endpoint: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            enable_dwg: true,
            bridge_path: PathBuf::from("/js/libredwg.wasm"),
            server_parse_endpoint: "/api/dwg/parse".to_string(),
        }
    }
}

/// Accepted input shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingInput {
    Text(String),
    Bytes(Vec<u8>),
    /// A file on disk; its name also drives extension sniffing
    File(PathBuf),
}

impl From<&str> for DrawingInput {
    fn from(text: &str) -> Self {
        DrawingInput::Text(text.to_string())
    }
}

impl From<String> for DrawingInput {
    fn from(text: String) -> Self {
        DrawingInput::Text(text)
    }
}

impl From<Vec<u8>> for DrawingInput {
    fn from(bytes: Vec<u8>) -> Self {
        DrawingInput::Bytes(bytes)
    }
}

impl From<&[u8]> for DrawingInput {
    fn from(bytes: &[u8]) -> Self {
        DrawingInput::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for DrawingInput {
    fn from(path: PathBuf) -> Self {
        DrawingInput::File(path)
    }
}

/// Which decoder a drawing was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingFormat {
    Dxf,
    Dwg,
}

impl DrawingFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DrawingFormat::Dxf => "DXF",
            DrawingFormat::Dwg => "DWG",
        }
    }
}

impl fmt::Display for DrawingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DrawingFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Degraded result for a DWG drawing that could not be decoded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DwgFallback {
    pub error: String,
    pub suggestion: String,
    pub server_parse_endpoint: String,
    /// Version signature from the file header, e.g. `AC1027`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
}

/// Body of a parse result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DrawingContent {
    Document(Document),
    Unavailable(DwgFallback),
}

/// Result of [`DrawingParser::parse`], tagged with the detected format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDrawing {
    pub format: DrawingFormat,
    #[serde(flatten)]
    pub content: DrawingContent,
}

impl ParsedDrawing {
    fn decoded(format: DrawingFormat, document: Document) -> Self {
        Self {
            format,
            content: DrawingContent::Document(document),
        }
    }

    fn unavailable(fallback: DwgFallback) -> Self {
        Self {
            format: DrawingFormat::Dwg,
            content: DrawingContent::Unavailable(fallback),
        }
    }

    /// The decoded document, if there is one
    pub fn document(&self) -> Option<&Document> {
        match &self.content {
            DrawingContent::Document(document) => Some(document),
            DrawingContent::Unavailable(_) => None,
        }
    }

    /// Take the decoded document
    pub fn into_document(self) -> Option<Document> {
        match self.content {
            DrawingContent::Document(document) => Some(document),
            DrawingContent::Unavailable(_) => None,
        }
    }

    /// The degraded DWG result, if decoding was not possible
    pub fn fallback(&self) -> Option<&DwgFallback> {
        match &self.content {
            DrawingContent::Document(_) => None,
            DrawingContent::Unavailable(fallback) => Some(fallback),
        }
    }
}

enum Source {
    Text(String),
    Bytes(Vec<u8>),
}

impl Source {
    fn looks_like_dwg(&self) -> bool {
        match self {
            Source::Text(text) => dwg::is_dwg_text(text),
            Source::Bytes(bytes) => dwg::is_dwg_bytes(bytes),
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Source::Text(text) => text.into_bytes(),
            Source::Bytes(bytes) => bytes,
        }
    }
}

/// Routes drawings to the DXF reader or the DWG bridge
pub struct DrawingParser {
    options: ParserOptions,
    loader: Arc<dyn BridgeLoader>,
    slot: Arc<BridgeSlot>,
}

impl DrawingParser {
    /// Parser with default options, the module-file loader and the global slot
    pub fn new() -> Self {
        Self {
            options: ParserOptions::default(),
            loader: Arc::new(ModuleFileLoader),
            slot: BridgeSlot::global(),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a different bridge loader
    pub fn with_loader(mut self, loader: Arc<dyn BridgeLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Use a private slot instead of the process-wide one
    pub fn with_bridge_slot(mut self, slot: Arc<BridgeSlot>) -> Self {
        self.slot = slot;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a drawing.
    ///
    /// `filename` is used only for extension sniffing; for file input the
    /// path's own name is used when `filename` is `None`.
    pub async fn parse(&self, input: DrawingInput, filename: Option<&str>) -> Result<ParsedDrawing> {
        let (source, name) = match input {
            DrawingInput::Text(text) => (Source::Text(text), filename.map(str::to_string)),
            DrawingInput::Bytes(bytes) => (Source::Bytes(bytes), filename.map(str::to_string)),
            DrawingInput::File(path) => {
                let bytes = read_input_file(&path).await?;
                let name = filename
                    .map(str::to_string)
                    .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()));
                (Source::Bytes(bytes), name)
            }
        };

        let by_extension = name.as_deref().map_or(false, dwg::has_dwg_extension);
        if by_extension || source.looks_like_dwg() {
            tracing::debug!(file = name.as_deref().unwrap_or("<memory>"), "routing to DWG bridge");
            return Ok(self.parse_dwg(source.into_bytes()).await);
        }

        let document = match &source {
            Source::Text(text) => DxfReader::from_text(text).read(),
            Source::Bytes(bytes) => DxfReader::from_bytes(bytes).read(),
        };
        Ok(ParsedDrawing::decoded(DrawingFormat::Dxf, document))
    }

    async fn parse_dwg(&self, bytes: Vec<u8>) -> ParsedDrawing {
        let signature = DwgFileSignature::read(&bytes).ok();

        if !self.options.enable_dwg {
            return self.fallback("DWG parsing is disabled", DISABLED_SUGGESTION, signature.as_ref());
        }

        let bridge = match self.slot.acquire(self.loader.as_ref(), &self.options.bridge_path).await {
            Ok(bridge) => bridge,
            Err(err) => {
                let message = match err {
                    DxfError::BridgeAcquisition(message) => message,
                    other => other.to_string(),
                };
                let suggestion = format!(
                    "Use server-side parsing via {} endpoint",
                    self.options.server_parse_endpoint
                );
                return self.fallback(&message, &suggestion, signature.as_ref());
            }
        };

        match bridge.decode(&bytes) {
            Ok(document) => ParsedDrawing::decoded(DrawingFormat::Dwg, document),
            Err(err) => {
                tracing::debug!(bridge = bridge.name(), error = %err, "DWG bridge could not decode drawing");
                let message = match err {
                    DxfError::UnsupportedFormat(message) => message,
                    other => other.to_string(),
                };
                self.fallback(&message, CONVERT_SUGGESTION, signature.as_ref())
            }
        }
    }

    fn fallback(&self, error: &str, suggestion: &str, signature: Option<&DwgFileSignature>) -> ParsedDrawing {
        ParsedDrawing::unavailable(DwgFallback {
            error: error.to_string(),
            suggestion: suggestion.to_string(),
            server_parse_endpoint: self.options.server_parse_endpoint.clone(),
            version: signature.map(|s| s.signature.clone()),
            release_name: signature.map(DwgFileSignature::release_name),
        })
    }
}

impl Default for DrawingParser {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_input_file(path: &Path) -> Result<Vec<u8>> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(DxfError::InvalidInputType(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    Ok(tokio::fs::read(path).await?)
}
