//! Integration tests for format detection and the DWG fallback path

mod common;

use async_trait::async_trait;
use common::{floor_plan, temp_file};
use dxf_lens::io::dwg::{BridgeLoader, BridgeSlot, DwgBridge};
use dxf_lens::{
    Document, DrawingFormat, DrawingInput, DrawingParser, DxfError, ParserOptions, Result, Vector2,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// DWG header bytes for `signature`, padded past the code page field
fn dwg_bytes(signature: &[u8; 6]) -> Vec<u8> {
    let mut bytes = vec![0u8; 0x40];
    bytes[..6].copy_from_slice(signature);
    bytes[0x13] = 0x1E;
    bytes
}

fn parser_with(options: ParserOptions) -> DrawingParser {
    DrawingParser::new()
        .with_options(options)
        .with_bridge_slot(Arc::new(BridgeSlot::new()))
}

/// Bridge that decodes every drawing to a single point
struct PointBridge;

impl DwgBridge for PointBridge {
    fn name(&self) -> &str {
        "point"
    }

    fn decode(&self, _bytes: &[u8]) -> Result<Document> {
        let mut doc = Document::new();
        let mut entity = dxf_lens::Entity::new(dxf_lens::EntityKind::Point);
        entity.geometry = dxf_lens::EntityType::Point(dxf_lens::entities::Point::at(Vector2::new(4.0, 2.0)));
        doc.add_entity(entity);
        Ok(doc)
    }
}

#[derive(Default)]
struct CountingLoader {
    calls: AtomicUsize,
}

#[async_trait]
impl BridgeLoader for CountingLoader {
    async fn load(&self, _path: &Path) -> Result<Arc<dyn DwgBridge>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(PointBridge))
    }
}

#[tokio::test]
async fn test_dxf_text_routed_to_reader() {
    let parser = parser_with(ParserOptions::default());
    let parsed = parser.parse(DrawingInput::Text(floor_plan()), Some("plan.dxf")).await.unwrap();
    assert_eq!(parsed.format, DrawingFormat::Dxf);
    assert_eq!(parsed.document().unwrap().entities.len(), 5);
}

#[tokio::test]
async fn test_magic_bytes_route_to_dwg() {
    let options = ParserOptions {
        enable_dwg: false,
        ..ParserOptions::default()
    };
    let parser = parser_with(options);
    let parsed = parser.parse(dwg_bytes(b"AC1027").into(), None).await.unwrap();

    assert_eq!(parsed.format, DrawingFormat::Dwg);
    let fallback = parsed.fallback().expect("degraded result");
    assert_eq!(fallback.error, "DWG parsing is disabled");
    assert_eq!(fallback.version.as_deref(), Some("AC1027"));
    assert_eq!(fallback.release_name.as_deref(), Some("AutoCAD 2013"));
}

#[tokio::test]
async fn test_extension_routes_to_dwg() {
    let options = ParserOptions {
        enable_dwg: false,
        ..ParserOptions::default()
    };
    let parser = parser_with(options);
    let parsed = parser.parse(floor_plan().into(), Some("PLAN.DWG")).await.unwrap();
    assert_eq!(parsed.format, DrawingFormat::Dwg);
    assert!(parsed.document().is_none());
}

#[tokio::test]
async fn test_fallback_json_shape() {
    let options = ParserOptions {
        enable_dwg: false,
        server_parse_endpoint: "/convert".to_string(),
        ..ParserOptions::default()
    };
    let parser = parser_with(options);
    let parsed = parser.parse(b"AC".to_vec().into(), None).await.unwrap();
    let json = serde_json::to_value(&parsed).unwrap();

    assert_eq!(json["format"], "DWG");
    assert_eq!(json["error"], "DWG parsing is disabled");
    assert_eq!(json["suggestion"], "Enable it in options or use server-side parsing");
    assert_eq!(json["serverParseEndpoint"], "/convert");
    // header too short to carry a signature
    assert!(json.get("version").is_none());
}

#[tokio::test]
async fn test_missing_module_suggests_server_endpoint() {
    let options = ParserOptions {
        bridge_path: PathBuf::from("/definitely/not/here.wasm"),
        ..ParserOptions::default()
    };
    let parser = parser_with(options);
    let parsed = parser.parse(dwg_bytes(b"AC1015").into(), None).await.unwrap();
    let fallback = parsed.fallback().unwrap();
    assert_eq!(fallback.suggestion, "Use server-side parsing via /api/dwg/parse endpoint");
}

#[tokio::test]
async fn test_header_only_bridge_suggests_conversion() {
    let module = temp_file("bridge-module.wasm", b"\0asm");
    let options = ParserOptions {
        bridge_path: module,
        ..ParserOptions::default()
    };
    let parser = parser_with(options);
    let parsed = parser.parse(dwg_bytes(b"AC1032").into(), None).await.unwrap();
    let fallback = parsed.fallback().unwrap();
    assert_eq!(fallback.error, "full DWG parsing unavailable (AutoCAD 2018)");
    assert!(fallback.suggestion.starts_with("Convert DWG to DXF"));
}

#[tokio::test]
async fn test_custom_loader_decodes_and_is_reused() {
    let loader = Arc::new(CountingLoader::default());
    let parser = DrawingParser::new()
        .with_loader(loader.clone())
        .with_bridge_slot(Arc::new(BridgeSlot::new()));

    for _ in 0..3 {
        let parsed = parser.parse(dwg_bytes(b"AC1024").into(), None).await.unwrap();
        assert_eq!(parsed.format, DrawingFormat::Dwg);
        assert_eq!(parsed.document().unwrap().entities.len(), 1);
    }
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_file_input_sniffs_bytes() {
    let dxf = temp_file("sniffed.txt", floor_plan().as_bytes());
    let dwg = temp_file("sniffed.bin", &dwg_bytes(b"AC1018"));
    let options = ParserOptions {
        enable_dwg: false,
        ..ParserOptions::default()
    };
    let parser = parser_with(options);

    let parsed = parser.parse(dxf.into(), None).await.unwrap();
    assert_eq!(parsed.format, DrawingFormat::Dxf);
    let parsed = parser.parse(dwg.into(), None).await.unwrap();
    assert_eq!(parsed.format, DrawingFormat::Dwg);
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let parser = parser_with(ParserOptions::default());
    let result = parser
        .parse(DrawingInput::File(PathBuf::from("/no/such/drawing.dxf")), None)
        .await;
    assert!(matches!(result, Err(DxfError::Io(_))));
}
