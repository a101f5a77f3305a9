//! DXF file reader

mod entity_decoder;
mod pair_cursor;
mod section_reader;
mod tokenizer;

pub use entity_decoder::{decode_entity, supported_kind, FieldOutcome, ShapeDecoder, VertexChain};
pub use pair_cursor::PairCursor;
pub use tokenizer::{CodePair, Tokenizer};

use section_reader::SectionReader;

use super::code_page::decode_dxf_bytes;
use crate::document::Document;
use crate::error::{DxfError, Result};
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::Path;

/// ASCII DXF reader.
///
/// Reading never fails once the text is in hand: malformed pairs, unknown
/// sections and unsupported records are skipped and counted in the
/// document's diagnostics.
pub struct DxfReader<'a> {
    text: Cow<'a, str>,
}

impl<'a> DxfReader<'a> {
    /// Create a reader over DXF text
    pub fn from_text(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
        }
    }

    /// Create a reader over raw DXF bytes, decoding them first
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            text: decode_dxf_bytes(bytes),
        }
    }

    /// The decoded text this reader parses
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Read the text into a [`Document`]
    pub fn read(&self) -> Document {
        let mut cursor = PairCursor::new(&self.text);
        let mut document = Document::new();

        while let Some(pair) = cursor.next_pair() {
            if pair.is_tag("EOF") {
                break;
            }
            if !pair.is_tag("SECTION") {
                tracing::trace!(code = pair.code, value = pair.value, "pair outside any section skipped");
                continue;
            }
            let Some(name) = cursor.next_if(|p| p.code == 2) else {
                continue;
            };

            let mut reader = SectionReader::new(&mut cursor);
            match name.value {
                "HEADER" => reader.read_header(&mut document),
                "TABLES" => reader.read_tables(&mut document),
                "BLOCKS" => reader.read_blocks(&mut document),
                "ENTITIES" => reader.read_entities(&mut document),
                other => reader.skip_section(other, &mut document),
            }
            cursor.next_if(|p| p.is_tag("ENDSEC"));
        }

        document.diagnostics.skipped_pairs += cursor.skipped_pairs();
        tracing::info!(
            entities = document.entities.len(),
            layers = document.layers.len(),
            blocks = document.blocks.len(),
            skipped_pairs = document.diagnostics.skipped_pairs,
            skipped_entities = document.diagnostics.skipped_entities,
            malformed_fields = document.diagnostics.malformed_fields,
            "DXF parsed"
        );
        document
    }

    /// Parse independent inputs in parallel, preserving input order
    pub fn read_many(inputs: &[&str]) -> Vec<Document> {
        inputs
            .par_iter()
            .map(|text| DxfReader::from_text(text).read())
            .collect()
    }
}

impl DxfReader<'static> {
    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(DxfError::InvalidInputType(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        let text = decode_dxf_bytes(&bytes).into_owned();
        Ok(Self {
            text: Cow::Owned(text),
        })
    }
}
