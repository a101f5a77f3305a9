//! DXF section readers

use super::entity_decoder::{decode_entity, supported_kind};
use super::pair_cursor::PairCursor;
use super::tokenizer::CodePair;
use crate::document::{Document, HeaderEntry, HeaderValue};
use crate::notification::NotificationType;
use crate::tables::{Block, Layer, LayerFlags};

/// Section reader for parsing DXF sections.
///
/// Every reader stops *before* the section boundary (`ENDSEC`, a stray
/// `SECTION` or `EOF`); the caller consumes the `ENDSEC`.
pub struct SectionReader<'c, 'a> {
    cursor: &'c mut PairCursor<'a>,
}

impl<'c, 'a> SectionReader<'c, 'a> {
    /// Create a new section reader
    pub fn new(cursor: &'c mut PairCursor<'a>) -> Self {
        Self { cursor }
    }

    /// Read the HEADER section.
    ///
    /// Each `(9, $NAME)` marker owns the pairs up to the next marker or tag.
    pub fn read_header(&mut self, document: &mut Document) {
        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if pair.code != 9 {
                tracing::trace!(code = pair.code, value = pair.value, "stray header pair skipped");
                continue;
            }

            let mut entries = Vec::new();
            while let Some(value) = self.cursor.next_if(|p| p.code != 9 && p.code != 0) {
                entries.push(HeaderEntry {
                    code: value.code,
                    value: value.value.to_string(),
                });
            }
            document
                .header
                .insert(pair.value.to_string(), HeaderValue::from_entries(entries));
        }
        tracing::debug!(variables = document.header.len(), "header section read");
    }

    /// Read the TABLES section. Only the LAYER table is decoded.
    pub fn read_tables(&mut self, document: &mut Document) {
        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if !pair.is_tag("TABLE") {
                continue;
            }

            let table_name = self.cursor.next_if(|p| p.code == 2).map(|p| p.value);
            match table_name {
                Some("LAYER") => self.read_layer_table(document),
                Some(name) => {
                    tracing::trace!(table = name, "table skipped");
                    self.skip_to_endtab();
                }
                None => self.skip_to_endtab(),
            }
        }
        tracing::debug!(layers = document.layers.len(), "tables section read");
    }

    /// Read the BLOCKS section
    pub fn read_blocks(&mut self, document: &mut Document) {
        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if pair.is_tag("BLOCK") {
                self.read_block(document);
            }
        }
        tracing::debug!(blocks = document.blocks.len(), "blocks section read");
    }

    /// Read the ENTITIES section
    pub fn read_entities(&mut self, document: &mut Document) {
        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if pair.code != 0 {
                tracing::trace!(code = pair.code, "stray pair outside entity record");
                continue;
            }
            match supported_kind(pair.value) {
                Some(kind) => {
                    let entity = decode_entity(kind, self.cursor, &mut document.diagnostics);
                    document.add_entity(entity);
                }
                None => self.skip_entity(pair, document),
            }
        }
        tracing::debug!(entities = document.entities.len(), "entities section read");
    }

    /// Skip a section this reader does not decode
    pub fn skip_section(&mut self, name: &str, document: &mut Document) {
        let mut skipped = 0usize;
        while !self.cursor.at_section_end() && self.cursor.next_pair().is_some() {
            skipped += 1;
        }
        tracing::debug!(section = name, pairs = skipped, "section skipped");
        document
            .diagnostics
            .notify(NotificationType::NotSupported, format!("{name} section skipped"));
    }

    fn skip_to_endtab(&mut self) {
        while !self.cursor.at_section_end() {
            if let Some(pair) = self.cursor.next_pair() {
                if pair.is_tag("ENDTAB") {
                    break;
                }
            }
        }
    }

    fn skip_entity(&mut self, tag: CodePair<'a>, document: &mut Document) {
        tracing::trace!(entity = tag.value, pair = self.cursor.position(), "unsupported entity skipped");
        document.diagnostics.skipped_entities += 1;
        self.cursor.skip_record_body();
    }

    // ===== Table Readers =====

    /// Read LAYER table
    fn read_layer_table(&mut self, document: &mut Document) {
        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if pair.is_tag("ENDTAB") {
                break;
            }
            if pair.is_tag("LAYER") {
                self.read_layer_entry(document);
            }
        }
    }

    /// Read a single LAYER entry; the last entry with a given name wins
    fn read_layer_entry(&mut self, document: &mut Document) {
        let mut layer = Layer::new("");

        while let Some(pair) = self.cursor.next_if(|p| p.code != 0) {
            match pair.code {
                2 => layer.name = pair.value.to_string(),
                6 => layer.line_type = Some(pair.value.to_string()),
                62 => match pair.as_i16() {
                    Some(index) => layer.set_color_index(index),
                    None => document.diagnostics.malformed_fields += 1,
                },
                70 => match pair.as_i16() {
                    Some(bits) => layer.set_flags(LayerFlags::from_bits_truncate(bits)),
                    None => document.diagnostics.malformed_fields += 1,
                },
                _ => {}
            }
        }

        if layer.name.is_empty() {
            document
                .diagnostics
                .notify(NotificationType::Warning, "layer record without a name dropped");
            return;
        }
        document.layers.add(layer);
    }

    // ===== Block Readers =====

    /// Read a single BLOCK...ENDBLK definition.
    ///
    /// Name and base point come from the BLOCK record only. The block is
    /// committed when ENDBLK is reached and it has a name.
    fn read_block(&mut self, document: &mut Document) {
        let mut block = Block::new("");

        while let Some(pair) = self.cursor.next_if(|p| p.code != 0) {
            let target = match pair.code {
                2 => {
                    block.name = pair.value.to_string();
                    continue;
                }
                10 => &mut block.base_point.x,
                20 => &mut block.base_point.y,
                _ => continue,
            };
            match pair.as_double() {
                Some(value) => *target = value,
                None => document.diagnostics.malformed_fields += 1,
            }
        }

        while !self.cursor.at_section_end() {
            let Some(pair) = self.cursor.next_pair() else { break };
            if pair.is_tag("ENDBLK") {
                self.cursor.skip_record_body();
                self.commit_block(block, document);
                return;
            }
            if pair.code != 0 {
                continue;
            }
            match supported_kind(pair.value) {
                Some(kind) => {
                    let entity = decode_entity(kind, self.cursor, &mut document.diagnostics);
                    block.entities.push(entity);
                }
                None => self.skip_entity(pair, document),
            }
        }

        tracing::trace!(block = %block.name, "block not terminated by ENDBLK; dropped");
    }

    fn commit_block(&mut self, block: Block, document: &mut Document) {
        if block.name.is_empty() {
            document
                .diagnostics
                .notify(NotificationType::Warning, "block definition without a name dropped");
            return;
        }
        tracing::debug!(block = %block.name, entities = block.entities.len(), "block committed");
        document.blocks.add(block);
    }
}
