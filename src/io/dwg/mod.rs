//! DWG (binary drawing) detection and the decoding bridge.
//!
//! DWG content is never decoded here. This module recognises it, reads the
//! fixed file-header fields, and hands the bytes to a pluggable
//! [`DwgBridge`] when one can be acquired.
//!
//! # Module Structure
//!
//! - [`bridge`]: bridge and loader traits, and the process-wide [`BridgeSlot`]

pub mod bridge;

pub use bridge::{BridgeLoader, BridgeSlot, DwgBridge, HeaderOnlyBridge, ModuleFileLoader};

use crate::error::{DxfError, Result};
use crate::types::AcadVersion;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Offset of the maintenance release byte
const MAINTENANCE_OFFSET: u64 = 0x0B;
/// Offset of the drawing code page (u16 LE)
const CODE_PAGE_OFFSET: u64 = 0x13;

/// True when `filename` carries the `.dwg` extension (any case)
pub fn has_dwg_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("dwg"))
}

/// True when text content starts with a DWG version signature
pub fn is_dwg_text(text: &str) -> bool {
    text.starts_with("AC10") || text.starts_with("AC21")
}

/// True when a byte buffer starts with the `AC` magic
pub fn is_dwg_bytes(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x41, 0x43])
}

/// Fixed fields at the start of every DWG file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwgFileSignature {
    /// Raw 6-byte version string, e.g. `AC1027`
    pub signature: String,
    pub version: AcadVersion,
    pub maintenance_version: u8,
    pub code_page: u16,
}

impl DwgFileSignature {
    /// Read the signature from the first bytes of a DWG file.
    ///
    /// Fails when the buffer is shorter than the fixed header fields.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(bytes);

        let mut raw = [0u8; 6];
        reader.read_exact(&mut raw)?;
        let signature = String::from_utf8_lossy(&raw).into_owned();
        if !signature.starts_with("AC") {
            return Err(DxfError::Custom(format!("not a DWG signature: {signature:?}")));
        }

        reader.seek(SeekFrom::Start(MAINTENANCE_OFFSET))?;
        let maintenance_version = reader.read_u8()?;

        reader.seek(SeekFrom::Start(CODE_PAGE_OFFSET))?;
        let code_page = reader.read_u16::<LittleEndian>()?;

        Ok(Self {
            version: AcadVersion::from_version_string(&signature),
            signature,
            maintenance_version,
            code_page,
        })
    }

    /// Human-readable release, e.g. `AutoCAD 2013`
    pub fn release_name(&self) -> String {
        match self.version.release_name() {
            Some(name) => name.to_string(),
            None => format!("Unknown ({})", self.signature),
        }
    }
}
