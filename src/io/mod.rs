//! I/O module for recognising and reading drawings in DXF and DWG formats

pub mod dwg;
pub mod dxf;

pub use dwg::{BridgeSlot, DwgFileSignature};
pub use dxf::DxfReader;
