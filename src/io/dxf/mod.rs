//! DXF (Drawing Exchange Format) reading

mod code_page;
mod reader;

pub use code_page::{decode_dxf_bytes, encoding_from_code_page};
pub use reader::{
    decode_entity, supported_kind, CodePair, DxfReader, FieldOutcome, PairCursor, ShapeDecoder,
    Tokenizer, VertexChain,
};
