//! Leaf value types shared by the decoders and renderers

pub mod bounds;
pub mod vector;
pub mod version;

pub use bounds::Bounds;
pub use vector::Vector2;
pub use version::AcadVersion;
