//! Per-vertex mapping for tiles laid out on a staggered hex ("brick wall") grid.
//!
//! This is the CPU form of the math the tile vertex shaders run on the GPU. Each
//! vertex of a tile quad resolves its sprite rect from the atlas table, works out
//! which grid row it belongs to, shifts and compacts that row, and picks the
//! atlas UV for its corner.

pub mod atlas;
pub mod batch;
pub mod error;
pub mod transform;
pub mod uv;
pub mod vertex;

pub use atlas::{AtlasRect, AtlasRectTable};
pub use batch::{TileDrawBatch, TileVariant, TileVertexOutput};
pub use error::TileError;
pub use transform::{ScaledTransform, TileVertexTransform, UnitTransform};
pub use vertex::{Corner, TileVertex};
