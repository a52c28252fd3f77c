use thiserror::Error;

use crate::tile::atlas::AtlasRect;

/// Caller contract violations. The shaders render these as garbage geometry;
/// the CPU path reports them instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileError {
    #[error("tile index {index} is outside the atlas rect table (len {len})")]
    InvalidTileIndex { index: u32, len: usize },
    #[error("atlas rect {index} is degenerate: begin {:?}, end {:?}", .rect.begin, .rect.end)]
    DegenerateRect { index: u32, rect: AtlasRect },
    #[error("{len} atlas rects requested but the capacity is {capacity}")]
    CapacityExceeded { len: usize, capacity: usize },
}
