//! Hex-row offset transforms.
//!
//! Both strategies scale the corner position by the sprite size, find the grid
//! row the vertex belongs to, then shift the row sideways (the stagger) and pull
//! it down (compaction) before snapping to whole pixels. They differ in how the
//! row is found and how the shift is derived.

use bevy::math::{Vec2, Vec3};

use crate::constants::{
    ROW_COMPACTION_FRACTION, SCALED_ROW_EPSILON, SCALED_SKEW_FRACTION, UNIT_ROW_EPSILON,
    UNIT_SKEW_FRACTION,
};
use crate::tile::atlas::AtlasRect;
use crate::tile::uv::{project_uv_exact, project_uv_texel_snapped};
use crate::tile::vertex::Corner;

/// One way of placing a tile vertex on screen.
pub trait TileVertexTransform {
    /// Chunk-local position of the vertex, already pixel-snapped.
    fn local_position(&self, position: Vec3, corner: Corner, sprite: Vec2) -> Vec3;

    /// Normalised atlas UV for the vertex.
    fn project_uv(&self, rect: &AtlasRect, corner: Corner, atlas_size: Vec2) -> Vec2;
}

/// Tiles stretched by the chunk's dimensions, staggered relative to the
/// chunk's middle row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaledTransform {
    pub chunk_dimensions: Vec2,
}

/// Tiles drawn at native sprite size, staggered by row parity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UnitTransform;

impl ScaledTransform {
    pub fn new(chunk_dimensions: Vec2) -> Self {
        Self { chunk_dimensions }
    }
}

impl TileVertexTransform for ScaledTransform {
    fn local_position(&self, position: Vec3, corner: Corner, sprite: Vec2) -> Vec3 {
        scaled_local_position(position, corner, sprite, self.chunk_dimensions)
    }

    fn project_uv(&self, rect: &AtlasRect, corner: Corner, atlas_size: Vec2) -> Vec2 {
        project_uv_exact(rect, corner, atlas_size)
    }
}

impl TileVertexTransform for UnitTransform {
    fn local_position(&self, position: Vec3, corner: Corner, sprite: Vec2) -> Vec3 {
        unit_local_position(position, corner, sprite)
    }

    fn project_uv(&self, rect: &AtlasRect, corner: Corner, atlas_size: Vec2) -> Vec2 {
        project_uv_texel_snapped(rect, corner, atlas_size)
    }
}

/// Row of a vertex whose y is normalised to the chunk (scaled transform).
pub fn scaled_row(y: f32, corner: Corner, rows: f32) -> f32 {
    let row = ((y + SCALED_ROW_EPSILON) * rows).floor();
    if corner.bumps_row() { row + 1.0 } else { row }
}

/// Row re-based so that zero falls on the chunk's middle.
pub fn centered_row(row: f32, rows: f32) -> f32 {
    row - 0.5 - rows * 0.5
}

/// Row of a vertex whose y is in whole cells (unit transform).
pub fn unit_row(y: f32, corner: Corner) -> f32 {
    let row = (y + UNIT_ROW_EPSILON).floor();
    if corner.bumps_row() { row + 1.0 } else { row }
}

/// Vertical distance one row is pulled toward its neighbour.
pub fn row_compaction(sprite: Vec2) -> f32 {
    (ROW_COMPACTION_FRACTION * sprite.y).ceil()
}

pub fn scaled_local_position(
    position: Vec3,
    corner: Corner,
    sprite: Vec2,
    chunk_dimensions: Vec2,
) -> Vec3 {
    let mut local = position.truncate() * sprite * chunk_dimensions;

    let row = scaled_row(position.y, corner, chunk_dimensions.y);
    let centered = centered_row(row, chunk_dimensions.y);

    let x_offset = (SCALED_SKEW_FRACTION * sprite.x).floor();
    local.x -= x_offset * centered;
    local.y -= centered * row_compaction(sprite);

    local.ceil().extend(position.z)
}

pub fn unit_local_position(position: Vec3, corner: Corner, sprite: Vec2) -> Vec3 {
    let mut local = position.truncate() * sprite;

    let row = unit_row(position.y, corner);

    let x_offset = (UNIT_SKEW_FRACTION * sprite.x).floor();
    if row.rem_euclid(2.0) == 0.0 {
        local.x += x_offset;
    } else {
        local.x -= x_offset;
    }
    local.y -= row * row_compaction(sprite);

    local.ceil().extend(position.z)
}
