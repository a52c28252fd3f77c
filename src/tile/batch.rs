use bevy::math::{Mat4, Vec2, Vec4};

use crate::tile::atlas::AtlasRectTable;
use crate::tile::error::TileError;
use crate::tile::transform::{ScaledTransform, TileVertexTransform, UnitTransform};
use crate::tile::vertex::{Corner, TileVertex};

/// The transform a draw batch is rendered with. Picked once per batch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TileVariant {
    Scaled(ScaledTransform),
    Unit(UnitTransform),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileVertexOutput {
    pub clip_position: Vec4,
    pub uv: Vec2,
    pub color: Vec4,
}

/// Everything bound for one draw: camera, chunk transform, atlas and strategy.
#[derive(Clone, Debug)]
pub struct TileDrawBatch<'a> {
    pub view_proj: Mat4,
    pub chunk_transform: Mat4,
    pub atlas_size: Vec2,
    pub rects: &'a AtlasRectTable,
    pub variant: TileVariant,
}

impl<'a> TileDrawBatch<'a> {
    pub fn new(rects: &'a AtlasRectTable, atlas_size: Vec2, variant: TileVariant) -> Self {
        Self {
            view_proj: Mat4::IDENTITY,
            chunk_transform: Mat4::IDENTITY,
            atlas_size,
            rects,
            variant,
        }
    }

    pub fn with_view_proj(mut self, view_proj: Mat4) -> Self {
        self.view_proj = view_proj;
        self
    }

    pub fn with_chunk_transform(mut self, chunk_transform: Mat4) -> Self {
        self.chunk_transform = chunk_transform;
        self
    }

    /// Transforms the `ordinal`-th vertex of the chunk mesh.
    pub fn transform_vertex(
        &self,
        ordinal: usize,
        vertex: &TileVertex,
    ) -> Result<TileVertexOutput, TileError> {
        match &self.variant {
            TileVariant::Scaled(strategy) => self.apply(strategy, ordinal, vertex),
            TileVariant::Unit(strategy) => self.apply(strategy, ordinal, vertex),
        }
    }

    /// Transforms a whole mesh; a vertex's ordinal is its position in `vertices`.
    pub fn transform_vertices(
        &self,
        vertices: &[TileVertex],
    ) -> Result<Vec<TileVertexOutput>, TileError> {
        if vertices.len() % 4 != 0 {
            log::warn!(
                "tile batch of {} vertices is not made of whole quads",
                vertices.len()
            );
        }
        match &self.variant {
            TileVariant::Scaled(strategy) => self.apply_all(strategy, vertices),
            TileVariant::Unit(strategy) => self.apply_all(strategy, vertices),
        }
    }

    fn apply_all<T: TileVertexTransform>(
        &self,
        strategy: &T,
        vertices: &[TileVertex],
    ) -> Result<Vec<TileVertexOutput>, TileError> {
        vertices
            .iter()
            .enumerate()
            .map(|(ordinal, vertex)| self.apply(strategy, ordinal, vertex))
            .collect()
    }

    fn apply<T: TileVertexTransform>(
        &self,
        strategy: &T,
        ordinal: usize,
        vertex: &TileVertex,
    ) -> Result<TileVertexOutput, TileError> {
        let corner = Corner::from_vertex_ordinal(ordinal);
        let rect = self.rects.resolve(vertex.tile_index)?;

        let local = strategy.local_position(vertex.position, corner, rect.dimensions());
        let clip_position = self.view_proj * self.chunk_transform * local.extend(1.0);

        Ok(TileVertexOutput {
            clip_position,
            uv: strategy.project_uv(&rect, corner, self.atlas_size),
            color: vertex.color,
        })
    }
}
