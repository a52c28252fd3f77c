use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy_mesh::Indices;

use crate::config::settings::{TileRenderConfig, VariantKind};
use crate::rendering::material::ATTRIBUTE_TILE_INDEX;
use crate::tile::TileVertex;

// Empty cells still occupy a quad; the fragment stage discards alpha 0.
const EMPTY_TILE_INDEX: u32 = 0;
const EMPTY_TILE_COLOR: Vec4 = Vec4::ZERO;

/// Vertex streams for one chunk, four consecutive vertices per tile.
///
/// The shaders derive each vertex's corner from its position in the buffer, so
/// quads must be pushed whole and in corner order.
#[derive(Default)]
pub struct TileMeshData {
    pub positions: Vec<[f32; 3]>,
    pub tile_indices: Vec<u32>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl TileMeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn push_quad(&mut self, quad: [TileVertex; 4]) {
        let start_idx = self.positions.len() as u32;

        for vertex in quad {
            self.positions.push(vertex.position.to_array());
            self.tile_indices.push(vertex.tile_index);
            self.colors.push(vertex.color.to_array());
        }

        // Corners run bottom-left, top-left, top-right, bottom-right (clockwise),
        // so emit (0, 2, 1) and (0, 3, 2) for CCW triangles.
        self.indices.push(start_idx);
        self.indices.push(start_idx + 2);
        self.indices.push(start_idx + 1);

        self.indices.push(start_idx);
        self.indices.push(start_idx + 3);
        self.indices.push(start_idx + 2);
    }

    /// A full chunk encoded for the configured transform. `pick` chooses the
    /// sprite for each (column, row); `None` leaves the cell empty, drawn as a
    /// transparent quad on sprite 0.
    pub fn chunk(config: &TileRenderConfig, mut pick: impl FnMut(i32, i32) -> Option<u32>) -> Self {
        let dimensions = config.chunk_dimensions();
        let (columns, rows) = (dimensions.x as i32, dimensions.y as i32);
        let mut data = Self::new();
        for row in 0..rows {
            for column in 0..columns {
                let (tile_index, color) = match pick(column, row) {
                    Some(tile_index) => (tile_index, Vec4::ONE),
                    None => (EMPTY_TILE_INDEX, EMPTY_TILE_COLOR),
                };
                let quad = match config.variant {
                    VariantKind::Scaled => {
                        TileVertex::scaled_quad(column, row, dimensions, tile_index, color)
                    }
                    VariantKind::Unit => TileVertex::unit_quad(column, row, tile_index, color),
                };
                data.push_quad(quad);
            }
        }
        data
    }

    /// The vertex buffer as the per-vertex transform sees it, in draw order.
    #[cfg(test)]
    fn tile_vertices(&self) -> Vec<TileVertex> {
        self.positions
            .iter()
            .zip(&self.tile_indices)
            .zip(&self.colors)
            .map(|((position, tile_index), color)| {
                TileVertex::new(Vec3::from_array(*position), *tile_index, Vec4::from_array(*color))
            })
            .collect()
    }

    pub fn into_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(ATTRIBUTE_TILE_INDEX, self.tile_indices);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_indices(Indices::U32(self.indices));
        mesh
    }
}
