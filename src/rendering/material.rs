use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    render::{
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
            VertexFormat,
        },
        storage::ShaderStorageBuffer,
    },
};
use bevy_mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef};
use bevy_shader::ShaderRef;

use crate::constants::UNIT_RECT_CAPACITY;
use crate::tile::{AtlasRectTable, TileError};

pub const SCALED_TILE_SHADER: &str = "shaders/hex_tile_scaled.wgsl";
pub const UNIT_TILE_SHADER: &str = "shaders/hex_tile_unit.wgsl";

/// Index into the atlas rect table, shared by a tile's four vertices.
pub const ATTRIBUTE_TILE_INDEX: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_TileIndex", 988_540_917, VertexFormat::Uint32);

/// Rects are packed as (begin.x, begin.y, end.x, end.y).
fn pack_rects(table: &AtlasRectTable) -> impl Iterator<Item = Vec4> + '_ {
    table
        .rects()
        .iter()
        .map(|rect| Vec4::new(rect.begin.x, rect.begin.y, rect.end.x, rect.end.y))
}

fn tile_vertex_layout(
    descriptor: &mut RenderPipelineDescriptor,
    layout: &MeshVertexBufferLayoutRef,
) -> Result<(), SpecializedMeshPipelineError> {
    let vertex_layout = layout.0.get_layout(&[
        Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
        ATTRIBUTE_TILE_INDEX.at_shader_location(1),
        Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
    ])?;
    descriptor.vertex.buffers = vec![vertex_layout];
    // Quads of both windings are drawn.
    descriptor.primitive.cull_mode = None;
    Ok(())
}

#[derive(Clone, Copy, ShaderType, Debug, Default)]
pub struct ScaledTileUniforms {
    /// Atlas texture size in texels
    pub atlas_size: Vec2,
    /// Chunk columns and rows the geometry is stretched by
    pub chunk_dimensions: Vec2,
}

/// Tile chunk material for the scaled transform. The rect table is an
/// unbounded storage buffer.
#[derive(Asset, TypePath, AsBindGroup, Clone, Debug)]
pub struct ScaledTileMaterial {
    #[uniform(0)]
    pub uniforms: ScaledTileUniforms,

    #[storage(1, read_only)]
    pub rects: Handle<ShaderStorageBuffer>,

    #[texture(2)]
    #[sampler(3)]
    pub atlas_texture: Option<Handle<Image>>,
}

impl ScaledTileMaterial {
    pub fn new(
        table: &AtlasRectTable,
        atlas_size: Vec2,
        chunk_dimensions: Vec2,
        atlas_texture: Handle<Image>,
        buffers: &mut Assets<ShaderStorageBuffer>,
    ) -> Self {
        let rects: Vec<Vec4> = pack_rects(table).collect();
        Self {
            uniforms: ScaledTileUniforms {
                atlas_size,
                chunk_dimensions,
            },
            rects: buffers.add(ShaderStorageBuffer::from(rects)),
            atlas_texture: Some(atlas_texture),
        }
    }
}

impl Material for ScaledTileMaterial {
    fn vertex_shader() -> ShaderRef {
        SCALED_TILE_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        SCALED_TILE_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        tile_vertex_layout(descriptor, layout)
    }
}

/// Atlas size and the fixed-size rect array, in one uniform block.
#[derive(Clone, Copy, ShaderType, Debug)]
pub struct UnitTileUniforms {
    pub atlas_size: Vec2,
    pub rects: [Vec4; UNIT_RECT_CAPACITY],
}

impl Default for UnitTileUniforms {
    fn default() -> Self {
        Self {
            atlas_size: Vec2::ONE,
            rects: [Vec4::ZERO; UNIT_RECT_CAPACITY],
        }
    }
}

impl UnitTileUniforms {
    /// Fails if the table does not fit the shader's rect array.
    pub fn from_table(table: &AtlasRectTable, atlas_size: Vec2) -> Result<Self, TileError> {
        let capacity = table.capacity().unwrap_or(UNIT_RECT_CAPACITY);
        if table.len() > capacity {
            return Err(TileError::CapacityExceeded {
                len: table.len(),
                capacity,
            });
        }
        let mut uniforms = Self {
            atlas_size,
            ..Default::default()
        };
        for (slot, rect) in uniforms.rects.iter_mut().zip(pack_rects(table)) {
            *slot = rect;
        }
        Ok(uniforms)
    }
}

/// Tile chunk material for the unit transform.
#[derive(Asset, TypePath, AsBindGroup, Clone, Debug)]
pub struct UnitTileMaterial {
    #[uniform(0)]
    pub uniforms: UnitTileUniforms,

    #[texture(1)]
    #[sampler(2)]
    pub atlas_texture: Option<Handle<Image>>,
}

impl UnitTileMaterial {
    pub fn new(
        table: &AtlasRectTable,
        atlas_size: Vec2,
        atlas_texture: Handle<Image>,
    ) -> Result<Self, TileError> {
        Ok(Self {
            uniforms: UnitTileUniforms::from_table(table, atlas_size)?,
            atlas_texture: Some(atlas_texture),
        })
    }
}

impl Material for UnitTileMaterial {
    fn vertex_shader() -> ShaderRef {
        UNIT_TILE_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        UNIT_TILE_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        tile_vertex_layout(descriptor, layout)
    }
}
