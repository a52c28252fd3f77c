use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::constants::{
    DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
    MAX_TILE_DIMENSION, UNIT_RECT_CAPACITY,
};
use crate::tile::{ScaledTransform, TileVariant, UnitTransform};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    #[default]
    Scaled,
    Unit,
}

/// How tile chunks are drawn. Loaded from YAML.
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileRenderConfig {
    pub variant: VariantKind,
    /// Chunk size in tiles (columns, rows).
    pub chunk_dimensions: [f32; 2],
    /// Sprite size in atlas texels.
    pub tile_dimensions: [f32; 2],
    /// Rect slots the unit transform may address.
    pub atlas_capacity: usize,
}

impl Default for TileRenderConfig {
    fn default() -> Self {
        Self {
            variant: VariantKind::Scaled,
            chunk_dimensions: [DEFAULT_CHUNK_WIDTH, DEFAULT_CHUNK_HEIGHT],
            tile_dimensions: [DEFAULT_TILE_WIDTH, DEFAULT_TILE_HEIGHT],
            atlas_capacity: UNIT_RECT_CAPACITY,
        }
    }
}

impl TileRenderConfig {
    pub fn chunk_dimensions(&self) -> Vec2 {
        Vec2::from_array(self.chunk_dimensions)
    }

    pub fn tile_dimensions(&self) -> Vec2 {
        Vec2::from_array(self.tile_dimensions)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chunk = self.chunk_dimensions();
        if !is_whole(chunk) || chunk.cmplt(Vec2::ONE).any() {
            return Err(ConfigError::Invalid(format!(
                "chunk_dimensions must be whole numbers of at least 1, got {:?}",
                self.chunk_dimensions
            )));
        }
        let tile = self.tile_dimensions();
        let in_range = tile.cmpge(Vec2::ONE).all() && tile.cmple(Vec2::splat(MAX_TILE_DIMENSION)).all();
        if !is_whole(tile) || !in_range {
            return Err(ConfigError::Invalid(format!(
                "tile_dimensions must be whole numbers within 1..={}, got {:?}",
                MAX_TILE_DIMENSION, self.tile_dimensions
            )));
        }
        if !(1..=UNIT_RECT_CAPACITY).contains(&self.atlas_capacity) {
            return Err(ConfigError::Invalid(format!(
                "atlas_capacity must be within 1..={}, got {}",
                UNIT_RECT_CAPACITY, self.atlas_capacity
            )));
        }
        Ok(())
    }

    pub fn variant(&self) -> TileVariant {
        match self.variant {
            VariantKind::Scaled => TileVariant::Scaled(ScaledTransform::new(self.chunk_dimensions())),
            VariantKind::Unit => TileVariant::Unit(UnitTransform),
        }
    }
}

fn is_whole(v: Vec2) -> bool {
    v.is_finite() && v == v.floor()
}
