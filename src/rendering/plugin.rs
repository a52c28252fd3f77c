use bevy::prelude::*;
use bevy::render::storage::ShaderStorageBuffer;

use crate::config::loader::{ConfigError, load_config};
use crate::config::settings::{TileRenderConfig, VariantKind};
use crate::constants::TILE_RENDER_CONFIG_PATH;
use crate::rendering::atlas::{TileAtlas, hex_sprite_sheet};
use crate::rendering::material::{ScaledTileMaterial, UnitTileMaterial};
use crate::rendering::mesh::TileMeshData;
use crate::tile::transform::row_compaction;

// grass, dirt, boulder, trees
const DEMO_SPRITE_COLORS: [[u8; 4]; 4] = [
    [96, 164, 70, 255],
    [138, 104, 68, 255],
    [122, 122, 130, 255],
    [46, 110, 52, 255],
];

pub struct HexTilePlugin;

impl Plugin for HexTilePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<ScaledTileMaterial> {
                prepass_enabled: false,
                shadows_enabled: false,
                ..default()
            },
            MaterialPlugin::<UnitTileMaterial> {
                prepass_enabled: false,
                shadows_enabled: false,
                ..default()
            },
        ))
        .insert_resource(load_render_config())
        .add_systems(Startup, (setup_tile_atlas, spawn_tile_chunk).chain());
    }
}

fn read_render_config() -> Result<TileRenderConfig, ConfigError> {
    let config: TileRenderConfig = load_config(TILE_RENDER_CONFIG_PATH)?;
    config.validate()?;
    Ok(config)
}

pub fn load_render_config() -> TileRenderConfig {
    match read_render_config() {
        Ok(config) => config,
        Err(err) => {
            warn!("Using default tile render config: {}", err);
            TileRenderConfig::default()
        }
    }
}

fn setup_tile_atlas(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    config: Res<TileRenderConfig>,
) {
    let tile_size = config.tile_dimensions().as_uvec2();
    let Some((image, rects)) = hex_sprite_sheet(tile_size, &DEMO_SPRITE_COLORS) else {
        error!("Tile sprites of {}x{} do not fit in one sheet", tile_size.x, tile_size.y);
        return;
    };
    let size = Vec2::new(image.width() as f32, image.height() as f32);

    let rects = match config.variant {
        VariantKind::Scaled => rects,
        VariantKind::Unit => match rects.into_fixed(config.atlas_capacity) {
            Ok(rects) => rects,
            Err(err) => {
                error!("Tile atlas does not fit the unit transform: {}", err);
                return;
            }
        },
    };

    info!("Tile atlas ready: {} sprites, {}x{} texels", rects.len(), size.x, size.y);
    commands.insert_resource(TileAtlas {
        handle: images.add(image),
        size,
        rects,
    });
}

// Simple pseudo-random hash to scatter sprites
fn hash(x: i32, y: i32) -> f32 {
    let n = x.wrapping_mul(374761393).wrapping_add(y.wrapping_mul(668265263));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    ((n ^ (n >> 16)) as u32 as f32) / u32::MAX as f32
}

fn pick_sprite(column: i32, row: i32, sprite_count: usize) -> u32 {
    let roll = hash(column, row) * sprite_count as f32;
    (roll as u32).min(sprite_count.saturating_sub(1) as u32)
}

fn spawn_tile_chunk(
    mut commands: Commands,
    config: Res<TileRenderConfig>,
    atlas: Option<Res<TileAtlas>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut scaled_materials: ResMut<Assets<ScaledTileMaterial>>,
    mut unit_materials: ResMut<Assets<UnitTileMaterial>>,
    mut buffers: ResMut<Assets<ShaderStorageBuffer>>,
) {
    let Some(atlas) = atlas else {
        warn!("No tile atlas, skipping chunk spawn");
        return;
    };
    if atlas.rects.is_empty() {
        warn!("Tile atlas has no sprites, skipping chunk spawn");
        return;
    }

    let sprite_count = atlas.rects.len();
    let mesh_data = TileMeshData::chunk(&config, |column, row| {
        Some(pick_sprite(column, row, sprite_count))
    });
    if mesh_data.is_empty() {
        warn!("Tile chunk has no cells, skipping chunk spawn");
        return;
    }
    info!("Spawning {:?} tile chunk: {} tiles", config.variant, mesh_data.quad_count());
    let mesh_handle = meshes.add(mesh_data.into_mesh());

    match config.variant {
        VariantKind::Scaled => {
            let material = ScaledTileMaterial::new(
                &atlas.rects,
                atlas.size,
                config.chunk_dimensions(),
                atlas.handle.clone(),
                &mut buffers,
            );
            commands.spawn((
                Mesh3d(mesh_handle),
                MeshMaterial3d(scaled_materials.add(material)),
                Transform::IDENTITY,
            ));
        }
        VariantKind::Unit => {
            let material = match UnitTileMaterial::new(&atlas.rects, atlas.size, atlas.handle.clone()) {
                Ok(material) => material,
                Err(err) => {
                    error!("Cannot build unit tile material: {}", err);
                    return;
                }
            };
            // Unit chunks grow from the origin; shift them back to the centre.
            let tile = config.tile_dimensions();
            let extent = config.chunk_dimensions() * Vec2::new(tile.x, tile.y - row_compaction(tile));
            commands.spawn((
                Mesh3d(mesh_handle),
                MeshMaterial3d(unit_materials.add(material)),
                Transform::from_translation((-extent * 0.5).extend(0.0)),
            ));
        }
    }
}
