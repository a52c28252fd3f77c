use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::tile::{AtlasRect, AtlasRectTable};

/// The sprite sheet tile chunks sample from, with its rect table.
#[derive(Resource)]
pub struct TileAtlas {
    pub handle: Handle<Image>,
    pub size: Vec2,
    pub rects: AtlasRectTable,
}

/// Pointy-topped hex silhouette test for a pixel inside a `size` cell.
fn inside_hex(x: u32, y: u32, size: UVec2) -> bool {
    let half = size.as_vec2() * 0.5;
    let p = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - half).abs();
    // The slanted edges take the outer quarter of the height.
    let shoulder = half.y * 0.5;
    p.x <= half.x && p.y <= half.y - shoulder * (p.x / half.x)
}

/// A single-row sprite sheet with one hex sprite per color, and the rects
/// locating each sprite. Stands in for an atlas loaded from disk.
///
/// Returns `None` when the sheet would be wider than a texture extent allows.
pub fn hex_sprite_sheet(tile_size: UVec2, colors: &[[u8; 4]]) -> Option<(Image, AtlasRectTable)> {
    let width = u32::try_from(colors.len()).ok()?.checked_mul(tile_size.x)?;
    let height = tile_size.y;
    let row_bytes = width as usize * 4;
    let mut data = vec![0u8; row_bytes.checked_mul(height as usize)?];
    let mut rects = Vec::with_capacity(colors.len());

    for (sprite, color) in colors.iter().enumerate() {
        let origin_x = sprite * tile_size.x as usize;
        for y in 0..tile_size.y {
            for x in 0..tile_size.x {
                if !inside_hex(x, y, tile_size) {
                    continue;
                }
                let offset = y as usize * row_bytes + (origin_x + x as usize) * 4;
                data[offset..offset + 4].copy_from_slice(color);
            }
        }
        let begin = Vec2::new(origin_x as f32, 0.0);
        rects.push(AtlasRect::new(begin, begin + tile_size.as_vec2()));
    }

    let image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    Some((image, AtlasRectTable::dynamic(rects)))
}
