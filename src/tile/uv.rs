use bevy::math::Vec2;

use crate::tile::atlas::AtlasRect;
use crate::tile::vertex::Corner;

/// Atlas texel coordinate sampled by `corner`. Texture space grows downward,
/// so the bottom corners read `end.y`.
pub fn atlas_corner(rect: &AtlasRect, corner: Corner) -> Vec2 {
    match corner {
        Corner::BottomLeft => Vec2::new(rect.begin.x, rect.end.y),
        Corner::TopLeft => rect.begin,
        Corner::TopRight => Vec2::new(rect.end.x, rect.begin.y),
        Corner::BottomRight => rect.end,
    }
}

/// Normalised UV for the scaled transform.
pub fn project_uv_exact(rect: &AtlasRect, corner: Corner, atlas_size: Vec2) -> Vec2 {
    atlas_corner(rect, corner) / atlas_size
}

/// Normalised UV for the unit transform, snapped down to whole texels first.
pub fn project_uv_texel_snapped(rect: &AtlasRect, corner: Corner, atlas_size: Vec2) -> Vec2 {
    atlas_corner(rect, corner).floor() / atlas_size
}
