use bevy::math::Vec2;
use bevy::prelude::TextureAtlasLayout;

use crate::constants::UNIT_RECT_CAPACITY;
use crate::tile::error::TileError;

/// A sprite's bounds in atlas texel space. `begin` is the upper-left corner,
/// `end` the lower-right.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AtlasRect {
    pub begin: Vec2,
    pub end: Vec2,
}

impl AtlasRect {
    pub fn new(begin: Vec2, end: Vec2) -> Self {
        Self { begin, end }
    }

    /// Sprite size in texels. Tile geometry is scaled by this.
    pub fn dimensions(&self) -> Vec2 {
        self.end - self.begin
    }

    /// True when the rect has no extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        let dimensions = self.dimensions();
        dimensions.x <= 0.0 || dimensions.y <= 0.0
    }
}

/// Read-only table of sprite rects indexed by tile index.
///
/// The scaled transform reads an unbounded table; the unit transform reads a
/// fixed-size GPU array, so its table carries a capacity.
#[derive(Clone, Debug, Default)]
pub struct AtlasRectTable {
    rects: Vec<AtlasRect>,
    capacity: Option<usize>,
}

impl AtlasRectTable {
    pub fn dynamic(rects: Vec<AtlasRect>) -> Self {
        Self {
            rects,
            capacity: None,
        }
    }

    /// A table bounded to `capacity` slots. `capacity` may not exceed
    /// [`UNIT_RECT_CAPACITY`], the size of the shader's rect array.
    pub fn fixed(rects: Vec<AtlasRect>, capacity: usize) -> Result<Self, TileError> {
        if capacity > UNIT_RECT_CAPACITY {
            return Err(TileError::CapacityExceeded {
                len: capacity,
                capacity: UNIT_RECT_CAPACITY,
            });
        }
        if rects.len() > capacity {
            return Err(TileError::CapacityExceeded {
                len: rects.len(),
                capacity,
            });
        }
        Ok(Self {
            rects,
            capacity: Some(capacity),
        })
    }

    /// Copies the sprite rects out of a Bevy atlas layout, in layout order.
    pub fn from_layout(layout: &TextureAtlasLayout) -> Self {
        let rects = layout
            .textures
            .iter()
            .map(|rect| AtlasRect::new(rect.min.as_vec2(), rect.max.as_vec2()))
            .collect::<Vec<_>>();
        log::debug!(
            "atlas rect table built from layout: {} rects, atlas {}x{}",
            rects.len(),
            layout.size.x,
            layout.size.y
        );
        Self::dynamic(rects)
    }

    /// Rebounds this table to a fixed capacity for the unit transform.
    pub fn into_fixed(self, capacity: usize) -> Result<Self, TileError> {
        Self::fixed(self.rects, capacity)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn rects(&self) -> &[AtlasRect] {
        &self.rects
    }

    /// Looks up the rect for `tile_index`.
    ///
    /// The GPU does no bounds check here; on the CPU an out-of-range index or a
    /// zero-area rect is reported so callers can catch it upstream.
    pub fn resolve(&self, tile_index: u32) -> Result<AtlasRect, TileError> {
        let rect = self
            .rects
            .get(tile_index as usize)
            .copied()
            .ok_or(TileError::InvalidTileIndex {
                index: tile_index,
                len: self.rects.len(),
            })?;
        if rect.is_degenerate() {
            return Err(TileError::DegenerateRect {
                index: tile_index,
                rect,
            });
        }
        Ok(rect)
    }
}
