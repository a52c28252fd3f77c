use bevy::math::{Vec2, Vec3, Vec4};

/// Which of a tile quad's four vertices is being processed.
///
/// The order is fixed and shared by the row math and the UV mapping: corner 0
/// samples the sprite's bottom-left texel, corner 3 its bottom-right.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Corner {
    BottomLeft = 0,
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    /// Corner of the `ordinal`-th vertex in a buffer of consecutive quads.
    pub fn from_vertex_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal % 4]
    }

    /// Bottom corners sit one row boundary below the top ones; bumping them
    /// puts all four corners of a tile on the same row.
    pub fn bumps_row(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }

    /// Offset of this corner from the quad's lower-left, in cells.
    fn lattice_offset(self) -> Vec2 {
        match self {
            Corner::BottomLeft => Vec2::new(0.0, 0.0),
            Corner::TopLeft => Vec2::new(0.0, 1.0),
            Corner::TopRight => Vec2::new(1.0, 1.0),
            Corner::BottomRight => Vec2::new(1.0, 0.0),
        }
    }
}

/// One vertex as supplied by the chunk mesh. All four vertices of a tile share
/// `tile_index` and `color`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileVertex {
    pub position: Vec3,
    pub tile_index: u32,
    pub color: Vec4,
}

impl TileVertex {
    pub fn new(position: Vec3, tile_index: u32, color: Vec4) -> Self {
        Self {
            position,
            tile_index,
            color,
        }
    }

    /// Quad for the unit transform: corners on the integer cell lattice.
    pub fn unit_quad(column: i32, row: i32, tile_index: u32, color: Vec4) -> [TileVertex; 4] {
        let origin = Vec2::new(column as f32, row as f32);
        Corner::ALL.map(|corner| {
            let xy = origin + corner.lattice_offset();
            TileVertex::new(xy.extend(0.0), tile_index, color)
        })
    }

    /// Quad for the scaled transform: corners normalised to the chunk so the
    /// whole chunk spans [-0.5, 0.5] on both axes.
    pub fn scaled_quad(
        column: i32,
        row: i32,
        chunk_dimensions: Vec2,
        tile_index: u32,
        color: Vec4,
    ) -> [TileVertex; 4] {
        let origin = Vec2::new(column as f32, row as f32);
        Corner::ALL.map(|corner| {
            let xy = (origin + corner.lattice_offset()) / chunk_dimensions - 0.5;
            TileVertex::new(xy.extend(0.0), tile_index, color)
        })
    }
}
