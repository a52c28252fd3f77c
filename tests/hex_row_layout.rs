use bevy::math::{Mat4, Vec2, Vec3, Vec4};
use hex_tiles::constants::{SCALED_ROW_EPSILON, UNIT_ROW_EPSILON};
use hex_tiles::tile::transform::{scaled_local_position, scaled_row, unit_local_position, unit_row};
use hex_tiles::tile::{
    AtlasRect, AtlasRectTable, Corner, ScaledTransform, TileDrawBatch, TileVariant, TileVertex,
    UnitTransform,
};

const HEX_SPRITE: Vec2 = Vec2::new(32.0, 37.0);

fn hex_table() -> AtlasRectTable {
    AtlasRectTable::dynamic(vec![
        AtlasRect::new(Vec2::ZERO, HEX_SPRITE),
        AtlasRect::new(Vec2::new(32.0, 0.0), Vec2::new(64.0, 37.0)),
    ])
}

fn local_xy(out: Vec4) -> Vec2 {
    Vec2::new(out.x, out.y)
}

#[test]
fn golden_scaled_corner_one() {
    let rects = AtlasRectTable::dynamic(vec![AtlasRect::new(Vec2::ZERO, Vec2::new(16.0, 16.0))]);
    let batch = TileDrawBatch::new(
        &rects,
        Vec2::splat(256.0),
        TileVariant::Scaled(ScaledTransform::new(Vec2::ONE)),
    );
    let vertex = TileVertex::new(Vec3::new(-0.5, -0.5, 0.0), 0, Vec4::ONE);

    // Base (-8, -8). Row 0 centres to -1, so x gains 8 and y gains 4.
    let out = batch.transform_vertex(1, &vertex).unwrap();
    assert_eq!(out.uv, Vec2::ZERO);
    assert_eq!(out.clip_position, Vec4::new(0.0, -4.0, 0.0, 1.0));
}

#[test]
fn golden_unit_first_two_rows() {
    let rects = hex_table();
    let batch = TileDrawBatch::new(&rects, Vec2::new(64.0, 37.0), TileVariant::Unit(UnitTransform));

    let mut vertices = TileVertex::unit_quad(0, 0, 0, Vec4::ONE).to_vec();
    vertices.extend(TileVertex::unit_quad(0, 1, 0, Vec4::ONE));
    let out = batch.transform_vertices(&vertices).unwrap();
    let positions: Vec<Vec2> = out.iter().map(|o| local_xy(o.clip_position)).collect();

    // Cell row 0 lands on odd row 1: shifted left 8, pulled down 10.
    assert_eq!(
        &positions[..4],
        &[
            Vec2::new(-8.0, -10.0),
            Vec2::new(-8.0, 27.0),
            Vec2::new(24.0, 27.0),
            Vec2::new(24.0, -10.0),
        ]
    );
    // Cell row 1 lands on even row 2: shifted right 8, pulled down 20.
    assert_eq!(
        &positions[4..],
        &[
            Vec2::new(8.0, 17.0),
            Vec2::new(8.0, 54.0),
            Vec2::new(40.0, 54.0),
            Vec2::new(40.0, 17.0),
        ]
    );
}

#[test]
fn golden_scaled_two_by_two_chunk() {
    let dims = Vec2::new(2.0, 2.0);
    let rects = hex_table();
    let batch = TileDrawBatch::new(
        &rects,
        Vec2::new(64.0, 37.0),
        TileVariant::Scaled(ScaledTransform::new(dims)),
    );

    let mut vertices = TileVertex::scaled_quad(0, 0, dims, 0, Vec4::ONE).to_vec();
    vertices.extend(TileVertex::scaled_quad(0, 1, dims, 0, Vec4::ONE));
    let out = batch.transform_vertices(&vertices).unwrap();
    let positions: Vec<Vec2> = out.iter().map(|o| local_xy(o.clip_position)).collect();

    assert_eq!(
        &positions[..4],
        &[
            Vec2::new(-24.0, -32.0),
            Vec2::new(-24.0, 5.0),
            Vec2::new(8.0, 5.0),
            Vec2::new(8.0, -32.0),
        ]
    );
    assert_eq!(positions[4], Vec2::new(-40.0, -5.0));
    assert_eq!(positions[5], Vec2::new(-40.0, 32.0));
}

#[test]
fn golden_scaled_wide_chunk() {
    // Four columns, two rows: x scales by 4 * 32, y by 2 * 37.
    let dims = Vec2::new(4.0, 2.0);
    let rects = hex_table();
    let batch = TileDrawBatch::new(
        &rects,
        Vec2::new(64.0, 37.0),
        TileVariant::Scaled(ScaledTransform::new(dims)),
    );

    let mut vertices = TileVertex::scaled_quad(1, 0, dims, 0, Vec4::ONE).to_vec();
    vertices.extend(TileVertex::scaled_quad(3, 1, dims, 0, Vec4::ONE));
    let out = batch.transform_vertices(&vertices).unwrap();
    let positions: Vec<Vec2> = out.iter().map(|o| local_xy(o.clip_position)).collect();

    // Row 1 centres to -0.5: right 8, up 5.
    assert_eq!(
        &positions[..4],
        &[
            Vec2::new(-24.0, -32.0),
            Vec2::new(-24.0, 5.0),
            Vec2::new(8.0, 5.0),
            Vec2::new(8.0, -32.0),
        ]
    );
    // Row 2 centres to 0.5: left 8, down 5.
    assert_eq!(
        &positions[4..],
        &[
            Vec2::new(24.0, -5.0),
            Vec2::new(24.0, 32.0),
            Vec2::new(56.0, 32.0),
            Vec2::new(56.0, -5.0),
        ]
    );
}

#[test]
fn every_corner_of_a_tile_shares_its_row() {
    let dims = Vec2::new(32.0, 38.0);
    for row in 0..38 {
        let quad = TileVertex::scaled_quad(5, row, dims, 0, Vec4::ONE);
        let rows: Vec<f32> = Corner::ALL
            .iter()
            .zip(&quad)
            .map(|(corner, vertex)| scaled_row(vertex.position.y, *corner, dims.y))
            .collect();
        assert!(rows.iter().all(|r| *r == row as f32 + 1.0), "scaled row {row}: {rows:?}");
    }
    for row in -20..20 {
        let quad = TileVertex::unit_quad(3, row, 0, Vec4::ONE);
        let rows: Vec<f32> = Corner::ALL
            .iter()
            .zip(&quad)
            .map(|(corner, vertex)| unit_row(vertex.position.y, *corner))
            .collect();
        assert!(rows.iter().all(|r| *r == row as f32 + 1.0), "unit row {row}: {rows:?}");
    }
}

#[test]
fn corners_of_a_tile_resolve_the_same_rect() {
    let rects = hex_table();
    let atlas_size = Vec2::new(64.0, 37.0);
    let cases = [
        (TileVariant::Unit(UnitTransform), TileVertex::unit_quad(0, 0, 1, Vec4::ONE)),
        (
            TileVariant::Scaled(ScaledTransform::new(Vec2::ONE)),
            TileVertex::scaled_quad(0, 0, Vec2::ONE, 1, Vec4::ONE),
        ),
    ];

    for (variant, quad) in cases {
        let batch = TileDrawBatch::new(&rects, atlas_size, variant);
        let out = batch.transform_vertices(&quad).unwrap();

        // The quad's UV footprint is exactly the second sprite.
        let min = out.iter().map(|o| o.uv).reduce(Vec2::min).unwrap();
        let max = out.iter().map(|o| o.uv).reduce(Vec2::max).unwrap();
        assert_eq!(min * atlas_size, Vec2::new(32.0, 0.0), "{variant:?}");
        assert_eq!(max * atlas_size, Vec2::new(64.0, 37.0), "{variant:?}");

        // And its geometry is exactly one sprite wide and tall.
        let xs: Vec<f32> = out.iter().map(|o| o.clip_position.x).collect();
        let ys: Vec<f32> = out.iter().map(|o| o.clip_position.y).collect();
        assert_eq!(xs[2] - xs[1], HEX_SPRITE.x, "{variant:?}");
        assert_eq!(ys[1] - ys[0], HEX_SPRITE.y, "{variant:?}");
    }
}

#[test]
fn top_left_and_bottom_right_map_to_begin_and_end() {
    let rect = AtlasRect::new(Vec2::new(32.0, 16.0), Vec2::new(64.0, 48.0));
    let rects = AtlasRectTable::dynamic(vec![rect]);
    let quad = TileVertex::unit_quad(0, 0, 0, Vec4::ONE);

    for atlas_size in [Vec2::splat(128.0), Vec2::new(64.0, 256.0)] {
        for variant in [
            TileVariant::Unit(UnitTransform),
            TileVariant::Scaled(ScaledTransform::new(Vec2::ONE)),
        ] {
            let batch = TileDrawBatch::new(&rects, atlas_size, variant);
            let out = batch.transform_vertices(&quad).unwrap();
            assert_eq!(out[1].uv * atlas_size, rect.begin);
            assert_eq!(out[3].uv * atlas_size, rect.end);
        }
    }
}

#[test]
fn scaled_stagger_is_symmetric_about_the_middle_row() {
    for rows in [5.0f32, 38.0] {
        let dims = Vec2::new(4.0, rows);
        let skew = |tile_row: i32| {
            // Column 2 of 4 puts the top-left corner at x = 0.
            let quad = TileVertex::scaled_quad(2, tile_row, dims, 0, Vec4::ONE);
            scaled_local_position(quad[1].position, Corner::TopLeft, HEX_SPRITE, dims).x
        };
        let n = rows as i32;
        for r in 0..n {
            assert_eq!(skew(r), -skew(n - 1 - r), "rows {rows}, row {r}");
        }
    }
}

#[test]
fn unit_stagger_alternates_by_parity() {
    let shift = |sprite: Vec2, row: i32| {
        // Top-left corner of a cell at column 0 has no base x.
        let position = Vec3::new(0.0, row as f32, 0.0);
        unit_local_position(position, Corner::TopLeft, sprite).x
    };
    assert_eq!(shift(HEX_SPRITE, 2), 8.0);
    assert_eq!(shift(HEX_SPRITE, 3), -8.0);
    assert_ne!(shift(HEX_SPRITE, 2), shift(HEX_SPRITE, 3));

    // floor(0.25 * 3) == 0: no stagger to tell rows apart.
    let narrow = Vec2::new(3.0, 8.0);
    assert_eq!(shift(narrow, 2), shift(narrow, 3));
}

#[test]
fn row_bias_constants_are_exact() {
    assert_eq!(SCALED_ROW_EPSILON, 0.501);
    assert_eq!(UNIT_ROW_EPSILON, 0.01);
    assert_eq!(unit_row(-0.001, Corner::TopLeft), 0.0);
    assert_eq!(scaled_row(-0.5, Corner::TopLeft, 38.0), 0.0);
}

#[test]
fn transform_is_deterministic() {
    let dims = Vec2::new(8.0, 6.0);
    let rects = hex_table();
    let batch = TileDrawBatch::new(
        &rects,
        Vec2::new(64.0, 37.0),
        TileVariant::Scaled(ScaledTransform::new(dims)),
    )
    .with_view_proj(Mat4::orthographic_rh(-512.0, 512.0, -512.0, 512.0, 0.0, 1000.0))
    .with_chunk_transform(Mat4::from_translation(Vec3::new(3.0, -7.0, 0.0)));

    let vertices: Vec<TileVertex> = (0..6)
        .flat_map(|row| (0..8).map(move |column| (column, row)))
        .flat_map(|(column, row)| {
            TileVertex::scaled_quad(column, row, dims, ((column + row) % 2) as u32, Vec4::ONE)
        })
        .collect();

    let first = batch.transform_vertices(&vertices).unwrap();
    let second = batch.transform_vertices(&vertices).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.clip_position.to_array().map(f32::to_bits), b.clip_position.to_array().map(f32::to_bits));
        assert_eq!(a.uv.to_array().map(f32::to_bits), b.uv.to_array().map(f32::to_bits));
    }
}

#[test]
fn degenerate_rect_is_reported() {
    let rects = AtlasRectTable::dynamic(vec![AtlasRect::new(Vec2::splat(4.0), Vec2::splat(4.0))]);
    let batch = TileDrawBatch::new(&rects, Vec2::ONE, TileVariant::Unit(UnitTransform));
    let err = batch
        .transform_vertex(0, &TileVertex::new(Vec3::ZERO, 0, Vec4::ONE))
        .unwrap_err();
    assert!(err.to_string().contains("degenerate"));
}
