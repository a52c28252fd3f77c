// Row detection bias for the scaled transform. Tuned against the hex art, keep literal.
pub const SCALED_ROW_EPSILON: f32 = 0.501;
// Row detection bias for the unit transform.
pub const UNIT_ROW_EPSILON: f32 = 0.01;

// Horizontal skew per centered row, as a fraction of sprite width (scaled transform).
pub const SCALED_SKEW_FRACTION: f32 = 0.5;
// Alternating shift per row parity, as a fraction of sprite width (unit transform).
pub const UNIT_SKEW_FRACTION: f32 = 0.25;
// Vertical compaction per row, as a fraction of sprite height (both transforms).
pub const ROW_COMPACTION_FRACTION: f32 = 0.25;

// Size of the fixed rect array bound by the unit shader.
pub const UNIT_RECT_CAPACITY: usize = 256;

// Largest sprite edge, in texels, a config may request.
pub const MAX_TILE_DIMENSION: f32 = 4096.0;

// Demo defaults (overridden by config)
pub const DEFAULT_CHUNK_WIDTH: f32 = 32.0;
pub const DEFAULT_CHUNK_HEIGHT: f32 = 38.0;
pub const DEFAULT_TILE_WIDTH: f32 = 32.0;
pub const DEFAULT_TILE_HEIGHT: f32 = 37.0;

pub const TILE_RENDER_CONFIG_PATH: &str = "assets/config/tile_render.yaml";
