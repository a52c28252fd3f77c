pub mod atlas;
pub mod material;
pub mod mesh;
pub mod plugin;
