pub mod constants;
pub mod config;
pub mod tile;
pub mod rendering;
