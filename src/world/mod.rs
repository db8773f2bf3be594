mod camera;
pub mod levels;
mod tilemap;

pub use camera::{Camera, wrap_angle};
pub use tilemap::{CELL_SIZE, Cell, MapError, TileMap};
