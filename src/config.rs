//! Command-line options handled via `clap` derive.

use clap::Parser;
use std::path::PathBuf;

use crate::world::{MapError, TileMap, levels::DEFAULT_LEVEL};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Opts {
    /// Level file (`#` = wall, `.` = floor); the built-in level if omitted
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Number of enemies to spawn
    #[arg(long, default_value_t = 10)]
    pub enemies: usize,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(64..=7680))]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(64..=4320))]
    pub height: u32,

    /// Seed for enemy placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window refresh target
    #[arg(long, default_value_t = 60)]
    pub fps: usize,
}

impl Opts {
    /// Load the level named by `--map`, or the built-in one.
    pub fn load_map(&self) -> Result<TileMap, MapError> {
        match &self.map {
            Some(path) => TileMap::from_file(path),
            None => TileMap::parse(DEFAULT_LEVEL),
        }
    }
}
