//! Tile-map raycasting shooter.
//!
//! * [`world`] – static level data (tile map, camera maths).
//! * [`sim`] – fixed-rate simulation: player, enemies, combat.
//! * [`renderer`] – raycaster, draw-call composer and the software back-end.

pub mod config;
pub mod renderer;
pub mod sim;
pub mod world;
