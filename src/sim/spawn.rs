//! Random enemy placement.
//!
//! Cells are sampled uniformly over the whole grid; a sample is kept only if
//! it is floor and its centre lies outside the clearance radius around the
//! player.  The search is bounded so a crowded or tiny map reports
//! [`SpawnError::Exhausted`] instead of spinning forever; a map with no
//! eligible cell at all fails before sampling.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use thiserror::Error;

use super::{Enemy, Health, Position};
use crate::world::{Cell, TileMap};

/// Minimum distance between a fresh enemy and the player.
pub const SPAWN_CLEARANCE: f32 = 200.0;
/// Starting hit points.
pub const ENEMY_HP: i32 = 100;
/// Samples allowed per missing enemy before giving up.
pub const MAX_SPAWN_ATTEMPTS_PER_ENEMY: usize = 512;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpawnError {
    #[error("placed {spawned} of {requested} enemies after {attempts} attempts")]
    Exhausted {
        requested: usize,
        spawned: usize,
        attempts: usize,
    },
}

/// Insert one enemy at `pos` with full health.
#[inline]
pub fn spawn_enemy(world: &mut World, pos: Vec2) -> Entity {
    world.spawn((Enemy, Position(pos), Health(ENEMY_HP)))
}

/// Number of live enemies.
pub fn enemy_count(world: &World) -> usize {
    world.query::<&Enemy>().iter().count()
}

/// Top the world up to exactly `count` enemies.
///
/// Returns how many were added.  Enemies placed before the bound was hit
/// stay in the world.
pub fn spawn_enemies<R: Rng + ?Sized>(
    world: &mut World,
    map: &TileMap,
    player_pos: Vec2,
    count: usize,
    rng: &mut R,
) -> Result<usize, SpawnError> {
    let existing = enemy_count(world);
    let missing = count.saturating_sub(existing);
    if missing > 0 && !has_eligible_cell(map, player_pos) {
        return Err(SpawnError::Exhausted {
            requested: count,
            spawned: existing,
            attempts: 0,
        });
    }
    let budget = missing.saturating_mul(MAX_SPAWN_ATTEMPTS_PER_ENEMY);

    let mut spawned = 0;
    let mut attempts = 0;
    while spawned < missing {
        if attempts >= budget {
            return Err(SpawnError::Exhausted {
                requested: count,
                spawned: existing + spawned,
                attempts,
            });
        }
        attempts += 1;

        let col = rng.gen_range(0..map.width());
        let row = rng.gen_range(0..map.height());
        if map.cell(col, row) != Some(Cell::Floor) {
            continue;
        }
        let at = TileMap::cell_center(col, row);
        if at.distance(player_pos) > SPAWN_CLEARANCE {
            spawn_enemy(world, at);
            spawned += 1;
        }
    }

    log::debug!("spawned {spawned} enemies in {attempts} attempts");
    Ok(spawned)
}

/// Some floor cell centre lies outside the clearance radius.
fn has_eligible_cell(map: &TileMap, player_pos: Vec2) -> bool {
    (0..map.height()).any(|row| {
        (0..map.width()).any(|col| {
            map.cell(col, row) == Some(Cell::Floor)
                && TileMap::cell_center(col, row).distance(player_pos) > SPAWN_CLEARANCE
        })
    })
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
