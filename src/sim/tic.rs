use super::{MeleeResult, Player, SpawnError, combat, spawn};
use crate::world::TileMap;
use glam::Vec2;
use hecs::World;
use rand::Rng;
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 60;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);
/// Catch-up limit per `pump`; a longer stall is dropped instead of replayed.
const MAX_CATCH_UP: u32 = 8;

/// Owns the simulation state (player + enemy world) and drives the fixed
/// rate game tic.  The level is borrowed per call.
pub struct TicRunner {
    world: World,
    player: Player,
    last: Instant,
    tics: u64,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new(Player::default())
    }
}

impl TicRunner {
    pub fn new(player: Player) -> Self {
        Self {
            world: World::new(),
            player,
            last: Instant::now(),
            tics: 0,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Tics executed so far.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    pub fn enemy_count(&self) -> usize {
        spawn::enemy_count(&self.world)
    }

    /// Collect enemy positions in world iteration order.
    pub fn enemy_positions(&self, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(
            self.world
                .query::<(&super::Position, &super::Enemy)>()
                .iter()
                .map(|(_, (p, _))| p.0),
        );
    }

    /// Top up to `count` enemies away from the player.
    pub fn spawn_enemies<R: Rng + ?Sized>(
        &mut self,
        map: &TileMap,
        count: usize,
        rng: &mut R,
    ) -> Result<usize, SpawnError> {
        spawn::spawn_enemies(&mut self.world, map, self.player.pos, count, rng)
    }

    /// Feed one frame of input.  Returns the melee outcome when FIRE was
    /// pressed this frame.
    pub fn apply_input(&mut self, cmd: &super::InputCmd) -> Option<MeleeResult> {
        self.player.apply_input(cmd);
        cmd.fire().then(|| self.fire())
    }

    pub fn fire(&mut self) -> MeleeResult {
        combat::resolve_melee_hit(&mut self.world, &self.player)
    }

    /// Advance enough tics to keep the simulation in step with real time.
    /// Returns how many ran.
    pub fn pump(&mut self, map: &TileMap) -> u32 {
        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            self.tick(map);
            self.last += TIC;
            ran += 1;
            if ran >= MAX_CATCH_UP {
                self.last = Instant::now();
                break;
            }
        }
        ran
    }

    /* ---------------------------------------------------------------- */
    /* one fixed-rate game tic: turn, move (with collision), enemy AI    */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, map: &TileMap) {
        self.player.step(map);
        combat::move_enemies(&mut self.world, self.player.pos);
        self.tics += 1;
    }
}
