use glam::Vec2;
use std::f32::consts::{FRAC_PI_3, TAU};

use super::InputCmd;
use crate::world::{Camera, TileMap};

/// Walk speed in world units per tic.
pub const MOVE_SPEED: f32 = 2.0;
/// Turn rate in radians per tic.
pub const TURN_RATE: f32 = 0.05;
/// Horizontal field of view (60°).
pub const FOV: f32 = FRAC_PI_3;
/// Spawn point used by the built-in level.
pub const PLAYER_START: Vec2 = Vec2::new(100.0, 100.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Heading in `[0, 2π)`; 0 = +X.
    pub angle: f32,
    /// Signed forward intent, `−MOVE_SPEED ..= MOVE_SPEED`.
    pub speed: f32,
    /// Signed turn intent, `−TURN_RATE ..= TURN_RATE`.
    pub rotation: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START, 0.0)
    }
}

impl Player {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle: angle.rem_euclid(TAU),
            speed: 0.0,
            rotation: 0.0,
        }
    }

    /// Turn the frame's buttons into speed / rotation intents.
    pub fn apply_input(&mut self, cmd: &InputCmd) {
        self.speed = cmd.forward() * MOVE_SPEED;
        self.rotation = cmd.turn() * TURN_RATE;
    }

    /// View used by the raycaster, sprite projection and melee aiming.
    #[inline]
    pub fn camera(&self) -> Camera {
        Camera::new(self.pos, self.angle, FOV)
    }

    /// Rotate, then move with per-axis collision so the player slides along
    /// walls instead of sticking to them.
    pub fn step(&mut self, map: &TileMap) {
        self.angle = (self.angle + self.rotation).rem_euclid(TAU);
        if self.speed == 0.0 {
            return;
        }

        let next = self.pos + self.camera().forward() * self.speed;

        if !map.is_wall(next.x, self.pos.y) {
            self.pos.x = next.x;
        }
        if !map.is_wall(self.pos.x, next.y) {
            self.pos.y = next.y;
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
