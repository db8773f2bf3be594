mod combat;
mod components;
mod player;
mod spawn;
mod tic;

pub use combat::{
    ENEMY_SPEED, ENEMY_STOP_DIST, MELEE_ARC, MELEE_DAMAGE, MELEE_RANGE, MeleeResult,
    move_enemies, resolve_melee_hit,
};
pub use components::{Buttons, Enemy, Health, InputCmd, Position};
pub use player::{FOV, MOVE_SPEED, PLAYER_START, Player, TURN_RATE};
pub use spawn::{
    ENEMY_HP, MAX_SPAWN_ATTEMPTS_PER_ENEMY, SPAWN_CLEARANCE, SpawnError, enemy_count,
    spawn_enemies, spawn_enemy,
};
pub use tic::{SIM_FPS, TicRunner};
