use glam::Vec2;
use hecs::{Entity, World};
use smallvec::SmallVec;

use super::{Enemy, Health, Player, Position};

/// Enemies stop homing once this close to the player.
pub const ENEMY_STOP_DIST: f32 = 20.0;
/// Enemy walk speed in world units per tic.
pub const ENEMY_SPEED: f32 = 0.5;
/// Melee reach.
pub const MELEE_RANGE: f32 = 150.0;
/// Maximum aim error (radians) for a melee hit.
pub const MELEE_ARC: f32 = 0.3;
pub const MELEE_DAMAGE: i32 = 50;

/// What one fire action did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeleeResult {
    /// Enemy that took damage, if any.
    pub hit: Option<Entity>,
    /// Enemies removed by this pass.
    pub killed: usize,
}

/// Step every enemy straight toward the player.  Walls are ignored.
pub fn move_enemies(world: &mut World, player_pos: Vec2) {
    for (_, (pos, _)) in world.query_mut::<(&mut Position, &Enemy)>() {
        let to_player = player_pos - pos.0;
        let dist = to_player.length();
        if dist > ENEMY_STOP_DIST {
            pos.0 += to_player / dist * ENEMY_SPEED;
        }
    }
}

/// Damage the first enemy (in world iteration order) inside the melee cone,
/// then remove everything whose health ran out.
pub fn resolve_melee_hit(world: &mut World, player: &Player) -> MeleeResult {
    let cam = player.camera();

    let target = world
        .query_mut::<(&Position, &mut Health, &Enemy)>()
        .into_iter()
        .find(|(_, (pos, _, _))| {
            pos.0.distance(player.pos) < MELEE_RANGE && cam.bearing_to(pos.0).abs() < MELEE_ARC
        })
        .map(|(e, (_, hp, _))| {
            hp.0 -= MELEE_DAMAGE;
            log::debug!("hit {e:?}, {} hp left", hp.0);
            e
        });

    let dead: SmallVec<[Entity; 4]> = world
        .query::<(&Health, &Enemy)>()
        .iter()
        .filter(|(_, (hp, _))| hp.0 <= 0)
        .map(|(e, _)| e)
        .collect();
    for &e in &dead {
        // collected from the same world just above
        let despawned = world.despawn(e);
        debug_assert!(despawned.is_ok(), "{e:?} vanished before despawn");
        log::debug!("killed {e:?}");
    }

    MeleeResult {
        hit: target,
        killed: dead.len(),
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{ENEMY_HP, enemy_count, spawn_enemy};
    use std::f32::consts::PI;

    fn hp(world: &World, e: Entity) -> i32 {
        world.get::<&Health>(e).unwrap().0
    }

    fn at_origin(angle: f32) -> Player {
        Player::new(Vec2::ZERO, angle)
    }

    #[test]
    fn enemy_in_front_loses_fifty() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(100.0, 0.0));
        let player = at_origin(0.0);

        let r = resolve_melee_hit(&mut world, &player);
        assert_eq!(r, MeleeResult { hit: Some(e), killed: 0 });
        assert_eq!(hp(&world, e), ENEMY_HP - MELEE_DAMAGE);
    }

    #[test]
    fn enemy_behind_takes_nothing() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(100.0, 0.0));
        let player = at_origin(PI);

        let r = resolve_melee_hit(&mut world, &player);
        assert_eq!(r, MeleeResult::default());
        assert_eq!(hp(&world, e), ENEMY_HP);
    }

    #[test]
    fn out_of_range_or_off_axis_is_a_miss() {
        let mut world = World::new();
        let far = spawn_enemy(&mut world, Vec2::new(150.0, 0.0)); // not strictly < range
        let wide = spawn_enemy(&mut world, Vec2::new(100.0, 40.0)); // ~0.38 rad off
        let player = at_origin(0.0);

        assert_eq!(resolve_melee_hit(&mut world, &player), MeleeResult::default());
        assert_eq!(hp(&world, far), ENEMY_HP);
        assert_eq!(hp(&world, wide), ENEMY_HP);
        assert_eq!(enemy_count(&world), 2);
    }

    #[test]
    fn aim_works_after_full_turns() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(0.0, -100.0));
        // facing -Y, stored as 3π/2
        let player = at_origin(-PI / 2.0);
        assert_eq!(resolve_melee_hit(&mut world, &player).hit, Some(e));
    }

    #[test]
    fn second_hit_kills_and_removes() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(100.0, 0.0));
        spawn_enemy(&mut world, Vec2::new(-100.0, 0.0));
        let player = at_origin(0.0);

        resolve_melee_hit(&mut world, &player);
        assert_eq!(enemy_count(&world), 2);
        let r = resolve_melee_hit(&mut world, &player);
        assert_eq!(r, MeleeResult { hit: Some(e), killed: 1 });
        assert_eq!(enemy_count(&world), 1);
        assert!(!world.contains(e));
    }

    #[test]
    fn only_first_match_is_damaged() {
        let mut world = World::new();
        let a = spawn_enemy(&mut world, Vec2::new(60.0, 0.0));
        let b = spawn_enemy(&mut world, Vec2::new(120.0, 0.0));
        let player = at_origin(0.0);

        let r = resolve_melee_hit(&mut world, &player);
        let hit = r.hit.unwrap();
        let other = if hit == a { b } else { a };
        assert_eq!(hp(&world, hit), ENEMY_HP - MELEE_DAMAGE);
        assert_eq!(hp(&world, other), ENEMY_HP);
    }

    #[test]
    fn miss_is_idempotent() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(500.0, 500.0));
        let player = at_origin(0.0);
        for _ in 0..3 {
            assert_eq!(resolve_melee_hit(&mut world, &player), MeleeResult::default());
        }
        assert_eq!(hp(&world, e), ENEMY_HP);
        assert_eq!(enemy_count(&world), 1);
    }

    #[test]
    fn enemies_home_toward_player() {
        let mut world = World::new();
        let far = spawn_enemy(&mut world, Vec2::new(100.0, 0.0));
        let near = spawn_enemy(&mut world, Vec2::new(0.0, 15.0));

        move_enemies(&mut world, Vec2::ZERO);

        let p_far = world.get::<&Position>(far).unwrap().0;
        let p_near = world.get::<&Position>(near).unwrap().0;
        assert!((p_far - Vec2::new(100.0 - ENEMY_SPEED, 0.0)).length() < 1e-5);
        assert_eq!(p_near, Vec2::new(0.0, 15.0));
    }

    #[test]
    fn homing_settles_at_stop_distance() {
        let mut world = World::new();
        let e = spawn_enemy(&mut world, Vec2::new(30.0, 40.0));
        for _ in 0..200 {
            move_enemies(&mut world, Vec2::ZERO);
        }
        let d = world.get::<&Position>(e).unwrap().0.length();
        assert!(d <= ENEMY_STOP_DIST && d >= ENEMY_STOP_DIST - ENEMY_SPEED - 1e-4);
    }
}
