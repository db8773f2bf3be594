//! Fixed-step ray marcher.
//!
//! Each ray walks outward one world unit at a time and stops at the first
//! point that [`TileMap::is_wall`] reports as blocked (walls and anything
//! outside the grid).  Distances are exact multiples of [`RAY_STEP`].

use glam::Vec2;

use crate::world::{Camera, TileMap};

/// Rays per frame, spread evenly over the field of view.
pub const NUM_RAYS: usize = 160;
/// Rays give up after this many world units.
pub const MAX_RANGE: f32 = 800.0;
pub const RAY_STEP: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the ray.
    pub distance: f32,
    /// Distance projected onto the view direction (fisheye-free).
    pub corrected: f32,
}

/// March one ray from `origin`.  `None` when nothing is hit within range.
pub fn cast_ray(map: &TileMap, origin: Vec2, ray_angle: f32, facing: f32) -> Option<RayHit> {
    let (s, c) = ray_angle.sin_cos();
    let dir = Vec2::new(c, s);

    let mut distance = 0.0;
    while distance < MAX_RANGE {
        distance += RAY_STEP;
        let p = origin + dir * distance;
        if map.is_wall(p.x, p.y) {
            return Some(RayHit {
                distance,
                corrected: distance * (ray_angle - facing).cos(),
            });
        }
    }
    None
}

/// Cast the whole fan for `cam` into `out` (one slot per ray, left → right).
pub fn cast_rays(map: &TileMap, cam: &Camera, out: &mut Vec<Option<RayHit>>) {
    out.clear();
    out.extend(
        (0..NUM_RAYS).map(|i| cast_ray(map, cam.pos(), cam.ray_angle(i, NUM_RAYS), cam.yaw())),
    );
}
