use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w <= -PI { w + TAU } else { w }
}

/// Player view-point in world space.
///
/// * Only **yaw** (heading) exists – the view never tilts.
/// * 0 rad looks along +X; angles grow toward +Y (screen-down on the map).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pos: Vec2,
    yaw: f32,
    fov: f32, // horizontal FoV (radians)
}

impl Camera {
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self { pos, yaw, fov }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(c, s)
    }

    /// Angle from the camera to `p`, relative to the view direction, in `(-π, π]`.
    #[inline]
    pub fn bearing_to(&self, p: Vec2) -> f32 {
        let d = p - self.pos;
        wrap_angle(d.y.atan2(d.x) - self.yaw)
    }

    /// True if a bearing falls strictly inside the horizontal frustum.
    #[inline]
    pub fn in_view(&self, bearing: f32) -> bool {
        bearing.abs() < self.fov * 0.5
    }

    /// World angle of ray `i` out of `count`, sweeping left edge → right.
    #[inline]
    pub fn ray_angle(&self, i: usize, count: usize) -> f32 {
        self.yaw - self.fov * 0.5 + i as f32 * (self.fov / count as f32)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
