//! Frame composition: background, one wall strip per ray hit, then enemy
//! billboards.  Pure geometry – no pixels are touched here.

use glam::Vec2;

use super::{DrawCall, RayHit, RectSpan, Rgba, SpriteSpan, rgb};
use crate::world::Camera;

pub const CEILING: Rgba = rgb(0x88, 0x88, 0x88);
pub const FLOOR: Rgba = rgb(0x44, 0x44, 0x44);

/// Wall strip height = `WALL_SCALE / corrected distance`.
pub const WALL_SCALE: f32 = 30_000.0;
/// Sprite edge = `SPRITE_SCALE / distance`, never below `MIN_SPRITE`.
pub const SPRITE_SCALE: f32 = 10_000.0;
pub const MIN_SPRITE: f32 = 10.0;

/// Brightest and darkest wall grey.
const SHADE_NEAR: f32 = 200.0;
const SHADE_FAR: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    fn size(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Grey level for a wall hit at raw distance `distance`.
#[inline]
pub fn wall_shade(distance: f32) -> Rgba {
    let b = (SHADE_NEAR - distance).max(SHADE_FAR) as u8;
    rgb(b, b, b)
}

/// Build the frame's draw list into `out` (cleared first).
///
/// Sprites are emitted far-to-near so nearer enemies overdraw farther ones.
/// They are **not** clipped against walls.
pub fn compose(
    rays: &[Option<RayHit>],
    cam: &Camera,
    enemies: &[Vec2],
    view: Viewport,
    out: &mut Vec<DrawCall>,
) {
    out.clear();
    let size = view.size();
    let half_h = size.y * 0.5;

    /* ceiling / floor -------------------------------------------------- */
    out.push(DrawCall::Rect(RectSpan {
        x: 0.0,
        y: 0.0,
        w: size.x,
        h: half_h,
        colour: CEILING,
    }));
    out.push(DrawCall::Rect(RectSpan {
        x: 0.0,
        y: half_h,
        w: size.x,
        h: half_h,
        colour: FLOOR,
    }));

    /* walls ------------------------------------------------------------ */
    if !rays.is_empty() {
        let col_w = size.x / rays.len() as f32;
        for (i, hit) in rays.iter().enumerate() {
            let Some(hit) = hit else { continue };
            let h = WALL_SCALE / hit.corrected;
            out.push(DrawCall::Rect(RectSpan {
                x: i as f32 * col_w,
                y: half_h - h * 0.5,
                w: col_w + 1.0, // overlap hides seams between columns
                h,
                colour: wall_shade(hit.distance),
            }));
        }
    }

    /* enemies ---------------------------------------------------------- */
    let first_sprite = out.len();
    for &pos in enemies {
        let dist = pos.distance(cam.pos());
        if dist <= f32::EPSILON {
            continue;
        }
        let bearing = cam.bearing_to(pos);
        if !cam.in_view(bearing) {
            continue;
        }
        let screen_x = (bearing + cam.fov() * 0.5) / cam.fov() * size.x;
        let sprite = (SPRITE_SCALE / dist).max(MIN_SPRITE);
        out.push(DrawCall::Sprite(SpriteSpan {
            x: screen_x - sprite * 0.5,
            y: half_h - sprite,
            size: sprite,
            dist,
        }));
    }
    // far-to-near painter's order
    out[first_sprite..].sort_by(|a, b| sprite_dist(b).total_cmp(&sprite_dist(a)));
}

#[inline]
fn sprite_dist(call: &DrawCall) -> f32 {
    match call {
        DrawCall::Sprite(s) => s.dist,
        DrawCall::Rect(_) => 0.0,
    }
}
