//! ---------------------------------------------------------------------------
//! Software (CPU) rasteriser
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format, the layout
//!   `minifb` expects.
//! * Draw calls arrive back-to-front, so no depth buffer is kept.
//! * Every call is clipped to the viewport; off-screen or degenerate spans
//!   are dropped silently.
//! ---------------------------------------------------------------------------

use super::{Effects, RectSpan, Renderer, Rgba, SpriteSpan, texture::Texture};

/// Colour behind everything (only visible if a frame is left uncovered).
pub const CLEAR_COLOUR: Rgba = 0x20_20_20;
const WEAPON_IDLE: Rgba = 0x60_60_60;
const WEAPON_FLASH: Rgba = 0xFF_D0_40;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    sprite: Texture,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(Texture::enemy())
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR_COLOUR);
    }

    fn fill_rect(&mut self, r: &RectSpan) {
        let xs = Self::clip(r.x, r.w, self.width);
        for y in Self::clip(r.y, r.h, self.height) {
            let row = y * self.width;
            self.scratch[row + xs.start..row + xs.end].fill(r.colour);
        }
    }

    fn blit_sprite(&mut self, s: &SpriteSpan) {
        if s.size.is_nan() || s.size <= 0.0 {
            return;
        }
        let tex = &self.sprite;
        let u_step = tex.w as f32 / s.size;
        let v_step = tex.h as f32 / s.size;

        let xs = Self::clip(s.x, s.size, self.width);
        let ys = Self::clip(s.y, s.size, self.height);
        for y in ys {
            let v = ((y as f32 + 0.5 - s.y) * v_step) as usize;
            for x in xs.clone() {
                let u = ((x as f32 + 0.5 - s.x) * u_step) as usize;
                let texel = tex.texel(u, v);
                if !Texture::is_transparent(texel) {
                    self.scratch[y * self.width + x] = texel & 0x00_FF_FF_FF;
                }
            }
        }
    }

    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/*──────────────────────── helpers ────────────────────────────────────*/
impl Software {
    pub fn new(sprite: Texture) -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            sprite,
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.scratch[y * self.width + x])
    }

    /// Weapon block at the bottom centre, then the muzzle flash tint.
    pub fn draw_effects(&mut self, fx: &Effects) {
        let (w, h) = (self.width as f32, self.height as f32);
        let gun_w = w / 8.0;
        let gun_h = h / 6.0;
        self.fill_rect(&RectSpan {
            x: (w - gun_w) * 0.5,
            y: h - gun_h,
            w: gun_w,
            h: gun_h,
            colour: if fx.weapon_flash() {
                WEAPON_FLASH
            } else {
                WEAPON_IDLE
            },
        });

        let a = fx.muzzle_opacity();
        if a > 0.0 {
            for px in &mut self.scratch {
                *px = tint_white(*px, a);
            }
        }
    }

    /// Pixel range covered by `[start, start + len)`, clamped to `0..limit`.
    /// NaN collapses to an empty range.
    #[inline]
    fn clip(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
        let lim = limit as f32;
        let a = start.floor().clamp(0.0, lim) as usize;
        let b = (start + len).floor().clamp(0.0, lim) as usize;
        a..b.max(a)
    }
}

/// Blend `px` toward white by `a` (0 = unchanged, 1 = white).
#[inline]
fn tint_white(px: Rgba, a: f32) -> Rgba {
    let ch = |shift: u32| {
        let c = ((px >> shift) & 0xFF) as f32;
        let t = c + (255.0 - c) * a;
        (t.round().clamp(0.0, 255.0) as u32) << shift
    };
    ch(16) | ch(8) | ch(0)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{
        DrawCall, NUM_RAYS, RendererExt, Viewport, cast_rays, compose,
        scene::{CEILING, FLOOR},
    };
    use crate::sim::Player;
    use crate::world::TileMap;
    use glam::Vec2;
    use std::time::Instant;

    fn solid_sprite() -> Texture {
        Texture {
            name: "SOLID".into(),
            w: 2,
            h: 2,
            pixels: vec![0xFF_0000FF, 0x00_000000, 0xFF_0000FF, 0xFF_0000FF],
        }
    }

    #[test]
    fn clears_to_background() {
        let mut sw = Software::default();
        sw.begin_frame(4, 3);
        assert_eq!(sw.pixels().len(), 12);
        assert!(sw.pixels().iter().all(|&p| p == CLEAR_COLOUR));
    }

    #[test]
    fn rect_is_clipped_to_viewport() {
        let mut sw = Software::default();
        sw.begin_frame(8, 8);
        sw.fill_rect(&RectSpan {
            x: -3.0,
            y: 6.0,
            w: 5.0,
            h: 100.0,
            colour: 0x00FF00,
        });
        assert_eq!(sw.pixel(0, 6), Some(0x00FF00));
        assert_eq!(sw.pixel(1, 7), Some(0x00FF00));
        assert_eq!(sw.pixel(2, 7), Some(CLEAR_COLOUR));
        assert_eq!(sw.pixel(0, 5), Some(CLEAR_COLOUR));

        // entirely off-screen / degenerate spans draw nothing
        for r in [
            RectSpan { x: 20.0, y: 0.0, w: 4.0, h: 4.0, colour: 1 },
            RectSpan { x: 0.0, y: 0.0, w: -4.0, h: 4.0, colour: 1 },
            RectSpan { x: f32::NAN, y: 0.0, w: 4.0, h: 4.0, colour: 1 },
        ] {
            sw.fill_rect(&r);
        }
        assert!(!sw.pixels().contains(&1));
    }

    #[test]
    fn sprite_skips_transparent_texels() {
        let mut sw = Software::new(solid_sprite());
        sw.begin_frame(8, 8);
        sw.blit_sprite(&SpriteSpan {
            x: 0.0,
            y: 0.0,
            size: 4.0,
            dist: 1.0,
        });
        assert_eq!(sw.pixel(0, 0), Some(0x0000FF));
        assert_eq!(sw.pixel(3, 0), Some(CLEAR_COLOUR)); // transparent quadrant
        assert_eq!(sw.pixel(3, 3), Some(0x0000FF));
        assert_eq!(sw.pixel(4, 4), Some(CLEAR_COLOUR));
    }

    #[test]
    fn huge_sprite_is_clipped() {
        let mut sw = Software::new(solid_sprite());
        sw.begin_frame(8, 8);
        sw.blit_sprite(&SpriteSpan {
            x: -1.0e6,
            y: -1.0e6,
            size: f32::INFINITY,
            dist: 0.0,
        });
        sw.blit_sprite(&SpriteSpan {
            x: 2.0,
            y: 2.0,
            size: 1.0e9,
            dist: 0.0,
        });
        assert_eq!(sw.pixel(7, 7), Some(0x0000FF));
    }

    #[test]
    fn muzzle_flash_tints_frame() {
        let mut sw = Software::default();
        let mut fx = Effects::new();
        sw.begin_frame(16, 16);
        fx.fire(Instant::now());
        sw.draw_effects(&fx);
        // top-left is far from the weapon block; 0x20 tinted 80% toward white
        let expected = tint_white(CLEAR_COLOUR, 0.8);
        assert_eq!(sw.pixel(0, 0), Some(expected));
        assert_eq!(expected & 0xFF, (32.0f32 + 223.0 * 0.8).round() as u32);
    }

    #[test]
    fn weapon_block_without_flash() {
        let mut sw = Software::default();
        sw.begin_frame(64, 60);
        sw.draw_effects(&Effects::new());
        assert_eq!(sw.pixel(32, 59), Some(WEAPON_IDLE));
        assert_eq!(sw.pixel(0, 0), Some(CLEAR_COLOUR));
    }

    /// 15×15 room, interior 64..896 on both axes.
    fn square_room() -> TileMap {
        let mut rows = vec!["#".repeat(15)];
        rows.extend((0..13).map(|_| format!("#{}#", ".".repeat(13))));
        rows.push("#".repeat(15));
        TileMap::parse(rows).unwrap()
    }

    #[test]
    fn full_frame_facing_flat_wall() {
        let map = square_room();
        // east wall 416 units away: every ray hits, strips stay short
        let player = Player::new(Vec2::new(480.0, 480.0), 0.0);
        let cam = player.camera();
        let mut rays = Vec::new();
        cast_rays(&map, &cam, &mut rays);
        assert_eq!(rays.len(), NUM_RAYS);

        let mut calls: Vec<DrawCall> = Vec::new();
        compose(&rays, &cam, &[], Viewport::new(320, 200), &mut calls);

        let mut sw = Software::default();
        let (w, h, top_left, bottom_left) = sw.draw_frame(320, 200, &calls, |fb, w, h| {
            (w, h, fb[0], fb[(h - 1) * w])
        });
        assert_eq!((w, h), (320, 200));
        assert_eq!(top_left, CEILING);
        assert_eq!(bottom_left, FLOOR);
        // the centre row is wall from edge to edge
        let mid = &sw.pixels()[100 * 320..101 * 320];
        assert!(mid.iter().all(|&p| p != CEILING && p != FLOOR));
    }
}
