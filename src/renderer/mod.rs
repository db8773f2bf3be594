//! Rendering abstraction layer.
//!
//! *The simulation never touches a pixel buffer directly.*
//! [`scene::compose`] turns the raycast and the enemy list into a list of
//! [`DrawCall`]s (back-to-front) and hands them to a type that implements
//! [`Renderer`].
//!
//! * [`software::Software`] is the CPU back-end writing `0x00RRGGBB` pixels.
//! * A blanket-impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.

pub mod effects;
pub mod raycast;
pub mod scene;
pub mod software;
pub mod texture;

pub use effects::Effects;
pub use raycast::{MAX_RANGE, NUM_RAYS, RayHit, cast_ray, cast_rays};
pub use scene::{Viewport, compose};
pub use software::Software;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Pack an RGB triple.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Solid axis-aligned rectangle in screen pixels (floats, unclipped).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectSpan {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub colour: Rgba,
}

/// Square enemy billboard, unclipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSpan {
    pub x: f32, // left edge
    pub y: f32, // top edge
    pub size: f32,
    /// World distance to the viewer, kept for ordering.
    pub dist: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCall {
    Rect(RectSpan),
    Sprite(SpriteSpan),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill one solid rectangle.
    fn fill_rect(&mut self, rect: &RectSpan);

    /// Blit the enemy sprite scaled into `sprite`.
    fn blit_sprite(&mut self, sprite: &SpriteSpan);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` runs exactly once per frame.
    fn end_frame<F, R>(&mut self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R;
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_calls(&mut self, calls: &[DrawCall]) {
        for c in calls {
            match c {
                DrawCall::Rect(r) => self.fill_rect(r),
                DrawCall::Sprite(s) => self.blit_sprite(s),
            }
        }
    }

    fn draw_frame<F, R>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        self.begin_frame(width, height);
        self.draw_calls(calls);
        self.end_frame(submit)
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
