//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It produces a depth-sorted list of [`DrawItem`]s (far-to-near) and hands
//! them to a type that implements [`Renderer`].
//!
//! * Back-ends are pluggable (`renderer::software` today, a GPU blitter
//!   later) without changing engine logic.
//! * A blanket impl [`RendererExt`] adds `draw_frame` so call-sites stay
//!   short.

use crate::world::{TextureBank, TextureId};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// One textured wall column, already projected to its screen footprint.
///
/// `x .. x+w` are the destination pixel columns; `height` is the projected
/// height of a full wall at this depth (may exceed the screen — the blitter
/// middle-crops the texture in that case).
#[derive(Clone, Copy, Debug)]
pub struct WallSlice {
    pub x: i32,
    pub w: i32,
    pub depth: f32,
    pub tex: TextureId,
    /// Fractional texture column in `[0, 1)`, oriented so texture columns
    /// read left-to-right on every wall face.
    pub u: f32,
    pub height: f32,
    /// Fog blend toward black, `0.0` = clear .. `1.0` = fully fogged.
    pub fog: f32,
}

/// A sprite billboard: an image quad always facing the viewer.
#[derive(Clone, Copy, Debug)]
pub struct Billboard {
    pub x: f32, // top-left, may be off-screen; the blitter clips
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub depth: f32,
    pub tex: TextureId,
}

#[derive(Clone, Copy, Debug)]
pub enum DrawItem {
    Wall(WallSlice),
    Sprite(Billboard),
}

impl DrawItem {
    /// Perpendicular depth used for painter's ordering.  Walls and sprites
    /// share the same fisheye-corrected convention, so they occlude each
    /// other consistently.
    #[inline]
    pub fn depth(&self) -> f32 {
        match self {
            DrawItem::Wall(w) => w.depth,
            DrawItem::Sprite(s) => s.depth,
        }
    }
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
/// Software callers typically forward it to their window manager; a GPU
/// back-end can call the closure with an empty slice.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and paint
    /// the background (sky above the horizon, floor below).
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise one textured wall column into the internal buffer.
    fn draw_wall(&mut self, slice: &WallSlice, bank: &TextureBank);

    /// Rasterise one billboard, honouring fully transparent texels.
    fn draw_sprite(&mut self, billboard: &Billboard, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` runs exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
///
/// `items` must already be sorted far-to-near; [`crate::engine::FrameBuilder`]
/// guarantees that.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        items: &[DrawItem],
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for item in items {
            match item {
                DrawItem::Wall(w) => self.draw_wall(w, bank),
                DrawItem::Sprite(s) => self.draw_sprite(s, bank),
            }
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
