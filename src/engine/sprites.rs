//! Sprite billboards.
//!
//! A sprite is a world-space point with an image; projection turns it into a
//! screen-space quad using the same angle-per-ray scale and fisheye
//! convention as the wall caster, so sprites and walls depth-sort against
//! each other correctly.
//!
//! Animation is a capability, not a subclass: a static sprite is simply one
//! frame with `anim: None`, and the projection math never knows the
//! difference.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::defs::Config;
use crate::renderer::Billboard;
use crate::world::{Camera, TextureBank, TextureId};

/// Fixed-interval frame cycling, driven by a caller-supplied clock so the
/// library stays free of timing side effects.
#[derive(Clone, Copy, Debug)]
pub struct Animation {
    pub interval_ms: u64,
    last_ms: u64,
}

impl Animation {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// True exactly when a frame advance is due; resets the timer then.
    fn due(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) > self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// A world-space object rendered as a camera-facing quad.
///
/// Authored fields (`pos`, `scale`, `v_shift`, frames) are fixed at
/// creation; only the animation cursor mutates over a session.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub pos: Vec2,
    /// Cyclic frame sequence; a static sprite holds exactly one.
    frames: Vec<TextureId>,
    cursor: usize,
    /// Authored size multiplier applied to the projected height.
    pub scale: f32,
    /// Vertical shift as a fraction of the projected height
    /// (positive moves the sprite toward the floor).
    pub v_shift: f32,
    anim: Option<Animation>,
}

impl Sprite {
    /// A static, single-image sprite.
    pub fn fixed(pos: Vec2, tex: TextureId, scale: f32, v_shift: f32) -> Self {
        Self {
            pos,
            frames: vec![tex],
            cursor: 0,
            scale,
            v_shift,
            anim: None,
        }
    }

    /// A sprite cycling through `frames` every `interval_ms`.
    /// Empty `frames` degrade to the missing-texture placeholder.
    pub fn animated(
        pos: Vec2,
        frames: Vec<TextureId>,
        scale: f32,
        v_shift: f32,
        interval_ms: u64,
    ) -> Self {
        let frames = if frames.is_empty() {
            vec![crate::world::NO_TEXTURE]
        } else {
            frames
        };
        Self {
            pos,
            frames,
            cursor: 0,
            scale,
            v_shift,
            anim: Some(Animation::new(interval_ms)),
        }
    }

    /// The frame to draw this tick.
    #[inline]
    pub fn frame(&self) -> TextureId {
        self.frames[self.cursor]
    }

    /// Advance the cyclic animation if its interval elapsed.  Independent of
    /// draw order and projection; a culled sprite still animates.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(anim) = &mut self.anim {
            if anim.due(now_ms) {
                self.cursor = (self.cursor + 1) % self.frames.len();
            }
        }
    }
}

/// Project a sprite into a screen-space [`Billboard`].
///
/// Returns `None` when the sprite is too close (degenerate scale) or lies
/// outside the screen expanded by its own half-width (cheap cull) — both
/// are normal per-frame outcomes, not errors.
pub fn project(
    sprite: &Sprite,
    camera: &Camera,
    bank: &TextureBank,
    cfg: &Config,
) -> Option<Billboard> {
    let delta_pos = sprite.pos - camera.pos();
    let theta = delta_pos.y.atan2(delta_pos.x);

    // Keep the angular delta continuous across the 0/2π seam when the
    // sprite is behind-and-beside the viewer.
    let mut delta = theta - camera.angle();
    if (delta_pos.x > 0.0 && camera.angle() > PI) || (delta_pos.x < 0.0 && delta_pos.y < 0.0) {
        delta += TAU;
    }

    let delta_rays = delta / cfg.delta_angle;
    let screen_x = (cfg.half_num_rays + delta_rays) * cfg.scale as f32;

    // Same perpendicular-depth convention as the wall caster.
    let norm_dist = delta_pos.length() * delta.cos();

    let tex = bank.texture_or_missing(sprite.frame());
    let half_img_w = tex.w as f32 * 0.5;

    let visible = norm_dist > cfg.sprite_min_dist
        && screen_x > -half_img_w
        && screen_x < cfg.width as f32 + half_img_w;
    if !visible {
        return None;
    }

    let proj = cfg.screen_dist / norm_dist * sprite.scale;
    let aspect = tex.w as f32 / tex.h as f32;
    let (w, h) = (proj * aspect, proj);

    Some(Billboard {
        x: screen_x - w * 0.5,
        y: cfg.half_height - h * 0.5 + sprite.v_shift * h,
        w,
        h,
        depth: norm_dist,
        tex: sprite.frame(),
    })
}

/// Session-owned collection of sprites.
///
/// Mirrors the frame flow of the wall side: `tick_all` once per update,
/// `project_each` once per frame to feed the draw list.
#[derive(Default)]
pub struct ObjectSet {
    sprites: Vec<Sprite>,
}

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn tick_all(&mut self, now_ms: u64) {
        for sprite in &mut self.sprites {
            sprite.tick(now_ms);
        }
    }

    /// Project every visible sprite and hand the billboards to `emit`.
    pub fn project_each<F>(&self, camera: &Camera, bank: &TextureBank, cfg: &Config, mut emit: F)
    where
        F: FnMut(Billboard),
    {
        for sprite in &self.sprites {
            if let Some(billboard) = project(sprite, camera, bank, cfg) {
                emit(billboard);
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
