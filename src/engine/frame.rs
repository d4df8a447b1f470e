//! Per-frame draw-list assembly.
//!
//! The builder is an arena in the spirit of the renderer's frame scratch:
//! cleared at `begin`, filled by the wall and sprite passes, sorted once,
//! handed wholesale to the compositor, never patched incrementally or
//! shared across frames.

use crate::defs::Config;
use crate::engine::raycast::RayHit;
use crate::renderer::{Billboard, DrawItem, WallSlice};
use crate::world::WallTextures;

/// Linear fog blend for a wall at `depth`: 0 at or before `fog_start`,
/// 1 at or beyond `fog_end`.
#[inline]
pub fn fog_factor(depth: f32, cfg: &Config) -> f32 {
    ((depth - cfg.fog_start) / (cfg.fog_end - cfg.fog_start)).clamp(0.0, 1.0)
}

#[derive(Default)]
pub struct FrameBuilder {
    items: Vec<DrawItem>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the arena for a new frame, keeping its allocation.
    pub fn begin(&mut self) {
        self.items.clear();
    }

    /// Turn the ray results into wall slices.  Miss slots contribute
    /// nothing — the background shows through at those columns.
    pub fn push_walls(&mut self, hits: &[RayHit], walls: &WallTextures, cfg: &Config) {
        for (ray, hit) in hits.iter().enumerate() {
            let Some(wall) = hit.wall else { continue };
            self.items.push(DrawItem::Wall(WallSlice {
                x: (ray * cfg.scale) as i32,
                w: cfg.scale as i32,
                depth: hit.depth,
                tex: walls.get(wall),
                u: hit.offset,
                height: hit.proj_height,
                fog: fog_factor(hit.depth, cfg),
            }));
        }
    }

    pub fn push_sprite(&mut self, billboard: Billboard) {
        self.items.push(DrawItem::Sprite(billboard));
    }

    /// Sort far-to-near and expose the finished list.  Painter's algorithm:
    /// nearer items are drawn later and overwrite farther ones.
    pub fn sorted(&mut self) -> &[DrawItem] {
        self.items
            .sort_by(|a, b| b.depth().total_cmp(&a.depth()));
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{NO_TEXTURE, WallId};

    fn cfg() -> Config {
        Config::new(640, 400)
            .unwrap()
            .with_fog(4.0, 12.0)
            .unwrap()
    }

    fn hit(depth: f32) -> RayHit {
        RayHit {
            depth,
            proj_height: 100.0,
            wall: WallId::new(1),
            offset: 0.25,
        }
    }

    fn billboard(depth: f32) -> Billboard {
        Billboard {
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 10.0,
            depth,
            tex: NO_TEXTURE,
        }
    }

    #[test]
    fn fog_boundaries() {
        let cfg = cfg();
        assert_eq!(fog_factor(0.5, &cfg), 0.0);
        assert_eq!(fog_factor(4.0, &cfg), 0.0, "at fog start: untouched");
        assert!((fog_factor(8.0, &cfg) - 0.5).abs() < 1e-6, "midpoint");
        assert_eq!(fog_factor(12.0, &cfg), 1.0, "at fog end: fully black");
        assert_eq!(fog_factor(100.0, &cfg), 1.0);
    }

    #[test]
    fn miss_slots_are_skipped() {
        let cfg = cfg();
        let walls = WallTextures::new();
        let hits = vec![hit(2.0), RayHit::MISS, hit(3.0)];

        let mut frame = FrameBuilder::new();
        frame.begin();
        frame.push_walls(&hits, &walls, &cfg);
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn wall_slices_keep_their_ray_column() {
        let cfg = cfg();
        let walls = WallTextures::new();
        let hits = vec![RayHit::MISS, hit(2.0)];

        let mut frame = FrameBuilder::new();
        frame.begin();
        frame.push_walls(&hits, &walls, &cfg);

        // ray 1 stays at column 1·scale even though ray 0 produced nothing
        match frame.sorted()[0] {
            DrawItem::Wall(ref w) => {
                assert_eq!(w.x, cfg.scale as i32);
                assert_eq!(w.w, cfg.scale as i32);
            }
            _ => panic!("expected a wall slice"),
        }
    }

    #[test]
    fn sort_is_far_to_near_across_kinds() {
        let cfg = cfg();
        let walls = WallTextures::new();

        let mut frame = FrameBuilder::new();
        frame.begin();
        frame.push_walls(&[hit(5.0), hit(1.0)], &walls, &cfg);
        frame.push_sprite(billboard(3.0));
        frame.push_sprite(billboard(9.0));

        let depths: Vec<f32> = frame.sorted().iter().map(DrawItem::depth).collect();
        assert_eq!(depths, vec![9.0, 5.0, 3.0, 1.0]);
    }

    #[test]
    fn begin_resets_the_arena() {
        let cfg = cfg();
        let walls = WallTextures::new();

        let mut frame = FrameBuilder::new();
        frame.begin();
        frame.push_walls(&[hit(5.0)], &walls, &cfg);
        assert!(!frame.is_empty());

        frame.begin();
        assert!(frame.is_empty());
    }
}
