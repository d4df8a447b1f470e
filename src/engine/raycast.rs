//! The ray caster.
//!
//! For every screen column-group one ray is marched through the tile grid
//! along *horizontal* and *vertical* gridlines separately; the globally
//! nearer crossing wins.  Gridline stepping visits exactly the crossings the
//! ray can hit, so each scan is `O(max_depth)` regardless of cell size.

use crate::defs::Config;
use crate::world::{Camera, TileGrid, WallId};

/// Keeps the projection division finite when the viewer hugs a wall.
const DEPTH_EPS: f32 = 1e-4;

/// Nudges the first ray off exact axis alignment, like the classic engines.
const ANGLE_BIAS: f32 = 1e-4;

/// Result of casting one ray.
///
/// `depth` is the **perpendicular** (fisheye-corrected) distance; a miss is
/// `depth = ∞, wall = None` and still occupies its slot so the view never
/// compresses.  Rebuilt from scratch every frame, never persisted.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub depth: f32,
    /// On-screen pixel height of a full wall column at this depth.
    pub proj_height: f32,
    pub wall: Option<WallId>,
    /// Fractional texture column in `[0, 1)` along the struck face.
    pub offset: f32,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        depth: f32::INFINITY,
        proj_height: 0.0,
        wall: None,
        offset: 0.0,
    };
}

/// Direction-preserving guard against exactly axis-aligned rays: a zero
/// sine/cosine becomes a signed near-zero so the gridline step keeps its
/// direction instead of dividing by zero.
#[inline]
fn non_zero(t: f32) -> f32 {
    if t.abs() < 1e-6 { 1e-6f32.copysign(t) } else { t }
}

/// Cast `cfg.num_rays` rays spanning the field of view and fill `out` with
/// one [`RayHit`] per ray (index 0 = leftmost).  `out` is cleared first so a
/// caller can reuse one allocation across frames.
pub fn cast_all(camera: &Camera, grid: &TileGrid, cfg: &Config, out: &mut Vec<RayHit>) {
    out.clear();
    out.reserve(cfg.num_rays);

    let origin = camera.pos();
    let (x_map, y_map) = camera.map_pos();

    let mut ray_angle = camera.angle() - cfg.half_fov + ANGLE_BIAS;
    for _ in 0..cfg.num_rays {
        let sin_a = non_zero(ray_angle.sin());
        let cos_a = non_zero(ray_angle.cos());

        /* ---- horizontal gridlines --------------------------------- */
        let (mut y_hor, dy) = if sin_a > 0.0 {
            (y_map as f32 + 1.0, 1.0)
        } else {
            (y_map as f32 - 1e-6, -1.0)
        };
        let mut depth_hor = (y_hor - origin.y) / sin_a;
        let mut x_hor = origin.x + depth_hor * cos_a;
        let delta_depth = dy / sin_a;
        let dx = delta_depth * cos_a;

        let mut wall_hor = None;
        for _ in 0..cfg.max_depth {
            if let Some(id) = grid.wall_at(x_hor.floor() as i32, y_hor.floor() as i32) {
                wall_hor = Some(id);
                break;
            }
            x_hor += dx;
            y_hor += dy;
            depth_hor += delta_depth;
        }
        if wall_hor.is_none() {
            depth_hor = f32::INFINITY;
        }

        /* ---- vertical gridlines ----------------------------------- */
        let (mut x_vert, dx) = if cos_a > 0.0 {
            (x_map as f32 + 1.0, 1.0)
        } else {
            (x_map as f32 - 1e-6, -1.0)
        };
        let mut depth_vert = (x_vert - origin.x) / cos_a;
        let mut y_vert = origin.y + depth_vert * sin_a;
        let delta_depth = dx / cos_a;
        let dy = delta_depth * sin_a;

        let mut wall_vert = None;
        for _ in 0..cfg.max_depth {
            if let Some(id) = grid.wall_at(x_vert.floor() as i32, y_vert.floor() as i32) {
                wall_vert = Some(id);
                break;
            }
            x_vert += dx;
            y_vert += dy;
            depth_vert += delta_depth;
        }
        if wall_vert.is_none() {
            depth_vert = f32::INFINITY;
        }

        /* ---- nearer crossing wins; orient the texture offset ------ */
        let (depth, wall, offset) = if depth_vert < depth_hor {
            let y = y_vert.rem_euclid(1.0);
            let offset = if cos_a > 0.0 { y } else { 1.0 - y };
            (depth_vert, wall_vert, offset)
        } else {
            let x = x_hor.rem_euclid(1.0);
            let offset = if sin_a > 0.0 { 1.0 - x } else { x };
            (depth_hor, wall_hor, offset)
        };

        let Some(wall) = wall else {
            // keep the slot so column i still maps to ray i
            out.push(RayHit::MISS);
            ray_angle += cfg.delta_angle;
            continue;
        };

        // remove the fishbowl: project onto the view direction
        let depth = depth * (camera.angle() - ray_angle).cos();
        let proj_height = cfg.screen_dist / (depth + DEPTH_EPS);

        out.push(RayHit {
            depth,
            proj_height,
            wall: Some(wall),
            offset: offset.rem_euclid(1.0),
        });

        ray_angle += cfg.delta_angle;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
