use glam::{Vec2, vec2};
use std::f32::consts::TAU;

use crate::defs::Config;
use crate::world::grid::TileGrid;

/// One frame's worth of movement input, sampled by the frontend.
///
/// Axes are -1..1 (keyboard gives ±1, an analog stick anything between):
/// `forward` + = ahead, `strafe` + = right, `turn` + = clockwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputCmd {
    pub forward: f32,
    pub strafe: f32,
    pub turn: f32,
}

/// Viewer pose in world space.
///
/// * Position in grid units; the integer floor of each component is the
///   occupied tile.
/// * Only heading is simulated — no pitch, no eye height.
/// * Invariant: `angle` stays in `[0, 2π)` and the occupied tile is never a
///   wall, provided the camera did not start inside one.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pos: Vec2,
    angle: f32, // radians, 0 = +X, counter-clockwise
}

impl Camera {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle: angle.rem_euclid(TAU),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Tile the camera currently occupies.
    #[inline]
    pub fn map_pos(&self) -> (i32, i32) {
        (self.pos.x.floor() as i32, self.pos.y.floor() as i32)
    }

    /// Unit vector of the viewing direction on the grid plane.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.angle.sin_cos();
        vec2(c, s)
    }

    /// Advance the pose by one frame of input.
    ///
    /// Collision is resolved independently per axis: the X displacement is
    /// accepted only if the destination tile at the current Y is passable,
    /// then Y is tested against the (possibly updated) X.  Pushing
    /// diagonally into a wall therefore slides along it instead of sticking.
    pub fn apply_movement(&mut self, cmd: &InputCmd, grid: &TileGrid, cfg: &Config, dt_ms: f32) {
        let speed = cfg.move_speed * dt_ms;
        let (sin_a, cos_a) = self.angle.sin_cos();

        let dx = (cmd.forward * cos_a - cmd.strafe * sin_a) * speed;
        let dy = (cmd.forward * sin_a + cmd.strafe * cos_a) * speed;

        let nx = self.pos.x + dx;
        if grid.wall_at(nx.floor() as i32, self.pos.y.floor() as i32).is_none() {
            self.pos.x = nx;
        }
        let ny = self.pos.y + dy;
        if grid.wall_at(self.pos.x.floor() as i32, ny.floor() as i32).is_none() {
            self.pos.y = ny;
        }

        self.angle = (self.angle + cmd.turn * cfg.rot_speed * dt_ms).rem_euclid(TAU);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
