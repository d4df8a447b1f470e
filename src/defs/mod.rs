//! Engine configuration.
//!
//! Everything the caster, projector and compositor need to agree on — screen
//! geometry, field of view, traversal limits, fog band, movement speeds —
//! lives in one immutable [`Config`] built at startup.  Components borrow
//! it; nothing reads ambient globals.

use std::f32::consts::PI;

/// Invalid startup geometry.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("ray count {rays} must be non-zero and divide screen width {width}")]
    BadRayCount { rays: usize, width: usize },

    #[error("field of view {0} rad outside (0, π)")]
    BadFov(f32),

    #[error("fog band empty: start {start} ≥ end {end}")]
    BadFogBand { start: f32, end: f32 },
}

/// Constants that depend on the viewport and tuning, not on the map.
///
/// The `screen_dist`/`delta_angle`/`scale` trio is pre-derived once so the
/// per-ray loop never touches a `tan`.  Geometry fields are fixed at
/// construction; the tuning fields (`speeds`, fog band) may be adjusted
/// before the first frame.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub fov: f32,       // horizontal, radians
    pub num_rays: usize,
    pub max_depth: usize, // gridline steps per scan before giving up

    /* tuning */
    pub fog_start: f32, // map units; closer walls get no fog
    pub fog_end: f32,   // fully black at and beyond this depth
    pub move_speed: f32, // map units per millisecond
    pub rot_speed: f32,  // radians per millisecond
    pub sprite_min_dist: f32, // billboards at or inside this depth are culled

    /* pre-derived for speed */
    pub half_width: f32,
    pub half_height: f32,
    pub half_fov: f32,
    pub delta_angle: f32,   // angular step between neighbouring rays
    pub half_num_rays: f32,
    pub screen_dist: f32,   // focal length: half_width / tan(half_fov)
    pub scale: usize,       // pixel width of one ray column
}

impl Config {
    /// Canonical profile: 60° FOV, one ray per two pixel columns.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_geometry(width, height, PI / 3.0, width / 2)
    }

    pub fn with_geometry(
        width: usize,
        height: usize,
        fov: f32,
        num_rays: usize,
    ) -> Result<Self, ConfigError> {
        if num_rays == 0 || width % num_rays != 0 {
            return Err(ConfigError::BadRayCount {
                rays: num_rays,
                width,
            });
        }
        if !(fov > 0.0 && fov < PI) {
            return Err(ConfigError::BadFov(fov));
        }

        let half_width = width as f32 * 0.5;
        let half_fov = fov * 0.5;

        Ok(Self {
            width,
            height,
            fov,
            num_rays,
            max_depth: 20,
            fog_start: 6.0,
            fog_end: 14.0,
            move_speed: 0.004,
            rot_speed: 0.002,
            sprite_min_dist: 1.0,
            half_width,
            half_height: height as f32 * 0.5,
            half_fov,
            delta_angle: fov / num_rays as f32,
            half_num_rays: num_rays as f32 * 0.5,
            screen_dist: half_width / half_fov.tan(),
            scale: width / num_rays,
        })
    }

    /// Replace the fog band, keeping the `start < end` invariant.
    pub fn with_fog(mut self, start: f32, end: f32) -> Result<Self, ConfigError> {
        if start >= end {
            return Err(ConfigError::BadFogBand { start, end });
        }
        self.fog_start = start;
        self.fog_end = end;
        Ok(self)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn screen_dist_at_90_deg() {
        // tan(45°) = 1 → focal length equals half the width
        let cfg = Config::with_geometry(640, 400, FRAC_PI_2, 320).unwrap();
        assert!((cfg.screen_dist - 320.0).abs() < 1e-3);
        assert_eq!(cfg.scale, 2);
        assert!((cfg.delta_angle * cfg.num_rays as f32 - cfg.fov).abs() < 1e-5);
    }

    #[test]
    fn ray_count_must_divide_width() {
        let err = Config::with_geometry(640, 400, FRAC_PI_2, 7).unwrap_err();
        assert_eq!(err, ConfigError::BadRayCount { rays: 7, width: 640 });
        assert!(Config::with_geometry(640, 400, FRAC_PI_2, 0).is_err());
    }

    #[test]
    fn fov_range_checked() {
        assert!(Config::with_geometry(640, 400, 0.0, 320).is_err());
        assert!(Config::with_geometry(640, 400, PI, 320).is_err());
    }

    #[test]
    fn fog_band_checked() {
        let cfg = Config::new(640, 400).unwrap();
        assert!(cfg.with_fog(10.0, 10.0).is_err());
        let cfg = cfg.with_fog(2.0, 8.0).unwrap();
        assert_eq!((cfg.fog_start, cfg.fog_end), (2.0, 8.0));
    }
}
