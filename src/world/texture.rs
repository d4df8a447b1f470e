// Format-agnostic repository of images decoded by the frontend.
// The engine and renderer interact through `TextureId` only.

use std::collections::HashMap;

use crate::world::grid::{TileGrid, WallId};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because [`TextureBank::new`] inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
/// Alpha 0 texels are treated as holes by the billboard blitter.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Single-colour texture, handy for tests and procedural assets.
    pub fn solid(w: usize, h: usize, argb: u32) -> Self {
        Self {
            w,
            h,
            pixels: vec![argb; w * h],
        }
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.w + x]
    }
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: u32 = 0xFF_9A_9A_9A;
        const DARK: u32 = 0xFF_55_55_55;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when wiring textures up.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// The grid references a wall type the texture table does not map.
    #[error("wall id {0} has no texture assigned")]
    UnmappedWall(u8),
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about PNG, file paths or windows — that's the
///   frontend's job.
/// * Stores exactly one copy of every name.
/// * ID **0** is always the "missing" checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Number of textures stored (including the missing one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1 // only the checker
    }

    /// Obtain the id for a loaded texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Fallback-safe borrow: bad ids resolve to the checkerboard.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[0])
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/// Wall type → texture handle table, fixed at startup.
///
/// A grid that references an unmapped wall id is a configuration error and
/// is reported by [`WallTextures::validate`] before the first frame — the
/// per-column hot path then only ever falls back to the checkerboard.
#[derive(Default, Clone)]
pub struct WallTextures {
    map: HashMap<WallId, TextureId>,
}

impl WallTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, wall: WallId, tex: TextureId) {
        self.map.insert(wall, tex);
    }

    /// Handle for a wall type; unmapped ids resolve to the checkerboard.
    #[inline]
    pub fn get(&self, wall: WallId) -> TextureId {
        self.map.get(&wall).copied().unwrap_or(NO_TEXTURE)
    }

    /// Fail fast if the grid uses a wall id with no texture.
    pub fn validate(&self, grid: &TileGrid) -> Result<(), TextureError> {
        for id in grid.wall_ids() {
            if !self.map.contains_key(&id) {
                return Err(TextureError::UnmappedWall(id.get()));
            }
        }
        Ok(())
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
