mod camera;
mod grid;
mod texture;

pub use camera::{Camera, InputCmd};

pub use grid::{TileGrid, WallId};

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId, WallTextures};
