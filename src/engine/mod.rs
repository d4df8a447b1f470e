mod frame;
mod raycast;
mod sprites;

pub use frame::{FrameBuilder, fog_factor};
pub use raycast::{RayHit, cast_all};
pub use sprites::{Animation, ObjectSet, Sprite, project};
