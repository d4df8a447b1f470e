//! Grid-based raycasting engine.
//!
//! The library turns a tile grid plus a viewer pose into a depth-sorted list
//! of draw items — textured wall columns and sprite billboards — that a
//! back-end implementing [`renderer::Renderer`] composites far-to-near
//! (painter's algorithm, no Z-buffer).
//!
//! Frame flow:
//!
//! ```text
//! InputCmd ──► world::Camera ──► engine::raycast ──► RayHit[per ray] ─┐
//!                     │                                               ├─► FrameBuilder ─► Renderer
//!                     └────────► engine::sprites ──► Billboard[*] ────┘
//! ```
//!
//! Window creation, input polling, frame pacing and asset decoding live in
//! the frontend binary; the library only ever sees in-memory data.

pub mod defs;
pub mod engine;
pub mod renderer;
pub mod world;
