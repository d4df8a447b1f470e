//! walk.rs - interactive raycaster viewer.
//!
//! ```bash
//! cargo run --release -- [--map level.txt] [--width 1280 --height 800]
//! ```
//!
//! WASD moves, ←/→ turn, Shift runs, Esc quits.  Wall and sprite textures
//! are generated procedurally so the demo needs no asset files; pass
//! `--map` to walk your own grid (digits/letters = wall types, `.` = open).

use clap::Parser;
use glam::vec2;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use yaray_rs::{
    defs::Config,
    engine::{FrameBuilder, ObjectSet, Sprite, cast_all},
    renderer::{RendererExt, software::Software},
    world::{Camera, InputCmd, Texture, TextureBank, TextureId, TileGrid, WallTextures},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Text map file; falls back to the built-in level
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: usize,

    #[arg(long, default_value_t = 800)]
    height: usize,
}

const DEFAULT_MAP: &str = "\
1111111111111111
1..............1
1..22...33.....1
1..2.........4.1
1......11....4.1
1..............1
1...4....2222..1
1...4..........1
1..............1
1.33....4...22.1
1..............1
1111111111111111";

const SPAWN: (f32, f32) = (1.5, 1.5);

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let cfg = Config::new(opts.width, opts.height)?.with_fog(6.0, 14.0)?;

    let grid = match &opts.map {
        Some(path) => TileGrid::from_text(&std::fs::read_to_string(path)?),
        None => TileGrid::from_text(DEFAULT_MAP),
    };

    let mut bank = TextureBank::default_with_checker();

    // one tinted brick texture per wall type the map uses
    let mut walls = WallTextures::new();
    for id in grid.wall_ids().collect::<Vec<_>>() {
        let tex = brick_texture(64, tint_for(id.get()));
        let handle = bank.insert(format!("WALL{}", id.get()), tex)?;
        walls.set(id, handle);
    }
    walls.validate(&grid)?;

    let mut objects = ObjectSet::new();
    let pillar = bank.insert("PILLAR", pillar_texture(32, 64))?;
    objects.push(Sprite::fixed(vec2(8.5, 5.5), pillar, 0.7, 0.27));

    let glow: Vec<TextureId> = (0..4)
        .map(|phase| {
            bank.insert(format!("GLOW{phase}"), glow_texture(32, phase))
                .map_err(anyhow::Error::from)
        })
        .collect::<anyhow::Result<_>>()?;
    objects.push(Sprite::animated(vec2(4.5, 8.5), glow, 0.8, 0.15, 120));

    let mut camera = Camera::new(vec2(SPAWN.0, SPAWN.1), 0.0);
    let mut renderer = Software::default();
    let mut frame = FrameBuilder::new();
    let mut hits = Vec::with_capacity(cfg.num_rays);

    let mut win = Window::new(
        "yaray_rs",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let epoch = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt_ms = last_frame.elapsed().as_secs_f32() * 1000.0;
        last_frame = t0;

        /* --------------- one InputCmd per frame -------------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        if win.is_key_down(Key::Left) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn += 1.0;
        }
        let run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        if run {
            cmd.forward *= 2.0;
            cmd.strafe *= 2.0;
        }

        camera.apply_movement(&cmd, &grid, &cfg, dt_ms);

        /* --------------- cast, project, sort, blit ----------------------- */
        cast_all(&camera, &grid, &cfg, &mut hits);

        objects.tick_all(epoch.elapsed().as_millis() as u64);

        frame.begin();
        frame.push_walls(&hits, &walls, &cfg);
        objects.project_each(&camera, &bank, &cfg, |bb| frame.push_sprite(bb));

        renderer.draw_frame(opts.width, opts.height, frame.sorted(), &bank, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h).unwrap()
        });

        // ─────────── report every ~3 s ──────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/*──────────────────────── procedural assets ─────────────────────────*/

fn tint_for(wall: u8) -> (u32, u32, u32) {
    match wall % 4 {
        0 => (0xB0, 0x50, 0x40), // brick red
        1 => (0x80, 0x80, 0x88), // stone grey
        2 => (0x50, 0x70, 0xA8), // steel blue
        _ => (0x70, 0x90, 0x58), // moss green
    }
}

/// Mortar-lined brick pattern in the given tint.
fn brick_texture(size: usize, (r, g, b): (u32, u32, u32)) -> Texture {
    let mut pixels = vec![0u32; size * size];
    let course = size / 4;
    for y in 0..size {
        let shifted = (y / course) % 2 == 1;
        for x in 0..size {
            let bx = (if shifted { x + size / 4 } else { x }) % size;
            let mortar = y % course == 0 || bx % (size / 2) == 0;
            let (r, g, b) = if mortar {
                (r / 3, g / 3, b / 3)
            } else {
                (r, g, b)
            };
            pixels[y * size + x] = 0xFF00_0000 | (r << 16) | (g << 8) | b;
        }
    }
    Texture {
        w: size,
        h: size,
        pixels,
    }
}

/// Narrow column on a transparent background.
fn pillar_texture(w: usize, h: usize) -> Texture {
    let mut pixels = vec![0u32; w * h];
    for y in 0..h {
        for x in w / 3..2 * w / 3 {
            let edge = x == w / 3 || x == 2 * w / 3 - 1;
            pixels[y * w + x] = if edge { 0xFF_60_60_60 } else { 0xFF_A0_A0_98 };
        }
    }
    Texture { w, h, pixels }
}

/// One frame of a pulsing light: a filled diamond whose brightness depends
/// on `phase`.
fn glow_texture(size: usize, phase: usize) -> Texture {
    let mut pixels = vec![0u32; size * size];
    let level = [0x80u32, 0xC0, 0xFF, 0xC0][phase % 4];
    let half = size as i32 / 2;
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            if (x - half).abs() + (y - half).abs() < half {
                pixels[(y * size as i32 + x) as usize] =
                    0xFF00_0000 | (level << 16) | (level << 8) | 0x40;
            }
        }
    }
    Texture {
        w: size,
        h: size,
        pixels,
    }
}
