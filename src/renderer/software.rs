//! ---------------------------------------------------------------------------
//! Classic software (CPU) column blitter
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Relies on the frame builder to feed *far-to-near* [`DrawItem`]s, so no
//!   Z-buffer is needed.
//! * Fog is applied here, to wall columns only: the texel colour is scaled
//!   toward black by the slice's pre-computed fog factor.
//!
//! [`DrawItem`]: crate::renderer::DrawItem
//! ---------------------------------------------------------------------------

use crate::renderer::{Billboard, Renderer, Rgba, WallSlice};
use crate::world::TextureBank;

/// Column-at-a-time rasteriser.
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    /// Background colours: sky above the horizon, floor below.
    pub sky: Rgba,
    pub floor: Rgba,
}

impl Default for Software {
    fn default() -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            sky: 0xFF_28_2F_48,
            floor: 0xFF_30_28_20,
        }
    }
}

/// Scale the RGB channels toward black, keeping the pixel opaque.
#[inline]
fn shade(c: Rgba, factor: f32) -> Rgba {
    if factor >= 1.0 {
        return c;
    }
    let r = ((c >> 16 & 0xFF) as f32 * factor) as u32;
    let g = ((c >> 8 & 0xFF) as f32 * factor) as u32;
    let b = ((c & 0xFF) as f32 * factor) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }

        let horizon = w * (h / 2);
        self.scratch[..horizon].fill(self.sky);
        self.scratch[horizon..].fill(self.floor);
    }

    fn draw_wall(&mut self, slice: &WallSlice, bank: &TextureBank) {
        if slice.height <= 0.0 {
            return;
        }
        let tex = bank.texture_or_missing(slice.tex);

        let tex_x = ((slice.u * tex.w as f32) as usize).min(tex.w - 1);
        let brightness = 1.0 - slice.fog;

        // Projected span, clipped to the screen.  When the column is taller
        // than the screen the v-walk below starts mid-texture — the same
        // middle crop the projection expects.
        let top = self.height as f32 * 0.5 - slice.height * 0.5;
        let y0 = top.max(0.0) as usize;
        let y1 = ((top + slice.height).min(self.height as f32)).max(0.0) as usize;

        let x0 = slice.x.clamp(0, self.width as i32) as usize;
        let x1 = (slice.x + slice.w).clamp(0, self.width as i32) as usize;
        if x0 == x1 {
            return;
        }

        let v_step = tex.h as f32 / slice.height;
        for y in y0..y1 {
            let tex_y = (((y as f32 - top) * v_step) as usize).min(tex.h - 1);
            let colour = shade(tex.texel(tex_x, tex_y), brightness);
            let row = y * self.width;
            self.scratch[row + x0..row + x1].fill(colour);
        }
    }

    fn draw_sprite(&mut self, bb: &Billboard, bank: &TextureBank) {
        if bb.w < 1.0 || bb.h < 1.0 {
            return;
        }
        let tex = bank.texture_or_missing(bb.tex);

        let x0 = bb.x.max(0.0) as usize;
        let x1 = ((bb.x + bb.w).min(self.width as f32)).max(0.0) as usize;
        let y0 = bb.y.max(0.0) as usize;
        let y1 = ((bb.y + bb.h).min(self.height as f32)).max(0.0) as usize;

        for y in y0..y1 {
            let v = (y as f32 - bb.y) / bb.h;
            let tex_y = ((v * tex.h as f32) as usize).min(tex.h - 1);
            let row = y * self.width;
            for x in x0..x1 {
                let u = (x as f32 - bb.x) / bb.w;
                let tex_x = ((u * tex.w as f32) as usize).min(tex.w - 1);
                let texel = tex.texel(tex_x, tex_y);
                // alpha-keyed: fully transparent texels are holes
                if texel >> 24 == 0 {
                    continue;
                }
                self.scratch[row + x] = texel;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawItem, RendererExt};
    use crate::world::Texture;

    const W: usize = 8;
    const H: usize = 8;

    fn bank_with(tex: Texture) -> (TextureBank, u16) {
        let mut bank = TextureBank::default_with_checker();
        let id = bank.insert("T", tex).unwrap();
        (bank, id)
    }

    fn slice(x: i32, tex: u16, height: f32, fog: f32) -> WallSlice {
        WallSlice {
            x,
            w: 1,
            depth: 1.0,
            tex,
            u: 0.0,
            height,
            fog,
        }
    }

    fn grab(sw: &mut Software) -> Vec<Rgba> {
        let mut out = Vec::new();
        sw.end_frame(|fb, _, _| out = fb.to_vec());
        out
    }

    #[test]
    fn background_is_sky_over_floor() {
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        let fb = grab(&mut sw);
        assert_eq!(fb[0], sw.sky);
        assert_eq!(fb[W * (H / 2) - 1], sw.sky);
        assert_eq!(fb[W * (H / 2)], sw.floor);
        assert_eq!(fb[W * H - 1], sw.floor);
    }

    #[test]
    fn wall_column_is_centred_and_textured() {
        let (bank, red) = bank_with(Texture::solid(2, 2, 0xFF_FF0000));
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        sw.draw_wall(&slice(3, red, 4.0, 0.0), &bank);
        let fb = grab(&mut sw);

        // height 4 on an 8-row screen: rows 2..6 in column 3
        for y in 2..6 {
            assert_eq!(fb[y * W + 3], 0xFF_FF0000, "row {y}");
        }
        assert_eq!(fb[1 * W + 3], sw.sky);
        assert_eq!(fb[6 * W + 3], sw.floor);
        // neighbouring column untouched
        assert_eq!(fb[3 * W + 4], sw.sky);
    }

    #[test]
    fn full_fog_blacks_the_column_out() {
        let (bank, red) = bank_with(Texture::solid(2, 2, 0xFF_FF0000));
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        sw.draw_wall(&slice(0, red, 8.0, 1.0), &bank);
        let fb = grab(&mut sw);
        assert_eq!(fb[4 * W], 0xFF_00_00_00);
    }

    #[test]
    fn half_fog_halves_the_channels() {
        let (bank, grey) = bank_with(Texture::solid(2, 2, 0xFF_80_80_80));
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        sw.draw_wall(&slice(0, grey, 8.0, 0.5), &bank);
        let fb = grab(&mut sw);
        assert_eq!(fb[4 * W], 0xFF_40_40_40);
    }

    #[test]
    fn oversized_wall_middle_crops_the_texture() {
        // 4-texel-tall gradient texture, projected to twice the screen:
        // the visible rows must come from the middle of the texture.
        let tex = Texture {
            w: 1,
            h: 4,
            pixels: vec![0xFF_000001, 0xFF_000002, 0xFF_000003, 0xFF_000004],
        };
        let (bank, id) = bank_with(tex);
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        sw.draw_wall(&slice(0, id, 16.0, 0.0), &bank);
        let fb = grab(&mut sw);

        // screen rows 0..8 map to texture rows 1..3 (the middle half)
        assert_eq!(fb[0], 0xFF_000002);
        assert_eq!(fb[7 * W], 0xFF_000003);
    }

    #[test]
    fn sprite_respects_alpha_holes() {
        let tex = Texture {
            w: 2,
            h: 1,
            pixels: vec![0xFF_00FF00, 0x00_000000], // right half transparent
        };
        let (bank, id) = bank_with(tex);
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        sw.draw_sprite(
            &Billboard {
                x: 2.0,
                y: 2.0,
                w: 4.0,
                h: 2.0,
                depth: 3.0,
                tex: id,
            },
            &bank,
        );
        let fb = grab(&mut sw);
        assert_eq!(fb[2 * W + 2], 0xFF_00FF00);
        assert_eq!(fb[2 * W + 5], sw.sky, "transparent texel left a hole");
    }

    #[test]
    fn painter_order_lets_near_sprite_cover_far_wall() {
        let (mut bank, red) = bank_with(Texture::solid(2, 2, 0xFF_FF0000));
        let green = bank.insert("S", Texture::solid(2, 2, 0xFF_00FF00)).unwrap();

        let items = [
            DrawItem::Sprite(Billboard {
                x: 0.0,
                y: 0.0,
                w: W as f32,
                h: H as f32,
                depth: 2.0,
                tex: green,
            }),
            DrawItem::Wall(slice(3, red, 8.0, 0.0)),
        ];
        // items pre-sorted far-to-near: wall at depth 1.0 is nearer
        let mut sw = Software::default();
        let mut fb = Vec::new();
        sw.draw_frame(W, H, &items, &bank, |buf, _, _| fb = buf.to_vec());

        assert_eq!(fb[4 * W + 3], 0xFF_FF0000, "near wall over far sprite");
        assert_eq!(fb[4 * W + 1], 0xFF_00FF00, "sprite elsewhere");
    }
}
