use super::{Color, Image};

bitflags::bitflags! {
    /// Mirroring applied to the sampled sub-rectangle during a blit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlitFlip: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

/// Source sub-rectangle for [`Image::blit`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A `w × h` rectangle anchored at the origin.
    pub const fn sized(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// `dst * (1 - weight) + src * weight`, truncated.
fn blend_component(dst: u8, src: u8, src_weight: f32) -> u8 {
    (dst as f32 * (1.0 - src_weight) + src as f32 * src_weight) as u8
}

/// Blend `src` over `dst` with coverage `alpha`; the result is always opaque.
#[inline]
fn blend(dst: &mut Color, src: Color, alpha: u8) {
    let weight = alpha as f32 / 255.0;
    dst.r = blend_component(dst.r, src.r, weight);
    dst.g = blend_component(dst.g, src.g, weight);
    dst.b = blend_component(dst.b, src.b, weight);
    dst.a = 255;
}

impl Image {
    fn assert_valid(&self) {
        assert_eq!(
            self.pixels.len(),
            self.width as usize * self.height as usize,
            "image buffer does not match its dimensions"
        );
    }

    /// Fill every pixel with `color` at full opacity.
    pub fn clear(&mut self, color: Color) {
        self.assert_valid();
        self.pixels.fill(Color { a: 255, ..color });
    }

    /// Alpha-blend a solid rectangle over the image.
    ///
    /// The rectangle is clipped to the image bounds; anything that clips to an
    /// empty area is a no-op.  `color.a` is the blend coverage.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.assert_valid();

        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = x.saturating_add(w).min(self.width as i32);
        let y_end = y.saturating_add(h).min(self.height as i32);

        let stride = self.width as usize;
        for py in y_start..y_end {
            let row = py as usize * stride;
            for px in x_start..x_end {
                blend(&mut self.pixels[row + px as usize], color, color.a);
            }
        }
    }

    /// Copy `src_rect` of `src` to `(dest_x, dest_y)`, blending each source
    /// pixel by its own alpha.
    ///
    /// `flip` mirrors the sampling coordinates inside `src_rect`, not inside
    /// the whole source image.  Destination pixels outside this image are
    /// skipped, as are samples that fall outside `src`.
    pub fn blit(&mut self, src: &Image, dest_x: i32, dest_y: i32, src_rect: Rect, flip: BlitFlip) {
        self.assert_valid();
        src.assert_valid();

        let dest_w = self.width as i32;
        let dest_h = self.height as i32;
        let src_w = src.width as i32;
        let src_h = src.height as i32;

        for y in 0..src_rect.h {
            let fb_y = dest_y + y;
            if fb_y < 0 || fb_y >= dest_h {
                continue;
            }
            let img_y = if flip.contains(BlitFlip::VERTICAL) { src_rect.h - 1 - y } else { y } + src_rect.y;
            if img_y < 0 || img_y >= src_h {
                continue;
            }

            for x in 0..src_rect.w {
                let fb_x = dest_x + x;
                if fb_x < 0 || fb_x >= dest_w {
                    continue;
                }
                let img_x = if flip.contains(BlitFlip::HORIZONTAL) { src_rect.w - 1 - x } else { x } + src_rect.x;
                if img_x < 0 || img_x >= src_w {
                    continue;
                }

                let sample = src.pixels[(img_y * src_w + img_x) as usize];
                blend(&mut self.pixels[(fb_y * dest_w + fb_x) as usize], sample, sample.a);
            }
        }
    }
}
