//! CPU framebuffer and blitter.
//!
//! Everything the game draws ends up in a single RGBA [`Image`] that the host
//! presents once per frame.  The drawing operations live in [`blit`] (clear,
//! rects, sprite blits) and [`font`] (monospace bitmap text).

pub mod blit;
pub mod font;

pub use blit::{BlitFlip, Rect};
pub use font::{MonospaceFont, TextAlign};

// ── Color ──────────────────────────────────────────────────────────────────

/// One RGBA8 pixel.  Field order is the byte order inside every pixel buffer,
/// which is also the layout the GPU texture is created with.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The RGB triple with alpha dropped.
    pub fn rgb_triple(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

// ── Image ──────────────────────────────────────────────────────────────────

/// A width × height grid of RGBA8 pixels stored row-major.
///
/// Used both for loaded assets (sprites, fonts, level maps) and for the
/// framebuffer the game renders into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Image {
    /// A fully transparent image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wrap an existing pixel vector.  Panics when the length does not match
    /// the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count does not match {width}x{height}"
        );
        Self { width, height, pixels }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let w = self.width as usize;
        self.pixels[y as usize * w + x as usize] = color;
    }
}
