use super::{BlitFlip, Image, Rect};

/// Horizontal anchoring for [`Image::draw_text`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    /// Centre on `x` using the width of the whole string.  Multi-line text
    /// shares that single offset on every line.
    Center,
}

/// A fixed-width ASCII font stored as one horizontal strip of glyph cells.
///
/// The strip starts at the space character (code 32); glyph `c` lives at
/// x-offset `(c - 32) * char_width`.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceFont<'a> {
    pub image: &'a Image,
    pub char_width: i32,
    pub char_height: i32,
}

impl<'a> MonospaceFont<'a> {
    pub fn new(image: &'a Image, char_width: i32, char_height: i32) -> Self {
        Self { image, char_width, char_height }
    }

    /// Pixel width of `text` laid out on a single line.
    pub fn text_width(&self, text: &str) -> i32 {
        text.len() as i32 * self.char_width
    }
}

impl Image {
    /// Draw `text` byte by byte starting at `(x, y)`.
    pub fn draw_text(&mut self, font: &MonospaceFont<'_>, text: &str, x: i32, y: i32, align: TextAlign) {
        let start_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - font.text_width(text) / 2,
        };

        let mut cursor_x = start_x;
        let mut cursor_y = y;

        for code in text.bytes() {
            if code == b'\n' {
                cursor_x = start_x;
                cursor_y += font.char_height;
                continue;
            }

            let glyph_x = (code as i32 - 32) * font.char_width;
            self.blit(
                font.image,
                cursor_x,
                cursor_y,
                Rect::new(glyph_x, 0, font.char_width, font.char_height),
                BlitFlip::empty(),
            );
            cursor_x += font.char_width;
        }
    }
}
