// Writes placeholder art into assets/ so a fresh checkout runs.  Files that
// already exist are never touched, so real art simply replaces these.
//
// Sounds are not generated; the game runs silently without them.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

// ── Level palette ───────────────────────────────────────────────────────────

const EMPTY: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WALL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const START: Rgba<u8> = Rgba([34, 177, 76, 255]);
const FINISH: Rgba<u8> = Rgba([36, 123, 21, 255]);
const BLOCK_UP: Rgba<u8> = Rgba([255, 218, 91, 255]);
const BLOCK_DOWN: Rgba<u8> = Rgba([138, 107, 0, 255]);
const BLOCK_RANDOM: Rgba<u8> = Rgba([255, 201, 14, 255]);
const SPIKE_DOWN: Rgba<u8> = Rgba([127, 127, 127, 255]);
const SPIKE_UP: Rgba<u8> = Rgba([195, 195, 195, 255]);

// ── 5×7 glyphs in 6×8 cells ─────────────────────────────────────────────────

/// Row bitmaps, bit 4 is the leftmost column.  Lowercase letters reuse the
/// uppercase shapes.
fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        _ => [0; 7],
    }
}

fn put_glyph(img: &mut RgbaImage, c: char, x0: u32, y0: u32, color: Rgba<u8>) {
    for (row, bits) in glyph(c).iter().enumerate() {
        for col in 0..5u32 {
            if bits & (0x10 >> col) != 0 {
                let (x, y) = (x0 + col, y0 + row as u32);
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }
}

/// Printable ASCII (32..=126) in one row of 6×8 cells.
fn draw_font() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(95 * 6, 8, CLEAR);
    for code in 32u8..=126 {
        let cell = (code - 32) as u32;
        put_glyph(&mut img, code as char, cell * 6, 0, Rgba([255, 255, 255, 255]));
    }
    img
}

// ── Sprites ─────────────────────────────────────────────────────────────────

fn draw_bordered_rect(width: u32, height: u32, fill: [u8; 4], border: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let on_border = x == 0 || x == width - 1 || y == 0 || y == height - 1;
        Rgba(if on_border { border } else { fill })
    })
}

fn draw_wall(mortar: [u8; 4], stone: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        let offset_x = if (y / 4) % 2 == 0 { 0 } else { 4 };
        let is_mortar = y % 4 == 0 || (x + offset_x) % 8 == 0;
        Rgba(if is_mortar { mortar } else { stone })
    })
}

fn draw_player() -> RgbaImage {
    let mut img = draw_bordered_rect(8, 8, [0xF5, 0xD0, 0x30, 0xFF], [0x80, 0x60, 0x00, 0xFF]);
    img.put_pixel(2, 3, Rgba([0x10, 0x10, 0x10, 0xFF]));
    img.put_pixel(5, 3, Rgba([0x10, 0x10, 0x10, 0xFF]));
    img
}

fn draw_finish() -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        if (x / 2 + y / 2) % 2 == 0 {
            Rgba([0xFF, 0xFF, 0xFF, 0xFF])
        } else {
            Rgba([0x20, 0x20, 0x20, 0xFF])
        }
    })
}

fn draw_spikes(up: bool) -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        let base = y >= 6;
        // Two teeth, 4 px wide each.
        let tooth_x = (x % 4) as i32;
        let height = if up { 5 } else { 1 };
        let tip = 6 - height;
        let in_tooth = (y as i32) >= tip + (tooth_x - 1).abs().min((tooth_x - 2).abs());
        if base || (in_tooth && y < 6) {
            Rgba(if up { [0xE0, 0xE0, 0xE8, 0xFF] } else { [0x70, 0x70, 0x78, 0xFF] })
        } else {
            CLEAR
        }
    })
}

fn draw_moving_block() -> RgbaImage {
    let mut img = draw_bordered_rect(8, 8, [0xCC, 0x22, 0x22, 0xFF], [0x55, 0x00, 0x00, 0xFF]);
    for i in 2..6 {
        img.put_pixel(i, i, Rgba([0xFF, 0xAA, 0x00, 0xFF]));
        img.put_pixel(7 - i, i, Rgba([0xFF, 0xAA, 0x00, 0xFF]));
    }
    img
}

/// Checkerboard with a 24 px period so the diagonal scroll wraps seamlessly.
fn draw_menu_bg() -> RgbaImage {
    RgbaImage::from_fn(88, 88, |x, y| {
        if (x / 12 + y / 12) % 2 == 0 {
            Rgba([0x18, 0x30, 0x48, 0xFF])
        } else {
            Rgba([0x10, 0x20, 0x30, 0xFF])
        }
    })
}

fn draw_hog() -> RgbaImage {
    RgbaImage::from_fn(20, 20, |x, y| {
        let (dx, dy) = (x as i32 - 10, y as i32 - 11);
        if dx * dx + dy * dy <= 64 {
            Rgba([0xF0, 0x9C, 0xB0, 0xFF])
        } else {
            CLEAR
        }
    })
}

fn draw_logo() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(30, 7, CLEAR);
    for (i, c) in "YYAM".chars().enumerate() {
        put_glyph(&mut img, c, 3 + i as u32 * 6, 0, Rgba([0xF0, 0xC0, 0x40, 0xFF]));
    }
    img
}

// ── Levels ──────────────────────────────────────────────────────────────────

/// An 8-tile-high corridor: walls top and bottom, the player on the left, a
/// finish column on the right and `stage`-dependent obstacles in between.
fn draw_level(stage: u32) -> RgbaImage {
    let width = 40 + stage * 16;
    let height = 8;
    let mut img = RgbaImage::from_pixel(width, height, EMPTY);

    for x in 0..width {
        img.put_pixel(x, 0, WALL);
        img.put_pixel(x, height - 1, WALL);
    }
    img.put_pixel(2, 4, START);
    for y in 1..height - 1 {
        img.put_pixel(width - 3, y, FINISH);
    }

    let mut x = 10;
    let mut obstacle = 0;
    while x < width - 6 {
        let gap = 1 + (obstacle * 3 + stage) % 6;
        match (obstacle + stage) % 4 {
            0 => {
                for y in 1..height - 1 {
                    if y != gap {
                        img.put_pixel(x, y, WALL);
                    }
                }
            }
            1 => {
                for y in 1..height - 1 {
                    img.put_pixel(x, y, if y % 2 == 0 { SPIKE_DOWN } else { SPIKE_UP });
                }
            }
            2 => img.put_pixel(x, 1, BLOCK_DOWN),
            _ => {
                img.put_pixel(x, height - 2, BLOCK_UP);
                if stage >= 3 {
                    img.put_pixel(x + 2, 3, BLOCK_RANDOM);
                }
            }
        }
        x += 8;
        obstacle += 1;
    }
    img
}

/// One of every tile kind.
fn draw_test_level() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(16, 8, EMPTY);
    for x in 0..16 {
        img.put_pixel(x, 0, WALL);
        img.put_pixel(x, 7, WALL);
    }
    img.put_pixel(1, 4, START);
    img.put_pixel(4, 4, SPIKE_DOWN);
    img.put_pixel(6, 3, SPIKE_UP);
    img.put_pixel(8, 1, BLOCK_DOWN);
    img.put_pixel(10, 6, BLOCK_UP);
    img.put_pixel(12, 3, BLOCK_RANDOM);
    img.put_pixel(14, 4, FINISH);
    img
}

fn save_if_missing(path: &Path, img: RgbaImage) {
    if !path.exists() {
        img.save(path)
            .unwrap_or_else(|e| eprintln!("build: could not save {}: {e}", path.display()));
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=assets");

    let root = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let dir = PathBuf::from(root).join("assets");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("build: could not create {}: {e}", dir.display());
        return;
    }

    save_if_missing(&dir.join("font_6x8.png"), draw_font());
    save_if_missing(&dir.join("test_level.png"), draw_test_level());
    save_if_missing(&dir.join("menu_bg.png"), draw_menu_bg());
    for stage in 1..=4 {
        save_if_missing(&dir.join(format!("level_{stage}.png")), draw_level(stage));
    }
    let walls = [
        ([0x4A, 0x48, 0x45, 0xFF], [0x82, 0x74, 0x66, 0xFF]),
        ([0x20, 0x38, 0x50, 0xFF], [0x40, 0x70, 0xA0, 0xFF]),
        ([0x30, 0x48, 0x20, 0xFF], [0x60, 0x90, 0x40, 0xFF]),
        ([0x50, 0x20, 0x40, 0xFF], [0xA0, 0x40, 0x80, 0xFF]),
    ];
    for (i, (mortar, stone)) in walls.into_iter().enumerate() {
        save_if_missing(&dir.join(format!("wall_{}.png", i + 1)), draw_wall(mortar, stone));
    }
    save_if_missing(&dir.join("player.png"), draw_player());
    save_if_missing(&dir.join("finish.png"), draw_finish());
    save_if_missing(&dir.join("moving_block.png"), draw_moving_block());
    save_if_missing(&dir.join("spikes_down.png"), draw_spikes(false));
    save_if_missing(&dir.join("spikes_up.png"), draw_spikes(true));
    save_if_missing(&dir.join("hog.png"), draw_hog());
    save_if_missing(&dir.join("yyam.png"), draw_logo());
}
