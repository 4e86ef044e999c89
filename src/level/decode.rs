//! Map image → [`Level`].
//!
//! Each pixel is one tile; its exact RGB value (alpha ignored) says what the
//! tile holds.

use glam::IVec2;
use rand::Rng;
use thiserror::Error;

use super::{Entity, Level, MovingBlock, Spike, MAX_HEIGHT, MAX_WIDTH};
use crate::video::Image;

// ── Palette ─────────────────────────────────────────────────────────────────

pub const EMPTY: [u8; 3] = [0, 0, 0];
pub const WALL: [u8; 3] = [255, 255, 255];
pub const PLAYER_START: [u8; 3] = [34, 177, 76];
pub const FINISH: [u8; 3] = [36, 123, 21];
pub const BLOCK_UP: [u8; 3] = [255, 218, 91];
pub const BLOCK_DOWN: [u8; 3] = [138, 107, 0];
pub const BLOCK_RANDOM: [u8; 3] = [255, 201, 14];
pub const SPIKE_DOWN: [u8; 3] = [127, 127, 127];
pub const SPIKE_UP: [u8; 3] = [195, 195, 195];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level {level} is {width}x{height} tiles, the maximum is {max_w}x{max_h}", max_w = MAX_WIDTH, max_h = MAX_HEIGHT)]
    TooLarge { level: usize, width: u32, height: u32 },

    #[error("level {level} has an unknown color {rgb:?} at ({x}, {y})")]
    InvalidPixel { level: usize, x: i32, y: i32, rgb: [u8; 3] },

    #[error("level {level} has more than {capacity} {kind} (at ({x}, {y}))")]
    TooManyEntities { level: usize, kind: &'static str, capacity: usize, x: i32, y: i32 },
}

/// Build a level from its map image.
///
/// `level_id` only labels errors.  Blocks with a random starting direction
/// draw once from `rng` each, in scan order.
pub fn decode<R: Rng>(image: &Image, level_id: usize, rng: &mut R) -> Result<Level, LevelError> {
    if image.width > MAX_WIDTH || image.height > MAX_HEIGHT {
        return Err(LevelError::TooLarge {
            level: level_id,
            width: image.width,
            height: image.height,
        });
    }

    let mut level = Level::empty(image.width, image.height);

    for y in 0..image.height as i32 {
        for x in 0..image.width as i32 {
            let tile = IVec2::new(x, y);
            let rgb = image.pixels[(y * image.width as i32 + x) as usize].rgb_triple();

            let full = |kind: &'static str, capacity: usize| LevelError::TooManyEntities {
                level: level_id,
                kind,
                capacity,
                x,
                y,
            };

            match rgb {
                EMPTY => {}
                WALL => level.set_wall(tile, true),
                PLAYER_START => level.player_start = tile,
                FINISH => level
                    .finish
                    .push(Entity::at(tile))
                    .map_err(|_| full("finish tiles", super::MAX_FINISH))?,
                BLOCK_UP | BLOCK_DOWN | BLOCK_RANDOM => {
                    let dir = match rgb {
                        BLOCK_UP => -1,
                        BLOCK_DOWN => 1,
                        _ => {
                            if rng.gen_bool(0.5) { 1 } else { -1 }
                        }
                    };
                    level
                        .moving_blocks
                        .push(MovingBlock { entity: Entity::at(tile), start_tile: tile, start_dir: dir, dir })
                        .map_err(|_| full("moving blocks", super::MAX_BLOCKS))?;
                }
                SPIKE_DOWN | SPIKE_UP => {
                    let up = rgb == SPIKE_UP;
                    level
                        .spikes
                        .push(Spike { entity: Entity::at(tile), starts_up: up, is_up: up })
                        .map_err(|_| full("spikes", super::MAX_SPIKES))?;
                }
                _ => {
                    return Err(LevelError::InvalidPixel { level: level_id, x, y, rgb });
                }
            }
        }
    }

    log::debug!(
        "decoded level {level_id}: {}x{}, {} finish, {} spikes, {} blocks",
        level.width,
        level.height,
        level.finish.len(),
        level.spikes.len(),
        level.moving_blocks.len()
    );

    Ok(level)
}
