//! Tile-grid level state.
//!
//! A [`Level`] is produced by [`decode::decode`] from a map image and then
//! mutated in place by [`sim::Simulation`] while the stage is played.

pub mod decode;
pub mod sim;

use glam::IVec2;

pub use decode::{decode, LevelError};
pub use sim::{Collision, LoopedTime, MovementMode, PlayerInput, Simulation, TickClock};

/// Side length of a tile in screen pixels.
pub const TILE_SIZE: i32 = 8;

pub const MAX_WIDTH: u32 = 1024;
pub const MAX_HEIGHT: u32 = 64;
pub const MAX_FINISH: usize = 32;
pub const MAX_SPIKES: usize = 512;
pub const MAX_BLOCKS: usize = 512;

/// Ticks an entity must accumulate before it acts.
pub const TICKS_PER_ACTION: u32 = 4;

// ── BoundedVec ──────────────────────────────────────────────────────────────

/// A `Vec` that refuses to grow past `N` elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedVec<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> BoundedVec<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `item`, handing it back when the sequence is already full.
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.items.len() >= N {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= N
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T, const N: usize> Default for BoundedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> std::ops::Index<usize> for BoundedVec<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedVec<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── Entities ────────────────────────────────────────────────────────────────

/// A tile position plus the number of ticks since the entity last acted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    pub tile: IVec2,
    pub ticks: u32,
}

impl Entity {
    pub fn at(tile: IVec2) -> Self {
        Self { tile, ticks: 0 }
    }
}

/// A spike trap that flips between up (lethal) and down every beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spike {
    pub entity: Entity,
    pub starts_up: bool,
    pub is_up: bool,
}

/// A lethal block that patrols vertically, bouncing off walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingBlock {
    pub entity: Entity,
    pub start_tile: IVec2,
    /// −1 (up) or +1 (down).
    pub start_dir: i32,
    pub dir: i32,
}

// ── Level ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub width: u32,
    pub height: u32,
    /// Row-major, one entry per tile.
    pub walls: Vec<bool>,
    pub player_start: IVec2,
    pub finish: BoundedVec<Entity, MAX_FINISH>,
    pub spikes: BoundedVec<Spike, MAX_SPIKES>,
    pub moving_blocks: BoundedVec<MovingBlock, MAX_BLOCKS>,
}

impl Level {
    /// An empty `width × height` level with no walls or entities.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: vec![false; width as usize * height as usize],
            player_start: IVec2::ZERO,
            finish: BoundedVec::new(),
            spikes: BoundedVec::new(),
            moving_blocks: BoundedVec::new(),
        }
    }

    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    fn index(&self, tile: IVec2) -> usize {
        tile.y as usize * self.width as usize + tile.x as usize
    }

    /// Whether `tile` blocks movement.  Everything outside the grid is solid.
    pub fn is_wall(&self, tile: IVec2) -> bool {
        if !self.in_bounds(tile) {
            return true;
        }
        self.walls[self.index(tile)]
    }

    pub fn set_wall(&mut self, tile: IVec2, wall: bool) {
        if self.in_bounds(tile) {
            let i = self.index(tile);
            self.walls[i] = wall;
        }
    }

    pub fn spike_at(&self, tile: IVec2) -> Option<&Spike> {
        self.spikes.iter().find(|s| s.entity.tile == tile)
    }

    pub fn moving_block_at(&self, tile: IVec2) -> Option<&MovingBlock> {
        self.moving_blocks.iter().find(|b| b.entity.tile == tile)
    }

    pub fn finish_at(&self, tile: IVec2) -> Option<&Entity> {
        self.finish.iter().find(|f| f.tile == tile)
    }

    /// Add one tick to every entity counter.
    pub fn tick(&mut self) {
        for f in self.finish.iter_mut() {
            f.ticks += 1;
        }
        for s in self.spikes.iter_mut() {
            s.entity.ticks += 1;
        }
        for b in self.moving_blocks.iter_mut() {
            b.entity.ticks += 1;
        }
    }

    /// Step every moving block that has banked a full beat.
    ///
    /// A block first turns around when the tile ahead is solid, then steps if
    /// the tile in its (possibly new) direction is free.  Walled in on both
    /// sides it just keeps turning.
    pub fn advance_moving_blocks(&mut self) {
        let mut blocks = std::mem::take(&mut self.moving_blocks);
        for block in blocks.iter_mut() {
            if block.entity.ticks < TICKS_PER_ACTION {
                continue;
            }
            block.entity.ticks -= TICKS_PER_ACTION;

            let ahead = block.entity.tile + IVec2::new(0, block.dir);
            if self.is_wall(ahead) {
                block.dir = -block.dir;
            }
            let next = block.entity.tile + IVec2::new(0, block.dir);
            if !self.is_wall(next) {
                block.entity.tile = next;
            }
        }
        self.moving_blocks = blocks;
    }

    /// Toggle every spike that has banked a full beat.
    pub fn advance_spikes(&mut self) {
        for spike in self.spikes.iter_mut() {
            if spike.entity.ticks >= TICKS_PER_ACTION {
                spike.is_up = !spike.is_up;
                spike.entity.ticks = 0;
            }
        }
    }

    /// Put every entity back into its decoded state.
    pub fn restart(&mut self) {
        for f in self.finish.iter_mut() {
            f.ticks = 0;
        }
        for s in self.spikes.iter_mut() {
            s.entity.ticks = 0;
            s.is_up = s.starts_up;
        }
        for b in self.moving_blocks.iter_mut() {
            b.entity.ticks = 0;
            b.entity.tile = b.start_tile;
            b.dir = b.start_dir;
        }
    }
}
