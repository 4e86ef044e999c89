//! Beat-locked stepping of a [`Level`] and the player on it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::{Level, TICKS_PER_ACTION};

// ── Tick clock ──────────────────────────────────────────────────────────────

/// Fires four times per beat.
///
/// A late poll still fires only once and the next deadline is measured from
/// the previous deadline, not from `now`, so the grid stays in phase with the
/// music even after a slow frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    pub interval_ms: f32,
    pub last_tick_ms: f32,
}

impl TickClock {
    pub fn new(interval_ms: f32) -> Self {
        Self { interval_ms, last_tick_ms: 0.0 }
    }

    /// Clock for a song at `bpm` beats per minute.
    pub fn from_bpm(bpm: f32) -> Self {
        Self::new(60_000.0 / bpm / 4.0)
    }

    pub fn reset(&mut self, now_ms: f32) {
        self.last_tick_ms = now_ms;
    }

    /// Returns `true` when a tick is due at `now_ms`, consuming it.
    pub fn poll(&mut self, now_ms: f32) -> bool {
        let next = self.last_tick_ms + self.interval_ms;
        if now_ms >= next {
            self.last_tick_ms = next;
            true
        } else {
            false
        }
    }
}

/// Monotonic time built from the playback position of a looping track.
///
/// When the position jumps backwards the track has wrapped; the position it
/// had reached is banked so the returned time keeps increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoopedTime {
    offset_ms: f32,
    last_position_ms: f32,
}

impl LoopedTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current playback position and get the unwrapped time.
    pub fn advance(&mut self, position_ms: f32) -> f32 {
        if position_ms < self.last_position_ms {
            self.offset_ms += self.last_position_ms;
        }
        self.last_position_ms = position_ms;
        self.offset_ms + position_ms
    }
}

// ── Player ──────────────────────────────────────────────────────────────────

/// How the player moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// One tile right every beat.
    #[default]
    Beat,
    /// One tile right per press of the advance key.
    Key,
}

/// Edge-triggered presses relevant to the player this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub advance: bool,
}

/// What the player's tile holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    None,
    Death,
    Finish,
}

// ── Simulation ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Simulation {
    pub level: Level,
    pub player: IVec2,
    pub player_ticks: u32,
    pub clock: TickClock,
    pub mode: MovementMode,
}

impl Simulation {
    pub fn new(level: Level, clock: TickClock, mode: MovementMode) -> Self {
        let player = level.player_start;
        Self { level, player, player_ticks: 0, clock, mode }
    }

    /// Hazards win over the finish: standing on both is a death.  With
    /// `god_mode` hazards are ignored but the finish still counts.
    pub fn collision(&self, god_mode: bool) -> Collision {
        let tile = self.player;
        let hazard = self.level.is_wall(tile)
            || self.level.spike_at(tile).is_some_and(|s| s.is_up)
            || self.level.moving_block_at(tile).is_some();

        if hazard && !god_mode {
            Collision::Death
        } else if self.level.finish_at(tile).is_some() {
            Collision::Finish
        } else {
            Collision::None
        }
    }

    /// Run one frame of simulation: tick poll, player, blocks, spikes.
    ///
    /// Returns `true` when the player stepped forward this frame.
    pub fn update(&mut self, now_ms: f32, input: PlayerInput) -> bool {
        if self.clock.poll(now_ms) {
            self.player_ticks += 1;
            self.level.tick();
        }

        let advance = match self.mode {
            MovementMode::Beat => self.player_ticks >= TICKS_PER_ACTION,
            MovementMode::Key => input.advance,
        };
        if advance {
            self.player.x += 1;
            self.player_ticks = 0;
        }
        if input.up {
            self.player.y -= 1;
        }
        if input.down {
            self.player.y += 1;
        }

        self.level.advance_moving_blocks();
        self.level.advance_spikes();

        advance
    }

    /// Rewind the level and player and restart the clock at `now_ms`.
    pub fn restart(&mut self, now_ms: f32) {
        self.level.restart();
        self.player = self.level.player_start;
        self.player_ticks = 0;
        self.clock.reset(now_ms);
    }
}
