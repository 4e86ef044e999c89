//! The environment the game runs inside.
//!
//! The core never talks to a window, a sound card or a disk directly; it asks
//! its [`Host`].  The desktop build implements this in [`crate::engine`], and
//! tests drive the game with an in-memory host.

use crate::assets::{AudioHandle, ImageId};
use crate::video::Image;

pub trait Host {
    // ── Time ────────────────────────────────────────────────────────────
    /// Milliseconds on a monotonic clock.  Drives every timer and the tick
    /// scheduler.
    fn now_ms(&self) -> i64;
    /// Seconds since the Unix epoch; used once to seed the RNG.
    fn unix_time(&self) -> u64;

    // ── Presentation ────────────────────────────────────────────────────
    /// Size the output to a `width × height` canvas shown at `scale`.
    fn resize_canvas(&mut self, width: u32, height: u32, scale: f32);
    /// Show a finished frame.
    fn present(&mut self, framebuffer: &Image);

    // ── Assets ──────────────────────────────────────────────────────────
    /// Begin loading an image.  On completion the host calls
    /// [`crate::game::Game::on_image_loaded`] with `id` and writes the pixels.
    fn load_image(&mut self, path: &str, id: ImageId);
    /// Begin loading a sound and return its handle immediately.
    fn load_audio(&mut self, path: &str) -> AudioHandle;
    /// Number of image and audio requests that have completed.
    fn count_loaded_assets(&self) -> usize;

    // ── Audio transport ─────────────────────────────────────────────────
    fn play(&mut self, audio: AudioHandle);
    fn pause(&mut self, audio: AudioHandle);
    fn stop(&mut self, audio: AudioHandle);
    /// Playback position of `audio` in milliseconds.
    fn audio_time_ms(&self, audio: AudioHandle) -> i64;

    // ── Storage ─────────────────────────────────────────────────────────
    /// Stored value for `key`, `0` when absent.
    fn get_persisted_integer(&self, key: &str) -> i32;
    fn set_persisted_integer(&mut self, key: &str, value: i32);

    // ── Dialogs ─────────────────────────────────────────────────────────
    fn show_alert(&mut self, message: &str);
}
