use std::collections::HashMap;
use std::path::Path;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{static_sound::{StaticSoundData, StaticSoundSettings, StaticSoundHandle}, PlaybackState},
    tween::Tween,
};

use crate::assets::AudioHandle;

/// One decoded sound and how it plays.
struct Track {
    data: Option<StaticSoundData>,
    looping: bool,
}

/// Sounds addressed by [`AudioHandle`], with play / pause / stop transport.
///
/// Handles are issued by [`AudioContext::reserve`] before the file is read so
/// the game can hold on to them while loading is still in progress.  A handle
/// whose file failed to load stays valid and simply plays nothing.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    tracks: Vec<Track>,
    playing: HashMap<AudioHandle, StaticSoundHandle>,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("failed to initialize audio manager: {e}; audio disabled");
                None
            }
        };
        Self { manager, tracks: Vec::new(), playing: HashMap::new() }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    /// Issue a handle for a sound that will be loaded later.
    pub fn reserve(&mut self, looping: bool) -> AudioHandle {
        self.tracks.push(Track { data: None, looping });
        AudioHandle(self.tracks.len() - 1)
    }

    /// Read the file behind `handle` into memory.
    /// Logs a warning and leaves the handle silent if the file cannot be read.
    pub fn load<P: AsRef<Path>>(&mut self, handle: AudioHandle, path: P) {
        let Some(track) = self.tracks.get_mut(handle.0) else { return; };
        match StaticSoundData::from_file(path.as_ref()) {
            Ok(sound) => track.data = Some(sound),
            Err(e) => log::warn!("failed to load sound '{}': {e}", path.as_ref().display()),
        }
    }

    /// Start `handle` from the beginning, or resume it if paused.  A sound
    /// that is already playing is left alone.
    pub fn play(&mut self, handle: AudioHandle) {
        if let Some(active) = self.playing.get_mut(&handle) {
            match active.state() {
                PlaybackState::Paused | PlaybackState::Pausing => {
                    let _ = active.resume(Tween::default());
                    return;
                }
                PlaybackState::Stopping | PlaybackState::Stopped => {}
                _ => return,
            }
        }

        let Some(manager) = self.manager.as_mut() else { return; };
        let Some(track) = self.tracks.get(handle.0) else { return; };
        let Some(data) = track.data.as_ref() else { return; };

        let settings = if track.looping {
            StaticSoundSettings::new().loop_region(0.0..)
        } else {
            StaticSoundSettings::new()
        };

        match manager.play(data.clone().with_settings(settings)) {
            Ok(active) => {
                self.playing.insert(handle, active);
            }
            Err(e) => log::warn!("failed to play sound {}: {e}", handle.0),
        }
    }

    pub fn pause(&mut self, handle: AudioHandle) {
        if let Some(active) = self.playing.get_mut(&handle) {
            let _ = active.pause(Tween::default());
        }
    }

    /// Stop `handle`; the next [`AudioContext::play`] starts from the top.
    pub fn stop(&mut self, handle: AudioHandle) {
        if let Some(mut active) = self.playing.remove(&handle) {
            let _ = active.stop(Tween::default());
        }
    }

    /// Playback position in milliseconds, `0` when not playing.
    pub fn position_ms(&self, handle: AudioHandle) -> i64 {
        self.playing
            .get(&handle)
            .map_or(0, |active| (active.position() * 1000.0) as i64)
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}
