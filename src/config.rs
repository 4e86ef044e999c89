//! Game configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```json
//! { "canvas_scale": 8.0, "movement": "key", "levels": [ ... ] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{AudioId, ImageId};
use crate::level::MovementMode;
use crate::window::WindowMode;

/// File read when no `--config` path is given.  Its absence is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "squares.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config has no levels")]
    NoLevels,
}

/// Which clock drives the tick scheduler during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// The host's monotonic clock.
    #[default]
    Clock,
    /// Playback position of the current level's song.
    Music,
}

/// One entry of the stage table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Map image decoded into the level.
    pub image: ImageId,
    /// Sprite drawn for wall tiles.
    pub wall: ImageId,
    pub music: AudioId,
    pub bpm: f32,
}

impl LevelConfig {
    pub fn new(image: ImageId, wall: ImageId, music: AudioId, bpm: f32) -> Self {
        Self { image, wall, music, bpm }
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new(ImageId::Level1, ImageId::Wall1, AudioId::Level1Song, 100.0),
        LevelConfig::new(ImageId::Level2, ImageId::Wall2, AudioId::Level2Song, 120.0),
        LevelConfig::new(ImageId::Level3, ImageId::Wall3, AudioId::Level3Song, 140.0),
        LevelConfig::new(ImageId::Level4, ImageId::Wall4, AudioId::Level4Song, 150.0),
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Screen pixels per canvas pixel for the initial window size.
    pub canvas_scale: f32,
    /// Directory every asset path is relative to.
    pub asset_root: String,
    /// JSON file holding persisted progress.
    pub save_path: PathBuf,
    pub window_mode: WindowMode,
    pub movement: MovementMode,
    /// Hazards do not kill.
    pub god_mode: bool,
    /// Play the cowbell whenever the player steps forward.
    pub play_cowbell: bool,
    /// Treat every stage as unlocked.
    pub unlock_all: bool,
    pub time_source: TimeSource,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 64,
            canvas_height: 64,
            canvas_scale: 6.0,
            asset_root: "assets".to_string(),
            save_path: PathBuf::from("squares_save.json"),
            window_mode: WindowMode::Windowed,
            movement: MovementMode::Beat,
            god_mode: false,
            play_cowbell: false,
            unlock_all: false,
            time_source: TimeSource::Clock,
            levels: default_levels(),
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Load `path` when given; otherwise [`DEFAULT_CONFIG_PATH`] if it exists,
    /// else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
