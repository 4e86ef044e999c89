use serde::{Deserialize, Serialize};

use crate::video::Image;

// ── Ids ─────────────────────────────────────────────────────────────────────

/// Every image the game loads.  The discriminant is the slot index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageId {
    FontSmall,
    TestLevel,
    MenuBg,
    Level1,
    Level2,
    Level3,
    Level4,
    Wall1,
    Wall2,
    Wall3,
    Wall4,
    Player,
    Finish,
    MovingBlock,
    SpikesDown,
    SpikesUp,
    Hog,
    Yyam,
}

impl ImageId {
    pub const COUNT: usize = 18;

    pub const ALL: [ImageId; Self::COUNT] = [
        ImageId::FontSmall,
        ImageId::TestLevel,
        ImageId::MenuBg,
        ImageId::Level1,
        ImageId::Level2,
        ImageId::Level3,
        ImageId::Level4,
        ImageId::Wall1,
        ImageId::Wall2,
        ImageId::Wall3,
        ImageId::Wall4,
        ImageId::Player,
        ImageId::Finish,
        ImageId::MovingBlock,
        ImageId::SpikesDown,
        ImageId::SpikesUp,
        ImageId::Hog,
        ImageId::Yyam,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ImageId::FontSmall => "font_6x8.png",
            ImageId::TestLevel => "test_level.png",
            ImageId::MenuBg => "menu_bg.png",
            ImageId::Level1 => "level_1.png",
            ImageId::Level2 => "level_2.png",
            ImageId::Level3 => "level_3.png",
            ImageId::Level4 => "level_4.png",
            ImageId::Wall1 => "wall_1.png",
            ImageId::Wall2 => "wall_2.png",
            ImageId::Wall3 => "wall_3.png",
            ImageId::Wall4 => "wall_4.png",
            ImageId::Player => "player.png",
            ImageId::Finish => "finish.png",
            ImageId::MovingBlock => "moving_block.png",
            ImageId::SpikesDown => "spikes_down.png",
            ImageId::SpikesUp => "spikes_up.png",
            ImageId::Hog => "hog.png",
            ImageId::Yyam => "yyam.png",
        }
    }
}

/// Every sound the game loads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioId {
    TitleSong,
    Level1Song,
    Level2Song,
    Level3Song,
    Level4Song,
    Cowbell,
    Splash,
    Fail,
}

impl AudioId {
    pub const COUNT: usize = 8;

    pub const ALL: [AudioId; Self::COUNT] = [
        AudioId::TitleSong,
        AudioId::Level1Song,
        AudioId::Level2Song,
        AudioId::Level3Song,
        AudioId::Level4Song,
        AudioId::Cowbell,
        AudioId::Splash,
        AudioId::Fail,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn file_name(self) -> &'static str {
        match self {
            AudioId::TitleSong => "title.ogg",
            AudioId::Level1Song => "level_1_song.ogg",
            AudioId::Level2Song => "level_2_song.ogg",
            AudioId::Level3Song => "level_3_song.ogg",
            AudioId::Level4Song => "level_4_song.ogg",
            AudioId::Cowbell => "cowbell.ogg",
            AudioId::Splash => "splash.ogg",
            AudioId::Fail => "fail.ogg",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.file_name() == name)
    }

    /// Songs loop; effects play once.
    pub fn is_music(self) -> bool {
        matches!(
            self,
            AudioId::TitleSong
                | AudioId::Level1Song
                | AudioId::Level2Song
                | AudioId::Level3Song
                | AudioId::Level4Song
        )
    }
}

/// Host-issued identifier of a loaded (or loading) sound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub usize);

// ── Asset table ─────────────────────────────────────────────────────────────

/// Number of assets the loading screen waits for.
pub const TOTAL_ASSETS: usize = ImageId::COUNT + AudioId::COUNT;

/// Join an asset root and a file name into the path handed to the host.
pub fn asset_path(root: &str, file_name: &str) -> String {
    if root.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", root.trim_end_matches('/'), file_name)
    }
}

/// Loaded images and the host handles of requested sounds.
///
/// Image slots start empty (0×0) and are filled by the host through
/// [`Assets::image_buffer`] when a load completes.
#[derive(Debug)]
pub struct Assets {
    images: Vec<Image>,
    audio: [Option<AudioHandle>; AudioId::COUNT],
}

impl Assets {
    pub fn new() -> Self {
        Self {
            images: vec![Image::default(); ImageId::COUNT],
            audio: [None; AudioId::COUNT],
        }
    }

    pub fn image(&self, id: ImageId) -> &Image {
        &self.images[id.index()]
    }

    /// Allocate the slot for `id` at the given size and return its bytes for
    /// the host to fill.
    pub fn image_buffer(&mut self, id: ImageId, width: u32, height: u32) -> &mut [u8] {
        let slot = &mut self.images[id.index()];
        *slot = Image::new(width, height);
        slot.as_bytes_mut()
    }

    pub fn set_audio(&mut self, id: AudioId, handle: AudioHandle) {
        self.audio[id.index()] = Some(handle);
    }

    pub fn audio(&self, id: AudioId) -> Option<AudioHandle> {
        self.audio[id.index()]
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_match_discriminants() {
        for (i, id) in ImageId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        for (i, id) in AudioId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn asset_path_joins_with_single_slash() {
        assert_eq!(asset_path("assets", "a.png"), "assets/a.png");
        assert_eq!(asset_path("assets/", "a.png"), "assets/a.png");
        assert_eq!(asset_path("", "a.png"), "a.png");
    }

    #[test]
    fn image_buffer_sizes_slot() {
        let mut assets = Assets::new();
        let buf = assets.image_buffer(ImageId::Player, 8, 8);
        assert_eq!(buf.len(), 8 * 8 * 4);
        assert_eq!(assets.image(ImageId::Player).width, 8);
    }
}
