//! The game: a state machine that turns keyboard input and time into frames.
//!
//! [`Game`] owns every piece of session state.  The host calls
//! [`Game::on_startup`] once, then [`Game::on_frame`] once per display frame,
//! forwarding key events and finished image loads in between.

mod menu;
mod play;

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::assets::{asset_path, Assets, AudioId, ImageId};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::host::Host;
use crate::input::{Action, ActionMap, KeyCode, Keyboard};
use crate::level::{Level, LoopedTime, Simulation, TickClock, TILE_SIZE};
use crate::video::{BlitFlip, Color, Image, MonospaceFont, Rect, TextAlign};

/// Storage key of the highest unlocked stage index.
pub const PROGRESS_KEY: &str = "squares_progress";

pub const FONT_CHAR_WIDTH: i32 = 6;
pub const FONT_CHAR_HEIGHT: i32 = 8;

// ── State ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Waiting for the font so the loading screen can draw.
    PreLoad,
    Loading,
    Splash { started_ms: i64, sound_played: bool },
    Title,
    Select,
    Play,
    Win,
    Lose,
}

/// Title screen and menu background animation.
#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuAnim {
    /// Diagonal scroll offset of the background, in `(-24, 0]`.
    bg_pos: f32,
    /// Diagonal position of the hog; only drawn below 100.
    hog_pos: f32,
    hog_timer_ms: i64,
    letter_angle: f32,
    prompt_visible: bool,
    prompt_elapsed_s: f32,
}

impl Default for MenuAnim {
    fn default() -> Self {
        Self {
            bg_pos: 0.0,
            hog_pos: 200.0,
            hog_timer_ms: 0,
            letter_angle: 0.0,
            prompt_visible: true,
            prompt_elapsed_s: 0.0,
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

pub struct Game {
    config: GameConfig,
    state: State,
    framebuffer: Image,
    assets: Assets,
    keyboard: Keyboard,
    actions: ActionMap<Action>,
    rng: ChaCha8Rng,
    sim: Simulation,
    camera: Camera,
    /// Index into the stage table shown on the select screen.
    selected: usize,
    /// Stage table entry being played.
    current: usize,
    /// Highest stage index the player may start.
    unlocked: i32,
    menu: MenuAnim,
    /// Unwrapped song position for the music time source.
    music_time: LoopedTime,
    last_frame_ms: i64,
    delta_s: f32,
}

impl Game {
    /// Panics when `config` has an empty stage table.
    pub fn new(config: GameConfig) -> Self {
        assert!(!config.levels.is_empty(), "stage table is empty");

        let framebuffer = Image::new(config.canvas_width, config.canvas_height);
        let camera = Camera::new(config.canvas_width as i32, config.canvas_height as i32);
        let sim = Simulation::new(
            Level::empty(0, 0),
            TickClock::from_bpm(config.levels[0].bpm),
            config.movement,
        );

        Self {
            state: State::PreLoad,
            framebuffer,
            assets: Assets::new(),
            keyboard: Keyboard::new(),
            actions: ActionMap::standard(),
            rng: ChaCha8Rng::seed_from_u64(0),
            sim,
            camera,
            selected: 0,
            current: 0,
            unlocked: 0,
            menu: MenuAnim::default(),
            music_time: LoopedTime::new(),
            last_frame_ms: 0,
            delta_s: 0.0,
            config,
        }
    }

    // ── Host entry points ───────────────────────────────────────────────

    /// Seed the RNG, restore progress, size the canvas and request the font.
    pub fn on_startup(&mut self, host: &mut impl Host) {
        self.rng = ChaCha8Rng::seed_from_u64(host.unix_time());
        self.unlocked = host.get_persisted_integer(PROGRESS_KEY);
        self.last_frame_ms = host.now_ms();

        host.resize_canvas(self.config.canvas_width, self.config.canvas_height, self.config.canvas_scale);

        let path = asset_path(&self.config.asset_root, ImageId::FontSmall.file_name());
        host.load_image(&path, ImageId::FontSmall);

        log::info!("startup: {} stages, stage {} unlocked", self.config.levels.len(), self.unlocked + 1);
    }

    pub fn on_frame(&mut self, host: &mut impl Host) {
        let now = host.now_ms();
        self.delta_s = (now - self.last_frame_ms) as f32 / 1000.0;
        self.last_frame_ms = now;

        match self.state {
            State::PreLoad => self.frame_pre_load(host),
            State::Loading => self.frame_loading(host),
            State::Splash { started_ms, sound_played } => self.frame_splash(host, started_ms, sound_played),
            State::Title => self.frame_title(host),
            State::Select => self.frame_select(host),
            State::Play => self.frame_play(host),
            State::Win => self.frame_win(host),
            State::Lose => self.frame_lose(host),
        }

        host.present(&self.framebuffer);
        self.keyboard.end_frame();
    }

    pub fn on_keyboard_event(&mut self, key: KeyCode, pressed: bool) {
        self.keyboard.on_event(key, pressed);
    }

    /// Allocate the image slot for a finished load and return the buffer the
    /// host must fill with `width * height * 4` RGBA bytes.
    pub fn on_image_loaded(&mut self, id: ImageId, width: u32, height: u32) -> &mut [u8] {
        log::debug!("image {id:?} loaded ({width}x{height})");
        self.assets.image_buffer(id, width, height)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn framebuffer(&self) -> &Image {
        &self.framebuffer
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selected_level(&self) -> usize {
        self.selected
    }

    pub fn unlocked(&self) -> i32 {
        self.unlocked
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    // ── Shared helpers ──────────────────────────────────────────────────

    fn set_state(&mut self, state: State) {
        log::debug!("state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn pressed(&self, action: Action) -> bool {
        self.actions.is_pressed(action, &self.keyboard)
    }

    fn is_unlocked(&self, index: usize) -> bool {
        self.config.unlock_all || index as i64 <= self.unlocked as i64
    }

    fn play_audio(&self, host: &mut impl Host, id: AudioId) {
        if let Some(handle) = self.assets.audio(id) {
            host.play(handle);
        }
    }

    fn stop_audio(&self, host: &mut impl Host, id: AudioId) {
        if let Some(handle) = self.assets.audio(id) {
            host.stop(handle);
        }
    }

    fn canvas_center_x(&self) -> i32 {
        self.config.canvas_width as i32 / 2
    }

    fn print(&mut self, text: &str, x: i32, y: i32, align: TextAlign) {
        let font = MonospaceFont::new(self.assets.image(ImageId::FontSmall), FONT_CHAR_WIDTH, FONT_CHAR_HEIGHT);
        self.framebuffer.draw_text(&font, text, x, y, align);
    }

    /// Centered text.
    fn print_centered(&mut self, text: &str, y: i32) {
        let x = self.canvas_center_x();
        self.print(text, x, y, TextAlign::Center);
    }

    fn draw_sprite(&mut self, id: ImageId, x: i32, y: i32, w: i32, h: i32) {
        self.framebuffer.blit(self.assets.image(id), x, y, Rect::sized(w, h), BlitFlip::empty());
    }

    fn draw_tile(&mut self, id: ImageId, pos: IVec2) {
        self.draw_sprite(id, pos.x, pos.y, TILE_SIZE, TILE_SIZE);
    }

    /// Darken the whole canvas.
    fn draw_overlay(&mut self, alpha: u8) {
        let (w, h) = (self.framebuffer.width as i32, self.framebuffer.height as i32);
        self.framebuffer.fill_rect(0, 0, w, h, Color::rgba(0, 0, 0, alpha));
    }
}
