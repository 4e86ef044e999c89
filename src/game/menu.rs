//! Everything before a stage starts: loading, splash, title and stage select.

use super::{Game, State};
use crate::assets::{asset_path, AudioId, ImageId, TOTAL_ASSETS};
use crate::host::Host;
use crate::input::Action;
use crate::video::{Color, TextAlign};

const SPLASH_BACKGROUND: Color = Color::rgb(8, 20, 30);
const SPLASH_FADE_MS: i64 = 500;
const SPLASH_DURATION_MS: i64 = 3000;
const MENU_OVERLAY_ALPHA: u8 = 194;

/// The hog crosses the title screen this often.
const HOG_INTERVAL_MS: i64 = 15_000;
const HOG_SPEED: f32 = 40.0;
const BG_SCROLL_SPEED: f32 = 30.0;
/// Period of the menu background pattern.
const BG_TILE: f32 = 24.0;

const TITLE: &str = "SQUARES";
const LETTER_SPACING: i32 = 9;
const LETTER_PHASE: f32 = 0.7;
const LETTER_SPEED: f32 = 5.0;
const PROMPT_BLINK_S: f32 = 0.5;

impl Game {
    pub(super) fn frame_pre_load(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);

        if host.count_loaded_assets() != 1 {
            return;
        }

        let root = self.config.asset_root.clone();
        for id in ImageId::ALL.into_iter().filter(|id| *id != ImageId::FontSmall) {
            host.load_image(&asset_path(&root, id.file_name()), id);
        }
        for id in AudioId::ALL {
            let handle = host.load_audio(&asset_path(&root, id.file_name()));
            self.assets.set_audio(id, handle);
        }
        log::info!("requested {} assets", TOTAL_ASSETS - 1);

        self.set_state(State::Loading);
    }

    pub(super) fn frame_loading(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);

        let loaded = host.count_loaded_assets();
        let percent = (loaded as f32 / TOTAL_ASSETS as f32 * 100.0) as i32;

        self.print_centered("LOADING...", 16);
        self.print_centered(&format!("{percent}%"), 24);

        if loaded == TOTAL_ASSETS {
            self.print_centered("Press any", 40);
            self.print_centered("key", 48);

            if self.keyboard.any_pressed() {
                let now = host.now_ms();
                self.set_state(State::Splash { started_ms: now, sound_played: false });
            }
        }
    }

    pub(super) fn frame_splash(&mut self, host: &mut impl Host, started_ms: i64, sound_played: bool) {
        self.framebuffer.clear(SPLASH_BACKGROUND);
        self.draw_sprite(ImageId::Yyam, 17, 28, 30, 7);

        let now = host.now_ms();
        let elapsed = now - started_ms;

        if elapsed < SPLASH_FADE_MS {
            self.draw_overlay(MENU_OVERLAY_ALPHA);
        }

        if elapsed > SPLASH_FADE_MS && !sound_played {
            self.play_audio(host, AudioId::Splash);
            self.state = State::Splash { started_ms, sound_played: true };
        }

        if elapsed > SPLASH_DURATION_MS || self.keyboard.any_pressed() {
            self.menu.hog_timer_ms = now;
            self.stop_audio(host, AudioId::Splash);
            self.play_audio(host, AudioId::TitleSong);
            self.set_state(State::Title);
        }
    }

    pub(super) fn frame_title(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);

        let now = host.now_ms();
        if now - self.menu.hog_timer_ms > HOG_INTERVAL_MS {
            self.menu.hog_timer_ms = now;
            self.menu.hog_pos = -30.0;
        }

        self.draw_menu_background();

        self.menu.letter_angle += LETTER_SPEED * self.delta_s;
        let angle = self.menu.letter_angle;
        for (i, letter) in TITLE.char_indices() {
            let x = 1 + LETTER_SPACING * i as i32;
            let y = (12.0 + (angle + i as f32 * LETTER_PHASE).sin() * 8.0) as i32;
            self.print(&TITLE[i..i + letter.len_utf8()], x, y, TextAlign::Left);
        }

        self.menu.prompt_elapsed_s += self.delta_s;
        if self.menu.prompt_elapsed_s > PROMPT_BLINK_S {
            self.menu.prompt_elapsed_s -= PROMPT_BLINK_S;
            self.menu.prompt_visible = !self.menu.prompt_visible;
        }
        if self.menu.prompt_visible {
            self.print_centered("Press any", 40);
            self.print_centered("key", 48);
        }

        if self.keyboard.any_pressed() {
            self.set_state(State::Select);
        }
    }

    pub(super) fn frame_select(&mut self, host: &mut impl Host) {
        self.framebuffer.clear(Color::BLACK);
        self.draw_menu_background();

        let height = self.config.canvas_height as i32;

        self.print_centered("SELECT", 4);
        self.print_centered("STAGE", 12);
        if !self.is_unlocked(self.selected) {
            self.print_centered("LOCKED", height - 12);
        }
        let label = format!("< {} >", self.selected + 1);
        self.print_centered(&label, height / 2 - 4 + 8);

        if self.pressed(Action::Left) && self.selected > 0 {
            self.selected -= 1;
        }
        if self.pressed(Action::Right) && self.selected + 1 < self.config.levels.len() {
            self.selected += 1;
        }

        if self.pressed(Action::Confirm) && self.is_unlocked(self.selected) {
            self.start_level(host, self.selected);
        }
    }

    /// Scrolling pattern, the occasional hog, and a dark overlay.
    fn draw_menu_background(&mut self) {
        self.menu.bg_pos -= BG_SCROLL_SPEED * self.delta_s;
        if self.menu.bg_pos < -BG_TILE {
            self.menu.bg_pos += BG_TILE;
        }

        if self.menu.hog_pos < 100.0 {
            self.menu.hog_pos += HOG_SPEED * self.delta_s;
            let hog = self.menu.hog_pos as i32;
            self.draw_sprite(ImageId::Hog, hog, hog, 20, 20);
        }

        let pos = self.menu.bg_pos as i32;
        self.draw_sprite(ImageId::MenuBg, pos, pos, 88, 88);

        self.draw_overlay(MENU_OVERLAY_ALPHA);
    }
}
