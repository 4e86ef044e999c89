use std::collections::HashMap;

use glam::IVec2;

use squares::assets::{AudioHandle, AudioId, ImageId, TOTAL_ASSETS};
use squares::config::{GameConfig, TimeSource};
use squares::game::{Game, State, PROGRESS_KEY};
use squares::host::Host;
use squares::input::KeyCode;
use squares::video::{Color, Image};

// ── Mock host ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct MockHost {
    now: i64,
    audio_time: i64,
    loaded: usize,
    canvas: Option<(u32, u32, f32)>,
    presented: usize,
    image_requests: Vec<(String, ImageId)>,
    audio_requests: Vec<String>,
    played: Vec<AudioHandle>,
    stopped: Vec<AudioHandle>,
    store: HashMap<String, i32>,
    alerts: Vec<String>,
}

impl MockHost {
    fn new() -> Self {
        Self { now: 1000, ..Self::default() }
    }

    fn played(&self, id: AudioId) -> bool {
        self.played.contains(&AudioHandle(id.index()))
    }

    fn stopped(&self, id: AudioId) -> bool {
        self.stopped.contains(&AudioHandle(id.index()))
    }
}

impl Host for MockHost {
    fn now_ms(&self) -> i64 {
        self.now
    }

    fn unix_time(&self) -> u64 {
        1_700_000_000
    }

    fn resize_canvas(&mut self, width: u32, height: u32, scale: f32) {
        self.canvas = Some((width, height, scale));
    }

    fn present(&mut self, _framebuffer: &Image) {
        self.presented += 1;
    }

    fn load_image(&mut self, path: &str, id: ImageId) {
        self.image_requests.push((path.to_string(), id));
    }

    // Handles are issued in request order, which matches `AudioId::ALL`.
    fn load_audio(&mut self, path: &str) -> AudioHandle {
        self.audio_requests.push(path.to_string());
        AudioHandle(self.audio_requests.len() - 1)
    }

    fn count_loaded_assets(&self) -> usize {
        self.loaded
    }

    fn play(&mut self, audio: AudioHandle) {
        self.played.push(audio);
    }

    fn pause(&mut self, _audio: AudioHandle) {}

    fn stop(&mut self, audio: AudioHandle) {
        self.stopped.push(audio);
    }

    fn audio_time_ms(&self, _audio: AudioHandle) -> i64 {
        self.audio_time
    }

    fn get_persisted_integer(&self, key: &str) -> i32 {
        self.store.get(key).copied().unwrap_or(0)
    }

    fn set_persisted_integer(&mut self, key: &str, value: i32) {
        self.store.insert(key.to_string(), value);
    }

    fn show_alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

// One tick per frame at the first stage's 100 bpm.
const STEP_MS: i64 = 150;

fn map(row: &str) -> Image {
    let pixels = row
        .chars()
        .map(|c| match c {
            '.' => Color::rgb(0, 0, 0),
            '#' => Color::rgb(255, 255, 255),
            'P' => Color::rgb(34, 177, 76),
            'F' => Color::rgb(36, 123, 21),
            '?' => Color::rgb(1, 2, 3),
            other => panic!("no color for {other:?}"),
        })
        .collect();
    Image::from_pixels(row.len() as u32, 1, pixels)
}

fn deliver(game: &mut Game, id: ImageId, image: &Image) {
    game.on_image_loaded(id, image.width, image.height)
        .copy_from_slice(image.as_bytes());
}

fn frame(game: &mut Game, host: &mut MockHost, step_ms: i64) {
    host.now += step_ms;
    game.on_frame(host);
}

fn press(game: &mut Game, host: &mut MockHost, key: KeyCode) {
    game.on_keyboard_event(key, true);
    frame(game, host, 16);
    game.on_keyboard_event(key, false);
}

/// Start the game and complete every load, leaving it on the loading screen.
fn loaded_game(config: GameConfig, maps: &[(ImageId, Image)]) -> (Game, MockHost) {
    let mut game = Game::new(config);
    let mut host = MockHost::new();
    game.on_startup(&mut host);

    deliver(&mut game, ImageId::FontSmall, &Image::new(570, 8));
    host.loaded = 1;
    frame(&mut game, &mut host, 16);

    let mut filler = Image::new(8, 8);
    filler.clear(Color::WHITE);
    for (_, id) in host.image_requests.clone() {
        match maps.iter().find(|(map_id, _)| *map_id == id) {
            Some((_, image)) => deliver(&mut game, id, image),
            None => deliver(&mut game, id, &filler),
        }
    }
    host.loaded = TOTAL_ASSETS;
    (game, host)
}

/// Loading → splash → title → select.
fn at_select(config: GameConfig, maps: &[(ImageId, Image)]) -> (Game, MockHost) {
    let (mut game, mut host) = loaded_game(config, maps);
    press(&mut game, &mut host, KeyCode::Enter);
    press(&mut game, &mut host, KeyCode::Enter);
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Select);
    (game, host)
}

fn playing(config: GameConfig, level_1: &str) -> (Game, MockHost) {
    let (mut game, mut host) = at_select(config, &[(ImageId::Level1, map(level_1))]);
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Play);
    (game, host)
}

fn run_frames(game: &mut Game, host: &mut MockHost, n: usize) {
    for _ in 0..n {
        frame(game, host, STEP_MS);
    }
}

// ── Startup and loading ───────────────────────────────────────────────────

#[test]
fn startup_sizes_canvas_and_requests_font() {
    let mut game = Game::new(GameConfig::default());
    let mut host = MockHost::new();
    host.store.insert(PROGRESS_KEY.to_string(), 2);
    game.on_startup(&mut host);

    assert_eq!(host.canvas, Some((64, 64, 6.0)));
    assert_eq!(host.image_requests, vec![("assets/font_6x8.png".to_string(), ImageId::FontSmall)]);
    assert_eq!(game.unlocked(), 2);
    assert_eq!(game.state(), State::PreLoad);
}

#[test]
fn preload_waits_for_font() {
    let mut game = Game::new(GameConfig::default());
    let mut host = MockHost::new();
    game.on_startup(&mut host);

    frame(&mut game, &mut host, 16);
    frame(&mut game, &mut host, 16);
    assert_eq!(game.state(), State::PreLoad);
    assert_eq!(host.image_requests.len(), 1);
    assert_eq!(host.presented, 2);

    host.loaded = 1;
    frame(&mut game, &mut host, 16);
    assert_eq!(game.state(), State::Loading);
    assert_eq!(host.image_requests.len(), ImageId::COUNT);
    assert_eq!(host.audio_requests.len(), AudioId::COUNT);
    assert!(host.image_requests.iter().skip(1).all(|(_, id)| *id != ImageId::FontSmall));
    assert_eq!(host.audio_requests[0], "assets/title.ogg");
    assert_eq!(game.assets().audio(AudioId::Fail), Some(AudioHandle(7)));
}

#[test]
fn loading_ignores_keys_until_complete() {
    let (mut game, mut host) = loaded_game(GameConfig::default(), &[]);
    host.loaded = TOTAL_ASSETS - 1;
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Loading);

    host.loaded = TOTAL_ASSETS;
    frame(&mut game, &mut host, 16);
    assert_eq!(game.state(), State::Loading);

    let now = host.now;
    press(&mut game, &mut host, KeyCode::KeyZ);
    assert_eq!(game.state(), State::Splash { started_ms: now + 16, sound_played: false });
}

// ── Splash and title ──────────────────────────────────────────────────────

#[test]
fn splash_plays_sound_then_times_out_to_title() {
    let (mut game, mut host) = loaded_game(GameConfig::default(), &[]);
    press(&mut game, &mut host, KeyCode::Enter);
    assert!(matches!(game.state(), State::Splash { .. }));

    frame(&mut game, &mut host, 400);
    assert!(!host.played(AudioId::Splash));
    frame(&mut game, &mut host, 200);
    assert!(host.played(AudioId::Splash));
    assert!(matches!(game.state(), State::Splash { sound_played: true, .. }));

    frame(&mut game, &mut host, 1000);
    frame(&mut game, &mut host, 1000);
    assert!(matches!(game.state(), State::Splash { .. }));
    assert_eq!(host.played.iter().filter(|h| **h == AudioHandle(AudioId::Splash.index())).count(), 1);

    frame(&mut game, &mut host, 1000);
    assert_eq!(game.state(), State::Title);
    assert!(host.stopped(AudioId::Splash));
    assert!(host.played(AudioId::TitleSong));
}

#[test]
fn key_skips_splash() {
    let (mut game, mut host) = loaded_game(GameConfig::default(), &[]);
    press(&mut game, &mut host, KeyCode::Enter);
    press(&mut game, &mut host, KeyCode::Space);
    assert_eq!(game.state(), State::Title);
    assert!(host.played(AudioId::TitleSong));
}

#[test]
fn title_keeps_running_without_input() {
    let (mut game, mut host) = loaded_game(GameConfig::default(), &[]);
    press(&mut game, &mut host, KeyCode::Enter);
    press(&mut game, &mut host, KeyCode::Enter);
    for _ in 0..200 {
        frame(&mut game, &mut host, 100);
    }
    assert_eq!(game.state(), State::Title);
}

// ── Stage select ──────────────────────────────────────────────────────────

#[test]
fn selection_is_clamped() {
    let (mut game, mut host) = at_select(GameConfig::default(), &[]);
    press(&mut game, &mut host, KeyCode::ArrowLeft);
    assert_eq!(game.selected_level(), 0);
    for _ in 0..6 {
        press(&mut game, &mut host, KeyCode::ArrowRight);
    }
    assert_eq!(game.selected_level(), 3);
}

#[test]
fn locked_stage_cannot_start() {
    let (mut game, mut host) = at_select(GameConfig::default(), &[]);
    press(&mut game, &mut host, KeyCode::ArrowRight);
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Select);
    assert!(!host.played(AudioId::Level2Song));
}

#[test]
fn unlock_all_opens_every_stage() {
    let config = GameConfig { unlock_all: true, ..GameConfig::default() };
    let (mut game, mut host) = at_select(config, &[]);
    for _ in 0..3 {
        press(&mut game, &mut host, KeyCode::ArrowRight);
    }
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Play);
    assert!(host.played(AudioId::Level4Song));
    assert!(host.stopped(AudioId::TitleSong));
}

#[test]
fn bad_map_alerts_and_stays_on_select() {
    let (mut game, mut host) = at_select(GameConfig::default(), &[(ImageId::Level1, map("P?F"))]);
    press(&mut game, &mut host, KeyCode::Enter);

    assert_eq!(game.state(), State::Select);
    assert_eq!(host.alerts.len(), 1);
    assert!(host.alerts[0].contains("(1, 0)"), "{}", host.alerts[0]);
    assert!(!host.stopped(AudioId::TitleSong));
}

// ── Play ──────────────────────────────────────────────────────────────────

#[test]
fn starting_a_stage_places_player_and_music() {
    let (game, host) = playing(GameConfig::default(), "..P..F");
    assert_eq!(game.simulation().player, IVec2::new(2, 0));
    assert!(host.played(AudioId::Level1Song));
    assert!((game.simulation().clock.interval_ms - 150.0).abs() < 1e-3);
}

#[test]
fn walking_into_wall_loses() {
    let (mut game, mut host) = playing(GameConfig::default(), "P#..");
    run_frames(&mut game, &mut host, 4);
    assert_eq!(game.state(), State::Play);
    assert_eq!(game.simulation().player, IVec2::new(1, 0));

    run_frames(&mut game, &mut host, 1);
    assert_eq!(game.state(), State::Lose);
    assert!(host.stopped(AudioId::Level1Song));
    assert!(host.played(AudioId::Fail));
}

#[test]
fn retry_after_losing_restarts_stage() {
    let (mut game, mut host) = playing(GameConfig::default(), "P#..");
    run_frames(&mut game, &mut host, 5);
    assert_eq!(game.state(), State::Lose);
    assert_ne!(game.camera().position, game.camera().target(IVec2::ZERO));

    let plays_before = host.played.len();
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Play);
    assert_eq!(game.simulation().player, IVec2::ZERO);
    assert_eq!(game.camera().position, game.camera().target(game.simulation().player));
    assert_eq!(host.played.len(), plays_before + 1);
    assert_eq!(*host.played.last().unwrap(), AudioHandle(AudioId::Level1Song.index()));
}

#[test]
fn escape_from_lose_returns_to_select() {
    let (mut game, mut host) = playing(GameConfig::default(), "P#..");
    run_frames(&mut game, &mut host, 5);
    press(&mut game, &mut host, KeyCode::Escape);
    assert_eq!(game.state(), State::Select);
    assert_eq!(*host.played.last().unwrap(), AudioHandle(AudioId::TitleSong.index()));
}

#[test]
fn reaching_finish_wins_and_persists() {
    let (mut game, mut host) = playing(GameConfig::default(), "PF..");
    run_frames(&mut game, &mut host, 5);
    assert_eq!(game.state(), State::Win);
    assert_eq!(game.unlocked(), 1);
    assert_eq!(host.store.get(PROGRESS_KEY), Some(&1));

    press(&mut game, &mut host, KeyCode::Escape);
    assert_eq!(game.state(), State::Select);
    assert!(host.played(AudioId::TitleSong));

    press(&mut game, &mut host, KeyCode::ArrowRight);
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.state(), State::Play);
}

#[test]
fn escape_during_play_returns_to_select() {
    let (mut game, mut host) = playing(GameConfig::default(), "P...");
    run_frames(&mut game, &mut host, 2);
    press(&mut game, &mut host, KeyCode::Escape);
    assert_eq!(game.state(), State::Select);
    assert!(host.stopped(AudioId::Level1Song));
}

#[test]
fn god_mode_walks_through_walls() {
    let config = GameConfig { god_mode: true, ..GameConfig::default() };
    let (mut game, mut host) = playing(config, "P#F.");
    run_frames(&mut game, &mut host, 5);
    assert_eq!(game.state(), State::Play);
    run_frames(&mut game, &mut host, 5);
    assert_eq!(game.state(), State::Win);
}

#[test]
fn cowbell_on_each_step() {
    let config = GameConfig { play_cowbell: true, ..GameConfig::default() };
    let (mut game, mut host) = playing(config, "P.......");
    run_frames(&mut game, &mut host, 3);
    assert!(!host.played(AudioId::Cowbell));
    run_frames(&mut game, &mut host, 1);
    assert!(host.played(AudioId::Cowbell));
}

#[test]
fn music_time_source_drives_clock() {
    let config = GameConfig { time_source: TimeSource::Music, ..GameConfig::default() };
    let (mut game, mut host) = at_select(config, &[(ImageId::Level1, map("P......."))]);
    host.audio_time = 5000;
    press(&mut game, &mut host, KeyCode::Enter);
    assert_eq!(game.simulation().clock.last_tick_ms, 5000.0);

    // Wall-clock time alone does not tick.
    run_frames(&mut game, &mut host, 8);
    assert_eq!(game.simulation().player_ticks, 0);

    host.audio_time = 5150;
    frame(&mut game, &mut host, 16);
    assert_eq!(game.simulation().player_ticks, 1);
}

#[test]
fn music_loop_keeps_ticking() {
    let config = GameConfig { time_source: TimeSource::Music, ..GameConfig::default() };
    let (mut game, mut host) = at_select(config, &[(ImageId::Level1, map("P......."))]);
    host.audio_time = 0;
    press(&mut game, &mut host, KeyCode::Enter);

    for _ in 0..4 {
        host.audio_time += 150;
        frame(&mut game, &mut host, 16);
    }
    assert_eq!(game.simulation().player, IVec2::new(1, 0));

    // Song wraps back to the start.
    host.audio_time = 50;
    frame(&mut game, &mut host, 16);
    assert_eq!(game.simulation().player_ticks, 0);

    for _ in 0..4 {
        host.audio_time += 150;
        frame(&mut game, &mut host, 16);
    }
    assert_eq!(game.simulation().player, IVec2::new(2, 0));
}

#[test]
fn every_frame_is_presented() {
    let (mut game, mut host) = at_select(GameConfig::default(), &[]);
    let before = host.presented;
    run_frames(&mut game, &mut host, 10);
    assert_eq!(host.presented, before + 10);
}
