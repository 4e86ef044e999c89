//! Desktop host: a winit window presenting the game through wgpu, kira audio,
//! PNG decoding and a JSON save file.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::assets::{AudioHandle, AudioId, ImageId};
use crate::audio::AudioContext;
use crate::config::GameConfig;
use crate::game::Game;
use crate::host::Host;
use crate::renderer::{RenderError, Renderer};
use crate::storage::ProgressStore;
use crate::video::Image;
use crate::window::{WindowConfig, WindowMode, apply_window_settings};

pub const WINDOW_TITLE: &str = "squares";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("cannot create window")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("cannot load image {path}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

// ── NativeHost ──────────────────────────────────────────────────────────────

/// [`Host`] backed by the window, GPU, sound device and file system.
///
/// Load requests are queued and serviced one per frame by
/// [`NativeHost::pump_assets`], so the loading screen gets to draw progress.
pub struct NativeHost {
    started: Instant,
    renderer: Renderer,
    audio: AudioContext,
    store: ProgressStore,
    pending_images: VecDeque<(String, ImageId)>,
    pending_audio: VecDeque<(String, AudioHandle)>,
    loaded: usize,
}

impl NativeHost {
    pub fn new(renderer: Renderer, store: ProgressStore) -> Self {
        let audio = AudioContext::new();
        if !audio.is_available() {
            log::warn!("running without sound");
        }
        Self {
            started: Instant::now(),
            renderer,
            audio,
            store,
            pending_images: VecDeque::new(),
            pending_audio: VecDeque::new(),
            loaded: 0,
        }
    }

    /// Complete at most one pending load, delivering images to `game`.
    ///
    /// An image that cannot be read is fatal.  A sound that cannot be read
    /// is logged by the audio context and still counts as loaded.
    pub fn pump_assets(&mut self, game: &mut Game) -> Result<(), EngineError> {
        if let Some((path, id)) = self.pending_images.pop_front() {
            let decoded = image::open(&path)
                .map_err(|source| EngineError::Image { path: path.clone(), source })?
                .to_rgba8();
            let (width, height) = decoded.dimensions();
            game.on_image_loaded(id, width, height)
                .copy_from_slice(decoded.as_raw());
            self.loaded += 1;
            return Ok(());
        }

        if let Some((path, handle)) = self.pending_audio.pop_front() {
            self.audio.load(handle, &path);
            log::debug!("sound {path} loaded");
            self.loaded += 1;
        }
        Ok(())
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

impl Host for NativeHost {
    fn now_ms(&self) -> i64 {
        self.started.elapsed().as_millis() as i64
    }

    fn unix_time(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn resize_canvas(&mut self, width: u32, height: u32, scale: f32) {
        self.renderer.resize_canvas(width, height);

        let window_config = self.renderer.window_config();
        if window_config.mode == WindowMode::Windowed {
            let target = WindowConfig::for_canvas(width, height, scale, WindowMode::Windowed);
            let _ = self.renderer.window.request_inner_size(PhysicalSize::new(
                target.physical_width,
                target.physical_height,
            ));
        }
    }

    fn present(&mut self, framebuffer: &Image) {
        match self.renderer.render(framebuffer) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => self.renderer.reconfigure(),
            Err(e) => log::error!("render error: {e}"),
        }
    }

    fn load_image(&mut self, path: &str, id: ImageId) {
        self.pending_images.push_back((path.to_string(), id));
    }

    fn load_audio(&mut self, path: &str) -> AudioHandle {
        let looping = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(AudioId::from_file_name)
            .is_some_and(AudioId::is_music);
        let handle = self.audio.reserve(looping);
        self.pending_audio.push_back((path.to_string(), handle));
        handle
    }

    fn count_loaded_assets(&self) -> usize {
        self.loaded
    }

    fn play(&mut self, audio: AudioHandle) {
        self.audio.play(audio);
    }

    fn pause(&mut self, audio: AudioHandle) {
        self.audio.pause(audio);
    }

    fn stop(&mut self, audio: AudioHandle) {
        self.audio.stop(audio);
    }

    fn audio_time_ms(&self, audio: AudioHandle) -> i64 {
        self.audio.position_ms(audio)
    }

    fn get_persisted_integer(&self, key: &str) -> i32 {
        self.store.get(key)
    }

    fn set_persisted_integer(&mut self, key: &str, value: i32) {
        self.store.set(key, value);
    }

    fn show_alert(&mut self, message: &str) {
        log::error!("{message}");
        self.renderer.window.set_title(&format!("{WINDOW_TITLE} - {message}"));
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: GameConfig,
    game: Game,
    host: Option<NativeHost>,
    /// First fatal error; the loop exits as soon as it is set.
    error: Option<EngineError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn create_host(&mut self, event_loop: &ActiveEventLoop) -> Result<NativeHost, EngineError> {
        let window_config = WindowConfig::for_canvas(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.canvas_scale,
            self.config.window_mode,
        );

        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(WINDOW_TITLE)
                    .with_inner_size(PhysicalSize::new(
                        window_config.physical_width,
                        window_config.physical_height,
                    ))
                    .with_resizable(true),
            )?,
        );
        apply_window_settings(&window, &window_config);

        let renderer = pollster::block_on(Renderer::new(window, window_config))?;
        let store = ProgressStore::open(&self.config.save_path);
        log::info!("progress file: {}", store.path().display());
        Ok(NativeHost::new(renderer, store))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }
        match self.create_host(event_loop) {
            Ok(mut host) => {
                self.game.on_startup(&mut host);
                self.host = Some(host);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(host) = self.host.as_ref() {
            host.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(host) = self.host.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => host.renderer_mut().resize(size),

            WindowEvent::RedrawRequested => {
                if let Err(e) = host.pump_assets(&mut self.game) {
                    self.fail(event_loop, e);
                    return;
                }
                self.game.on_frame(host);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => self.game.on_keyboard_event(code, state == ElementState::Pressed),

            _ => {}
        }
    }
}

/// Open the window and run the game until it is closed.
pub fn run(config: GameConfig) -> Result<(), EngineError> {
    let event_loop = EventLoop::new()?;
    let mut app = App {
        game: Game::new(config.clone()),
        config,
        host: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
