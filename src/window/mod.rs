pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config` to `window`.
///
/// # Windowed
/// Leaves fullscreen, restores decorations and requests
/// `physical_width × physical_height`.  The window stays resizable; the
/// canvas is letterboxed into whatever size the user picks.
///
/// # Borderless
/// Borderless fullscreen on the monitor the window is on.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            window.set_resizable(true);
            // `None` means the size arrives later as `WindowEvent::Resized`.
            let _ = window.request_inner_size(PhysicalSize::new(
                config.physical_width,
                config.physical_height,
            ));
        }
        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}
