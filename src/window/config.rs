use serde::{Deserialize, Serialize};

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Decorated window sized to the scaled canvas.
    #[default]
    Windowed,
    /// Borderless window covering the current monitor.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the pixel size of the OS window surface.
/// - **canvas** dimensions are the framebuffer the game draws into (64 × 64),
///   which is upscaled into the window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub physical_width: u32,
    pub physical_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub mode: WindowMode,
}

impl WindowConfig {
    /// A window showing a `width × height` canvas at `scale` screen pixels per
    /// canvas pixel.
    pub fn for_canvas(width: u32, height: u32, scale: f32, mode: WindowMode) -> Self {
        let scale = scale.max(1.0);
        Self {
            physical_width: (width as f32 * scale).round() as u32,
            physical_height: (height as f32 * scale).round() as u32,
            canvas_width: width,
            canvas_height: height,
            mode,
        }
    }

    /// Aspect ratio of the canvas.  `0.0` when the canvas height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.canvas_height == 0 {
            return 0.0;
        }
        self.canvas_width as f32 / self.canvas_height as f32
    }
}

impl Default for WindowConfig {
    /// 64 × 64 canvas shown at 6× in a window.
    fn default() -> Self {
        Self::for_canvas(64, 64, 6.0, WindowMode::Windowed)
    }
}
