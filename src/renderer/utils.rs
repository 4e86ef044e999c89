// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// Computes the largest axis-uniform scaled rectangle that fits the canvas
// inside the window, centred on both axes.  When the window is at least as
// large as the canvas the scale snaps down to a whole number so every canvas
// pixel covers the same number of screen pixels.

use crate::window::WindowConfig;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Rectangle in physical pixels the canvas is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ── letterbox_viewport ────────────────────────────────────────────────────────

/// Calculate the letterbox `Viewport` for `config`.
///
/// ```text
/// fit   = min(physical_width / canvas_width, physical_height / canvas_height)
/// scale = floor(fit)   if fit >= 1
///         fit          otherwise
/// x     = (physical_width  - canvas_width  * scale) / 2, floored
/// y     = (physical_height - canvas_height * scale) / 2, floored
/// ```
///
/// A zero-sized canvas yields [`Viewport::ZERO`].
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.canvas_width == 0 || config.canvas_height == 0 {
        return Viewport::ZERO;
    }

    let pw = config.physical_width as f32;
    let ph = config.physical_height as f32;
    let cw = config.canvas_width as f32;
    let ch = config.canvas_height as f32;

    let fit = (pw / cw).min(ph / ch);
    let scale = if fit >= 1.0 { fit.floor() } else { fit };

    let width = cw * scale;
    let height = ch * scale;
    let x = ((pw - width) / 2.0).floor();
    let y = ((ph - height) / 2.0).floor();

    Viewport { x, y, width, height }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowMode;

    fn cfg(pw: u32, ph: u32, cw: u32, ch: u32) -> WindowConfig {
        WindowConfig {
            physical_width: pw,
            physical_height: ph,
            canvas_width: cw,
            canvas_height: ch,
            mode: WindowMode::Windowed,
        }
    }

    #[test]
    fn exact_multiple_fills_window() {
        let v = letterbox_viewport(&cfg(384, 384, 64, 64));
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 384.0, height: 384.0 });
    }

    #[test]
    fn wide_window_pillarboxes() {
        // fit = min(10, 6) = 6 → 384×384, x = (640-384)/2 = 128.
        let v = letterbox_viewport(&cfg(640, 384, 64, 64));
        assert_eq!(v.x, 128.0);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.width, 384.0);
        assert_eq!(v.height, 384.0);
    }

    #[test]
    fn fractional_fit_snaps_down() {
        // fit = 400/64 = 6.25 → 6 → 384, margins 8 on each side.
        let v = letterbox_viewport(&cfg(400, 400, 64, 64));
        assert_eq!(v.width, 384.0);
        assert_eq!(v.x, 8.0);
        assert_eq!(v.y, 8.0);
    }

    #[test]
    fn window_smaller_than_canvas_scales_down() {
        let v = letterbox_viewport(&cfg(32, 48, 64, 64));
        assert!((v.width - 32.0).abs() < 1e-3, "w={}", v.width);
        assert!((v.height - 32.0).abs() < 1e-3, "h={}", v.height);
        assert_eq!(v.y, 8.0);
    }

    #[test]
    fn zero_canvas_gives_zero_viewport() {
        assert_eq!(letterbox_viewport(&cfg(1280, 720, 0, 64)), Viewport::ZERO);
        assert_eq!(letterbox_viewport(&cfg(1280, 720, 64, 0)), Viewport::ZERO);
    }

    #[test]
    fn minimised_window_is_empty() {
        assert!(letterbox_viewport(&cfg(0, 0, 64, 64)).is_empty());
    }

    #[test]
    fn viewport_never_exceeds_physical_bounds() {
        for (pw, ph) in [(1920u32, 1080u32), (800, 600), (65, 200), (3840, 2160)] {
            let v = letterbox_viewport(&cfg(pw, ph, 64, 64));
            assert!(v.x >= 0.0 && v.y >= 0.0, "negative origin ({pw}x{ph})");
            assert!(v.x + v.width <= pw as f32 + 1e-3, "overflows x ({pw}x{ph})");
            assert!(v.y + v.height <= ph as f32 + 1e-3, "overflows y ({pw}x{ph})");
        }
    }
}
