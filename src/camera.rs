use glam::{IVec2, Vec2};

use crate::level::TILE_SIZE;

/// Fraction of the remaining distance covered per [`Camera::follow`] call.
pub const FOLLOW_RATE: f32 = 0.25;

/// 2D camera: the world-space pixel position of the canvas' top-left corner,
/// eased toward keeping a tile centred on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space pixel position of the top-left of the view.
    pub position: Vec2,
    /// Canvas size in pixels.
    pub viewport: IVec2,
}

impl Camera {
    pub fn new(viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: IVec2::new(viewport_width, viewport_height),
        }
    }

    /// Camera position that centres `tile` in the viewport.
    pub fn target(&self, tile: IVec2) -> Vec2 {
        let half = self.viewport / 2 - IVec2::splat(TILE_SIZE / 2);
        (tile * TILE_SIZE - half).as_vec2()
    }

    /// Ease toward centring `tile`.  One call per frame, so the easing speed
    /// scales with frame rate.
    pub fn follow(&mut self, tile: IVec2) {
        let delta = self.target(tile) - self.position;
        self.position += delta * FOLLOW_RATE;
    }

    /// Jump straight to centring `tile`.
    pub fn snap(&mut self, tile: IVec2) {
        self.position = self.target(tile);
    }

    /// Translation to add to world pixel coordinates when drawing.
    pub fn offset(&self) -> IVec2 {
        IVec2::new(
            -((self.position.x + 0.5) as i32),
            -((self.position.y + 0.5) as i32),
        )
    }

    /// Screen position of `tile` under the current offset.
    pub fn tile_to_screen(&self, tile: IVec2) -> IVec2 {
        tile * TILE_SIZE + self.offset()
    }

    /// Whether a tile drawn at `screen` would touch the viewport.
    pub fn is_visible(&self, screen: IVec2) -> bool {
        screen.x >= -TILE_SIZE
            && screen.y >= -TILE_SIZE
            && screen.x < self.viewport.x
            && screen.y < self.viewport.y
    }
}
