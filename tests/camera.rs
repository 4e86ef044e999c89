use glam::{IVec2, Vec2};

use squares::camera::Camera;

#[test]
fn target_centres_tile() {
    let cam = Camera::new(64, 64);
    assert_eq!(cam.target(IVec2::ZERO), Vec2::new(-28.0, -28.0));
    assert_eq!(cam.target(IVec2::new(16, 3)), Vec2::new(100.0, -4.0));
}

#[test]
fn target_uses_each_axis() {
    let cam = Camera::new(96, 32);
    assert_eq!(cam.target(IVec2::ZERO), Vec2::new(-44.0, -12.0));
}

#[test]
fn follow_eases_a_quarter_per_call() {
    let mut cam = Camera::new(64, 64);
    cam.follow(IVec2::new(16, 3));
    assert_eq!(cam.position, Vec2::new(25.0, -1.0));
    cam.follow(IVec2::new(16, 3));
    assert_eq!(cam.position, Vec2::new(43.75, -1.75));
}

#[test]
fn snap_jumps_to_target() {
    let mut cam = Camera::new(64, 64);
    cam.snap(IVec2::new(5, 2));
    assert_eq!(cam.position, cam.target(IVec2::new(5, 2)));
}

#[test]
fn offset_rounds_half_up_and_negates() {
    let mut cam = Camera::new(64, 64);
    cam.position = Vec2::new(52.0, 10.0);
    assert_eq!(cam.offset(), IVec2::new(-52, -10));
    cam.position = Vec2::new(52.6, 10.4);
    assert_eq!(cam.offset(), IVec2::new(-53, -10));
}

#[test]
fn offset_truncates_toward_zero_for_negative_positions() {
    let mut cam = Camera::new(64, 64);
    cam.snap(IVec2::ZERO);
    // -28 + 0.5 truncates to -27.
    assert_eq!(cam.offset(), IVec2::new(27, 27));
    assert_eq!(cam.tile_to_screen(IVec2::ZERO), IVec2::new(27, 27));
    assert_eq!(cam.tile_to_screen(IVec2::new(1, 0)), IVec2::new(35, 27));
}

#[test]
fn visibility_bounds() {
    let cam = Camera::new(64, 64);
    assert!(cam.is_visible(IVec2::new(-8, -8)));
    assert!(cam.is_visible(IVec2::new(63, 63)));
    assert!(!cam.is_visible(IVec2::new(-9, 0)));
    assert!(!cam.is_visible(IVec2::new(0, -9)));
    assert!(!cam.is_visible(IVec2::new(64, 0)));
    assert!(!cam.is_visible(IVec2::new(0, 64)));
}
