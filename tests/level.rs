use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use squares::level::{decode, LevelError, MAX_FINISH};
use squares::video::{Color, Image};

// ── Helpers ───────────────────────────────────────────────────────────────

fn color_for(c: char) -> Color {
    match c {
        '.' => Color::rgb(0, 0, 0),
        '#' => Color::rgb(255, 255, 255),
        'P' => Color::rgb(34, 177, 76),
        'F' => Color::rgb(36, 123, 21),
        'u' => Color::rgb(255, 218, 91),
        'd' => Color::rgb(138, 107, 0),
        'r' => Color::rgb(255, 201, 14),
        'v' => Color::rgb(127, 127, 127),
        '^' => Color::rgb(195, 195, 195),
        '?' => Color::rgb(1, 2, 3),
        other => panic!("no color for {other:?}"),
    }
}

/// Build a map image from rows of tile characters.
fn map(rows: &[&str]) -> Image {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let pixels = rows.iter().flat_map(|row| row.chars().map(color_for)).collect();
    Image::from_pixels(width, height, pixels)
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

// ── Decoding ──────────────────────────────────────────────────────────────

#[test]
fn decodes_every_tile_kind() {
    let img = map(&[
        "#####",
        "P.v^F",
        "ud...",
    ]);
    let level = decode(&img, 1, &mut rng()).unwrap();

    assert_eq!((level.width, level.height), (5, 3));
    assert!(level.is_wall(IVec2::new(0, 0)));
    assert!(level.is_wall(IVec2::new(4, 0)));
    assert!(!level.is_wall(IVec2::new(1, 1)));
    assert_eq!(level.player_start, IVec2::new(0, 1));

    assert_eq!(level.finish.len(), 1);
    assert_eq!(level.finish[0].tile, IVec2::new(4, 1));

    assert_eq!(level.spikes.len(), 2);
    assert_eq!(level.spikes[0].entity.tile, IVec2::new(2, 1));
    assert!(!level.spikes[0].starts_up && !level.spikes[0].is_up);
    assert!(level.spikes[1].starts_up && level.spikes[1].is_up);

    assert_eq!(level.moving_blocks.len(), 2);
    assert_eq!(level.moving_blocks[0].dir, -1);
    assert_eq!(level.moving_blocks[0].start_tile, IVec2::new(0, 2));
    assert_eq!(level.moving_blocks[1].dir, 1);
    assert_eq!(level.moving_blocks[1].start_dir, 1);
}

#[test]
fn entities_follow_scan_order() {
    let img = map(&[
        ".F.",
        "F.F",
    ]);
    let level = decode(&img, 1, &mut rng()).unwrap();
    let tiles: Vec<IVec2> = level.finish.iter().map(|f| f.tile).collect();
    assert_eq!(tiles, vec![IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(2, 1)]);
}

#[test]
fn last_player_start_wins() {
    let img = map(&["P..", "..P"]);
    let level = decode(&img, 1, &mut rng()).unwrap();
    assert_eq!(level.player_start, IVec2::new(2, 1));
}

#[test]
fn missing_player_start_defaults_to_origin() {
    let img = map(&["...", ".F."]);
    let level = decode(&img, 1, &mut rng()).unwrap();
    assert_eq!(level.player_start, IVec2::ZERO);
}

#[test]
fn alpha_is_ignored() {
    let img = Image::from_pixels(1, 1, vec![Color::rgba(255, 255, 255, 0)]);
    let level = decode(&img, 1, &mut rng()).unwrap();
    assert!(level.is_wall(IVec2::ZERO));
}

#[test]
fn random_blocks_are_seed_deterministic() {
    let img = map(&["rrrrrrrrrrrrrrrr"]);
    let a = decode(&img, 1, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
    let b = decode(&img, 1, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();

    let dirs_a: Vec<i32> = a.moving_blocks.iter().map(|m| m.dir).collect();
    let dirs_b: Vec<i32> = b.moving_blocks.iter().map(|m| m.dir).collect();
    assert_eq!(dirs_a, dirs_b);
    assert!(dirs_a.iter().all(|d| *d == 1 || *d == -1));
    assert!(a.moving_blocks.iter().all(|m| m.start_dir == m.dir));
}

// ── Errors ────────────────────────────────────────────────────────────────

#[test]
fn unknown_color_reports_position() {
    let img = map(&["...", ".?."]);
    let err = decode(&img, 3, &mut rng()).unwrap_err();
    assert_eq!(err, LevelError::InvalidPixel { level: 3, x: 1, y: 1, rgb: [1, 2, 3] });

    let message = err.to_string();
    assert!(message.contains("level 3"), "{message}");
    assert!(message.contains("(1, 1)"), "{message}");
}

#[test]
fn too_wide_is_rejected() {
    let img = Image::new(1025, 1);
    let err = decode(&img, 2, &mut rng()).unwrap_err();
    assert!(matches!(err, LevelError::TooLarge { level: 2, width: 1025, height: 1 }));
}

#[test]
fn too_tall_is_rejected() {
    let img = Image::new(1, 65);
    assert!(matches!(decode(&img, 1, &mut rng()), Err(LevelError::TooLarge { .. })));
}

#[test]
fn maximum_size_is_accepted() {
    let mut img = Image::new(1024, 64);
    img.clear(Color::BLACK);
    let level = decode(&img, 1, &mut rng()).unwrap();
    assert_eq!(level.walls.len(), 1024 * 64);
}

#[test]
fn too_many_finish_tiles_is_an_error() {
    let row: String = "F".repeat(MAX_FINISH + 1);
    let img = map(&[row.as_str()]);
    let err = decode(&img, 1, &mut rng()).unwrap_err();
    assert!(
        matches!(err, LevelError::TooManyEntities { capacity, x, .. } if capacity == MAX_FINISH && x == MAX_FINISH as i32),
        "{err:?}"
    );
}

#[test]
fn finish_capacity_is_inclusive() {
    let row: String = "F".repeat(MAX_FINISH);
    let img = map(&[row.as_str()]);
    let level = decode(&img, 1, &mut rng()).unwrap();
    assert_eq!(level.finish.len(), MAX_FINISH);
}
