//! Integration tests for sprites: frames, animation, collision and loading

use std::io::Write;
use std::time::{Duration, Instant};

use tui_canvas::core::asset::{self, SpriteImage};
use tui_canvas::core::{PixelCanvas, Sprite};
use tui_canvas::types::{Color, PLACEHOLDER_COLOR, PLACEHOLDER_SIZE};

/// Square sprite of one color at (x, y).
fn block(x: f32, y: f32, size: u16) -> Sprite {
    let mut s = Sprite::solid(size, size, Color::White);
    s.set_position(x, y);
    s.set_visible(true);
    s
}

/// Sprite whose opaque pixels form a diagonal.
fn diagonal(x: f32, y: f32) -> Sprite {
    let mut pixels = vec![Color::Black; 16];
    for i in 0..4 {
        pixels[i * 4 + i] = Color::Red;
    }
    let mut s = Sprite::from_pixels(4, 4, pixels, 0, 0, Some(Color::Black)).unwrap();
    s.set_position(x, y);
    s.set_visible(true);
    s
}

#[test]
fn test_frame_wraparound() {
    let pixels = vec![Color::Red; 9 * 3];
    let mut s = Sprite::from_pixels(9, 3, pixels, 3, 3, None).unwrap();
    assert_eq!(s.total_frames(), 3);

    s.set_frame(5);
    assert_eq!(s.frame(), 2);
    s.set_frame(-1);
    assert_eq!(s.frame(), 2);
    s.next_frame(2);
    assert_eq!(s.frame(), 1);
    s.next_frame(-4);
    assert_eq!(s.frame(), 0);
}

#[test]
fn test_animation_loop_counting() {
    let pixels = vec![Color::Red; 8 * 4];
    let mut s = Sprite::from_pixels(8, 4, pixels, 4, 4, None).unwrap();
    s.add_animation("flap", vec![0, 1], 0.1).unwrap();

    let t0 = Instant::now();
    assert!(s.set_animation_at("flap", 0, t0));
    assert_eq!(s.frame(), 0);

    for (i, ms) in [105u64, 210, 315].into_iter().enumerate() {
        s.play_animation_at(0, t0 + Duration::from_millis(ms));
        assert_eq!(s.frame(), ((i + 1) % 2) as i32);
    }
    assert_eq!(s.animation().map(|a| a.loops()), Some(1));
    assert!(s.is_animation_played(1));
    assert!(!s.is_animation_played(2));
}

#[test]
fn test_endless_step_never_advances() {
    let pixels = vec![Color::Red; 8 * 4];
    let mut s = Sprite::from_pixels(8, 4, pixels, 4, 4, None).unwrap();
    s.add_animation("hold", vec![1, 0], 1e30).unwrap();

    let t0 = Instant::now();
    assert!(s.set_animation_at("hold", 0, t0));
    s.play_animation_at(0, t0 + Duration::from_secs(86_400));
    s.play_animation(0);
    assert_eq!(s.frame(), 1);
    assert!(!s.is_animation_played(1));
}

#[test]
fn test_far_away_sprites_do_not_overflow() {
    let near = block(0.0, 0.0, 4);
    let mut far = block(0.0, 0.0, 4);
    far.set_position(f32::MAX, f32::MIN);
    assert!(!near.is_rect_collision(&far));
    assert!(!near.is_circle_collision(&far));
    assert!(!near.is_pixel_collision(&far));
    assert!(far.distance_to(&near, true) > 0);

    let mut canvas = PixelCanvas::new(8, 8);
    canvas.draw_sprite(&far, None);
    canvas.draw_sprite_rect(&far, Color::Red);
    canvas.draw_sprite_circle(&far, Color::Red, Some(Color::Red));
    assert!(canvas.pixels().iter().all(|c| *c == Color::Black));
}

#[test]
fn test_empty_animation_is_rejected() {
    let mut s = Sprite::solid(2, 2, Color::Red);
    assert!(s.add_animation("none", Vec::<i32>::new(), 0.1).is_err());
    assert!(!s.has_animation("none"));
    assert!(!s.set_animation("none", 0));
}

#[test]
fn test_rect_collision_scenario() {
    let a = block(0.0, 0.0, 10);
    let b = block(5.0, 5.0, 10);
    let c = block(20.0, 20.0, 10);
    assert!(a.is_rect_collision(&b));
    assert!(b.is_rect_collision(&a));
    assert!(!a.is_rect_collision(&c));
    assert!(!c.is_rect_collision(&a));

    // Touching edges do not overlap: bottom-right is exclusive.
    let d = block(10.0, 0.0, 10);
    assert!(!a.is_rect_collision(&d));
}

#[test]
fn test_collision_symmetry() {
    let anchor = diagonal(10.0, 10.0);
    for y in 4..18 {
        for x in 4..18 {
            let other = diagonal(x as f32, y as f32);
            assert_eq!(anchor.is_rect_collision(&other), other.is_rect_collision(&anchor));
            assert_eq!(
                anchor.is_circle_collision(&other),
                other.is_circle_collision(&anchor)
            );
            assert_eq!(
                anchor.is_pixel_collision(&other),
                other.is_pixel_collision(&anchor)
            );
        }
    }
}

#[test]
fn test_pixel_collision_ignores_transparent_overlap() {
    let a = diagonal(0.0, 0.0);
    // Shifted one column right: the diagonals interleave without touching.
    let b = diagonal(1.0, 0.0);
    assert!(a.is_rect_collision(&b));
    assert!(!a.is_pixel_collision(&b));

    let c = diagonal(1.0, 1.0);
    assert!(a.is_pixel_collision(&c));
}

#[test]
fn test_scaled_blit_matches_pixel_mapping() {
    let mut s = diagonal(2.0, 3.0);
    s.set_scale(2.0, 2.0);
    assert_eq!((s.width(), s.height()), (8, 8));

    let mut canvas = PixelCanvas::new(16, 16);
    canvas.draw_sprite(&s, None);
    for dy in 0..8 {
        for dx in 0..8 {
            let expected = s.texel(dx, dy).unwrap_or(Color::Black);
            assert_eq!(canvas.get_pixel(2 + dx, 3 + dy), Some(expected));
        }
    }
}

#[test]
fn test_clone_is_deep() {
    let mut a = block(1.0, 1.0, 4);
    a.add_animation("still", vec![0], 0.0).unwrap();
    let mut b = a.clone();
    b.set_position(50.0, 50.0);
    b.set_scale(3.0, 3.0);
    assert_eq!(a.bound().x1, 1);
    assert_eq!(a.width(), 4);
    assert!(b.has_animation("still"));
}

#[test]
fn test_load_fallback_yields_placeholder() {
    let mut s = Sprite::new(None);
    assert!(!s.load(&[1, 2, 3], 0, 0));
    assert_eq!(s.image_size(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
    assert_eq!(s.pixel_color(0, 0), Some(PLACEHOLDER_COLOR));

    let mut missing = Sprite::new(None);
    assert!(!missing.load_file("/nonexistent/sprite.bin", 8, 8));
    assert!(missing.total_frames() >= 1);
    assert!(missing.width() > 0 && missing.height() > 0);
}

#[test]
fn test_load_file_from_disk() {
    let image = SpriteImage {
        width: 4,
        height: 2,
        pixels: vec![
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::White,
            Color::Black,
            Color::Cyan,
            Color::Magenta,
            Color::Yellow,
        ],
    };
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&asset::encode(&image)).unwrap();

    let mut s = Sprite::new(Some(Color::Black));
    assert!(s.load_file(file.path(), 2, 2));
    assert_eq!(s.total_frames(), 2);
    assert_eq!(s.frame_size(), (2, 2));
    assert_eq!(s.frame_pixel(1, 0, 0), Some(Color::Blue));
    assert_eq!(s.frame_pixel(0, 1, 1), Some(Color::Cyan));
}
