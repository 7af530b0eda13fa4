//! Integration tests for canvas drawing and window compositing

use tui_canvas::core::PixelCanvas;
use tui_canvas::term::WindowBuffer;
use tui_canvas::types::Color;

#[test]
fn test_pixel_round_trip_everywhere() {
    let mut canvas = PixelCanvas::new(23, 11);
    for y in 0..11 {
        for x in 0..23 {
            for color in Color::ALL {
                canvas.set_pixel(x, y, color);
                assert_eq!(canvas.get_pixel(x, y), Some(color));
            }
        }
    }
}

#[test]
fn test_out_of_bounds_is_clipped() {
    let mut canvas = PixelCanvas::new(4, 4);
    canvas.set_pixel(-1, 0, Color::Red);
    canvas.set_pixel(4, 0, Color::Red);
    canvas.rectangle(-10, -10, 100, 100, Color::Green);
    canvas.line(-5, 2, 10, 2, Color::Blue);
    assert_eq!(canvas.get_pixel(-1, 0), None);
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::Green));
    assert_eq!(canvas.get_pixel(3, 2), Some(Color::Blue));
}

#[test]
fn test_line_sets_both_endpoints() {
    let mut canvas = PixelCanvas::new(20, 20);
    let cases = [(1, 1, 18, 5), (18, 17, 2, 3), (5, 0, 5, 19), (0, 10, 19, 10)];
    for (x1, y1, x2, y2) in cases {
        canvas.clear(Color::Black);
        canvas.line(x1, y1, x2, y2, Color::White);
        assert_eq!(canvas.get_pixel(x1, y1), Some(Color::White));
        assert_eq!(canvas.get_pixel(x2, y2), Some(Color::White));

        let lit = canvas.pixels().iter().filter(|c| **c == Color::White).count() as i32;
        let steps = (x2 - x1).abs().max((y2 - y1).abs());
        assert_eq!(lit, steps + 1, "one pixel per step for {x1},{y1} -> {x2},{y2}");
    }
}

#[test]
fn test_compositing_block_invariant() {
    let mut canvas = PixelCanvas::new(6, 4);
    for y in 0..4 {
        for x in 0..6 {
            canvas.set_pixel(x, y, Color::ALL[((x * 5 + y) % 16) as usize]);
        }
    }

    let mut window = WindowBuffer::default();
    for zoom_x in 1..=5u16 {
        for zoom_y in 1..=5u16 {
            window.composite(&canvas, zoom_x, zoom_y);
            assert_eq!(window.width(), 6 * zoom_x);
            assert_eq!(window.height(), 4 * zoom_y);
            for wy in 0..window.height() {
                for wx in 0..window.width() {
                    let expected = canvas.get_pixel((wx / zoom_x) as i32, (wy / zoom_y) as i32);
                    assert_eq!(window.get(wx, wy), expected);
                }
            }
        }
    }
}

fn count(canvas: &PixelCanvas, color: Color) -> usize {
    canvas.pixels().iter().filter(|c| **c == color).count()
}

#[test]
fn test_percent_rectangle_boundaries() {
    // 12x6 frame with a 1-pixel border leaves a 10x4 interior.
    let draw = |percent: f32, horizontal: bool| {
        let mut canvas = PixelCanvas::new(12, 6);
        canvas.rectangle_percent(
            0,
            0,
            12,
            6,
            Some(Color::Green),
            Some(Color::Grey),
            1,
            percent,
            horizontal,
        );
        canvas
    };

    let empty = draw(0.0, true);
    assert_eq!(count(&empty, Color::Green), 0);
    assert_eq!(count(&empty, Color::Grey), 72);

    let half = draw(0.5, true);
    assert_eq!(count(&half, Color::Green), 20);
    assert_eq!(half.get_pixel(1, 1), Some(Color::Green));
    assert_eq!(half.get_pixel(5, 4), Some(Color::Green));
    assert_eq!(half.get_pixel(6, 1), Some(Color::Grey));

    let full = draw(1.0, true);
    assert_eq!(count(&full, Color::Green), 40);
    assert_eq!(full.get_pixel(0, 0), Some(Color::Grey));

    let over = draw(7.5, true);
    assert_eq!(over, full);

    let vertical = draw(0.5, false);
    assert_eq!(count(&vertical, Color::Green), 20);
    assert_eq!(vertical.get_pixel(1, 4), Some(Color::Green));
    assert_eq!(vertical.get_pixel(1, 2), Some(Color::Grey));
}

#[test]
fn test_percent_rectangle_without_border() {
    // Stroke 0: the interior is the whole 100x20 rectangle.
    let draw = |percent: f32| {
        let mut canvas = PixelCanvas::new(100, 20);
        canvas.rectangle_percent(
            0,
            0,
            100,
            20,
            Some(Color::Green),
            Some(Color::Grey),
            0,
            percent,
            true,
        );
        canvas
    };

    let empty = draw(0.0);
    assert_eq!(count(&empty, Color::Green), 0);
    assert_eq!(count(&empty, Color::Grey), 2000);

    let half = draw(0.5);
    for x in 0..100 {
        let expected = if x < 50 { Color::Green } else { Color::Grey };
        for y in 0..20 {
            assert_eq!(half.get_pixel(x, y), Some(expected), "({x},{y})");
        }
    }

    let full = draw(1.0);
    assert_eq!(count(&full, Color::Green), 2000);
}

#[test]
fn test_extreme_coordinates_are_clipped() {
    let mut canvas = PixelCanvas::new(16, 8);
    canvas.rectangle(10, 0, i32::MAX, 2, Color::Red);
    canvas.line(i32::MIN, 5, i32::MAX, 5, Color::Green);
    canvas.rectangle_percent(
        i32::MIN,
        i32::MIN,
        i32::MAX,
        i32::MAX,
        Some(Color::Blue),
        Some(Color::Grey),
        i32::MAX,
        1.0,
        false,
    );
    canvas.circle(i32::MIN, i32::MAX, 3, Color::White, Some(Color::White));

    assert_eq!(count(&canvas, Color::Red), 12);
    assert_eq!(count(&canvas, Color::Green), 16);
    assert_eq!(count(&canvas, Color::Blue), 0);
    assert_eq!(count(&canvas, Color::White), 0);
}

#[test]
fn test_bordered_rectangle_keeps_none_parts() {
    let mut canvas = PixelCanvas::new(8, 8);
    canvas.clear(Color::Blue);
    canvas.rectangle_bordered(0, 0, 8, 8, None, Some(Color::White), 2);
    assert_eq!(canvas.get_pixel(1, 1), Some(Color::White));
    assert_eq!(canvas.get_pixel(2, 2), Some(Color::Blue));

    canvas.rectangle_bordered(0, 0, 8, 8, Some(Color::Red), None, 2);
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::White));
    assert_eq!(canvas.get_pixel(5, 5), Some(Color::Red));
    assert_eq!(canvas.get_pixel(6, 6), Some(Color::White));
}

#[test]
fn test_circle_fill_stays_inside_outline() {
    let mut canvas = PixelCanvas::new(21, 21);
    canvas.circle(10, 10, 6, Color::White, Some(Color::Red));
    assert_eq!(canvas.get_pixel(10, 10), Some(Color::Red));
    assert_eq!(canvas.get_pixel(16, 10), Some(Color::White));
    assert_eq!(canvas.get_pixel(10, 4), Some(Color::White));
    assert_eq!(canvas.get_pixel(17, 10), Some(Color::Black));
    assert_eq!(canvas.get_pixel(0, 0), Some(Color::Black));
}
