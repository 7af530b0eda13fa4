//! Integer geometry helpers shared by drawing and collision code.

/// Wrap `value` into the inclusive range `[min, max]`.
///
/// ```
/// use tui_canvas_types::util::wrap;
///
/// assert_eq!(wrap(5, 0, 4), 0);
/// assert_eq!(wrap(-1, 0, 4), 4);
/// assert_eq!(wrap(3, 0, 4), 3);
/// ```
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    let span = max as i64 - min as i64 + 1;
    (min as i64 + (value as i64 - min as i64).rem_euclid(span)) as i32
}

/// Squared distance between two points, or the (truncated) Euclidean
/// distance when `root` is set.
pub fn distance(p1x: i32, p1y: i32, p2x: i32, p2y: i32, root: bool) -> i32 {
    let squared = squared_distance(p1x, p1y, p2x, p2y);
    if root {
        (squared as f64).sqrt() as i32
    } else {
        squared.min(i32::MAX as u64) as i32
    }
}

fn squared_distance(p1x: i32, p1y: i32, p2x: i32, p2y: i32) -> u64 {
    let dx = (p2x as i64 - p1x as i64).unsigned_abs();
    let dy = (p2y as i64 - p1y as i64).unsigned_abs();
    (dx * dx).saturating_add(dy * dy)
}

/// True if `(px, py)` lies inside or on the circle `(cx, cy, radius)`.
pub fn is_point_in_circle(px: i32, py: i32, cx: i32, cy: i32, radius: i32) -> bool {
    let r = radius.unsigned_abs() as u64;
    squared_distance(px, py, cx, cy) <= r * r
}

/// Floating point modulo.
///
/// With `positive` the result is always in `[0, |b|)`, otherwise it keeps the
/// sign of `a` like `%`.
pub fn fmod(a: f32, b: f32, positive: bool) -> f32 {
    if positive {
        a.rem_euclid(b)
    } else {
        a % b
    }
}
