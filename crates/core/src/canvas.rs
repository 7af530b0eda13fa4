//! Pixel canvas and drawing primitives.
//!
//! The canvas is the logical, resolution-independent grid every primitive
//! draws into. Coordinates are signed; anything outside the grid is clipped
//! silently so drawing code never has to pre-validate positions.

use crate::sprite::Sprite;
use crate::types::Color;

/// Fixed-size grid of palette colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Color::Black; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn center_x(&self) -> i32 {
        self.width as i32 / 2
    }

    pub fn center_y(&self) -> i32 {
        self.height as i32 / 2
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// `set_pixel` on widened coordinates, so callers can offset freely.
    #[inline(always)]
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.plot(x as i64, y as i64, color);
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.idx(x as i64, y as i64).map(|i| self.pixels[i])
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fill the clipped span `[x1, x2)` of row `y`.
    fn hspan(&mut self, x1: i64, x2: i64, y: i64, color: Color) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let start = x1.max(0);
        let end = x2.min(self.width as i64);
        if start >= end {
            return;
        }
        let row = (y as usize) * (self.width as usize);
        self.pixels[row + start as usize..row + end as usize].fill(color);
    }

    /// Digital differential analyzer line. Steps once per pixel along the
    /// dominant axis; both endpoints are drawn.
    ///
    /// Only the steps that can land on the canvas are walked, so far-away
    /// endpoints cost no more than a line across the grid.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let dx = (x2 as i64 - x1 as i64) as f64;
        let dy = (y2 as i64 - y1 as i64) as f64;
        let steps = dx.abs().max(dy.abs());
        if steps == 0.0 {
            self.set_pixel(x1, y1, color);
            return;
        }

        let x_inc = dx / steps;
        let y_inc = dy / steps;
        let Some((lo, hi)) = visible_steps(x1 as f64, x_inc, self.width, 0.0, steps)
            .and_then(|(lo, hi)| visible_steps(y1 as f64, y_inc, self.height, lo, hi))
        else {
            return;
        };
        for i in lo as i64..=hi as i64 {
            let x = x1 as f64 + x_inc * i as f64;
            let y = y1 as f64 + y_inc * i as f64;
            self.plot(x.round() as i64, y.round() as i64, color);
        }
    }

    /// Filled rectangle at `(x, y)` with the given size.
    pub fn rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.fill_rect(x as i64, y as i64, width as i64, height as i64, color);
    }

    fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        for row in y.max(0)..(y + height).min(self.height as i64) {
            self.hspan(x, x + width, row, color);
        }
    }

    /// Filled rectangle between two corners; the bottom-right corner is
    /// exclusive. Corners may be given in any order.
    pub fn rectangle_by_corners(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (left, right) = (x1.min(x2) as i64, x1.max(x2) as i64);
        let (top, bottom) = (y1.min(y2) as i64, y1.max(y2) as i64);
        self.fill_rect(left, top, right - left, bottom - top, color);
    }

    fn outline(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.hspan(x, x + width, y, color);
        self.hspan(x, x + width, y + height - 1, color);
        let rows = (y + 1).max(0)..(y + height - 1).min(self.height as i64);
        for row in rows {
            self.plot(x, row, color);
            self.plot(x + width - 1, row, color);
        }
    }

    /// Rectangle with `stroke` concentric border rings around a filled interior.
    ///
    /// `None` for either color leaves that part of the canvas untouched.
    pub fn rectangle_bordered(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: Option<Color>,
        border: Option<Color>,
        stroke: i32,
    ) {
        let (x, y, width, height) = (x as i64, y as i64, width as i64, height as i64);
        let stroke = stroke.max(0) as i64;
        if let Some(border) = border {
            // Rings past half the short side are empty.
            let rings = stroke.min((width.min(height) + 1) / 2);
            let (cw, ch) = (self.width as i64, self.height as i64);
            // Ring `i` shows only if one of its four edges lies on the canvas.
            let visible = [
                (-x, cw - x),
                (x + width - cw, x + width),
                (-y, ch - y),
                (y + height - ch, y + height),
            ];
            for (lo, hi) in visible {
                for i in lo.max(0)..hi.min(rings) {
                    self.outline(x + i, y + i, width - 2 * i, height - 2 * i, border);
                }
            }
        }
        if let Some(fill) = fill {
            self.fill_rect(
                x + stroke,
                y + stroke,
                width - 2 * stroke,
                height - 2 * stroke,
                fill,
            );
        }
    }

    /// Progress-bar style rectangle.
    ///
    /// The frame and the whole interior take the border color, then a
    /// `percent` share of the interior (clamped to `[0, 1]`) is filled:
    /// columns from the left when `horizontal`, rows from the bottom otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_percent(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: Option<Color>,
        border: Option<Color>,
        stroke: i32,
        percent: f32,
        horizontal: bool,
    ) {
        self.rectangle_bordered(x, y, width, height, border, border, stroke);

        let stroke = stroke.max(0) as i64;
        let inner_x = x as i64 + stroke;
        let inner_y = y as i64 + stroke;
        let inner_w = width as i64 - 2 * stroke;
        let inner_h = height as i64 - 2 * stroke;
        if inner_w <= 0 || inner_h <= 0 {
            return;
        }

        let Some(fill) = fill else {
            return;
        };
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0) as f64
        };
        if horizontal {
            let filled = (inner_w as f64 * percent).round() as i64;
            self.fill_rect(inner_x, inner_y, filled, inner_h, fill);
        } else {
            let filled = (inner_h as f64 * percent).round() as i64;
            self.fill_rect(inner_x, inner_y + inner_h - filled, inner_w, filled, fill);
        }
    }

    /// Midpoint circle. The outline is drawn in `stroke`; `fill` paints the
    /// interior spans first.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, stroke: Color, fill: Option<Color>) {
        if radius < 0 {
            return;
        }
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        if cx + r < 0 || cy + r < 0 || cx - r >= self.width as i64 || cy - r >= self.height as i64 {
            return;
        }

        if let Some(fill) = fill {
            for_each_octant_point(r, |x, y| {
                self.hspan(cx - x, cx + x + 1, cy + y, fill);
                self.hspan(cx - x, cx + x + 1, cy - y, fill);
                self.hspan(cx - y, cx + y + 1, cy + x, fill);
                self.hspan(cx - y, cx + y + 1, cy - x, fill);
            });
        }

        for_each_octant_point(r, |x, y| {
            self.plot(cx + x, cy + y, stroke);
            self.plot(cx - x, cy + y, stroke);
            self.plot(cx + x, cy - y, stroke);
            self.plot(cx - x, cy - y, stroke);
            self.plot(cx + y, cy + x, stroke);
            self.plot(cx - y, cy + x, stroke);
            self.plot(cx + y, cy - x, stroke);
            self.plot(cx - y, cy - x, stroke);
        });
    }

    // ---------------------------------------------------------------------
    // Sprites
    // ---------------------------------------------------------------------

    /// Draw a visible sprite at its own position. `fg` recolors every opaque
    /// pixel.
    pub fn draw_sprite(&mut self, sprite: &Sprite, fg: Option<Color>) {
        let b = sprite.bound();
        self.draw_sprite_at(sprite, b.x1 as f32, b.y1 as f32, fg);
    }

    /// Draw a visible sprite with its top-left corner at `(x, y)`.
    pub fn draw_sprite_at(&mut self, sprite: &Sprite, x: f32, y: f32, fg: Option<Color>) {
        if sprite.visible {
            self.blit(sprite, x.floor() as i32, y.floor() as i32, fg, None);
        }
    }

    /// Like [`draw_sprite`](Self::draw_sprite), but transparent pixels are
    /// filled with `bg`.
    pub fn draw_sprite_solid(&mut self, sprite: &Sprite, fg: Option<Color>, bg: Option<Color>) {
        let b = sprite.bound();
        self.draw_sprite_solid_at(sprite, b.x1 as f32, b.y1 as f32, fg, bg);
    }

    pub fn draw_sprite_solid_at(
        &mut self,
        sprite: &Sprite,
        x: f32,
        y: f32,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        if sprite.visible {
            self.blit(sprite, x.floor() as i32, y.floor() as i32, fg, bg);
        }
    }

    /// Outline of the sprite bound.
    pub fn draw_sprite_rect(&mut self, sprite: &Sprite, color: Color) {
        let b = sprite.bound();
        self.outline(
            b.x1 as i64,
            b.y1 as i64,
            b.width() as i64,
            b.height() as i64,
            color,
        );
    }

    /// Circle used by the circle collision test.
    pub fn draw_sprite_circle(&mut self, sprite: &Sprite, stroke: Color, fill: Option<Color>) {
        self.circle(sprite.cx(), sprite.cy(), sprite.radius() as i32, stroke, fill);
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, fg: Option<Color>, bg: Option<Color>) {
        let (x, y) = (x as i64, y as i64);
        for dy in 0..sprite.height() {
            let py = y + dy as i64;
            if py < 0 || py >= self.height as i64 {
                continue;
            }
            for dx in 0..sprite.width() {
                let px = x + dx as i64;
                match sprite.texel(dx, dy) {
                    Some(color) => self.plot(px, py, fg.unwrap_or(color)),
                    None => {
                        if let Some(bg) = bg {
                            self.plot(px, py, bg);
                        }
                    }
                }
            }
        }
    }

    /// Unscaled blit of one frame, ignoring the sprite's position, scale and
    /// visibility. Used for glyph sheets.
    pub fn draw_frame(
        &mut self,
        sprite: &Sprite,
        frame: i32,
        x: i32,
        y: i32,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        let (fw, fh) = sprite.frame_size();
        for sy in 0..fh as i32 {
            for sx in 0..fw as i32 {
                let color = sprite
                    .frame_pixel(frame, sx, sy)
                    .filter(|c| !sprite.is_transparent(*c));
                let (px, py) = (x as i64 + sx as i64, y as i64 + sy as i64);
                match (color, bg) {
                    (Some(color), _) => self.plot(px, py, fg.unwrap_or(color)),
                    (None, Some(bg)) => self.plot(px, py, bg),
                    (None, None) => {}
                }
            }
        }
    }
}

/// Range of DDA steps within `[lo, hi]` whose coordinate `start + inc * i`
/// can round onto `0..extent`, widened by one step on each side.
fn visible_steps(start: f64, inc: f64, extent: u16, lo: f64, hi: f64) -> Option<(f64, f64)> {
    let extent = extent as f64;
    if inc == 0.0 {
        let p = start.round();
        return (p >= 0.0 && p < extent).then_some((lo, hi));
    }
    let a = (-0.5 - start) / inc;
    let b = (extent - 0.5 - start) / inc;
    let lo = lo.max(a.min(b).floor() - 1.0);
    let hi = hi.min(a.max(b).ceil() + 1.0);
    (lo <= hi).then_some((lo, hi))
}

/// Visit the first-octant points of a midpoint circle of the given radius.
fn for_each_octant_point(radius: i64, mut f: impl FnMut(i64, i64)) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        f(x, y);
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
