//! Sprite object model.
//!
//! A [`Sprite`] owns a palette image split into equally sized frames, a
//! position with velocity/acceleration, scale factors and a set of named
//! animations. Every mutation of position, scale or frame recomputes the
//! derived bound, so the bound read by drawing and collision code is always
//! current.
//!
//! Sprites are plain values: `clone()` duplicates the pixel buffer and the
//! animation map, so a loaded sprite can be copied and each copy rescaled or
//! moved independently.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::animation::Animation;
use crate::asset::{self, AssetError, SpriteImage};
use crate::types::{Color, Rect, PLACEHOLDER_COLOR, PLACEHOLDER_SIZE};

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("animation sequence must contain at least one frame")]
    EmptySequence,
    #[error("frame size {frame_w}x{frame_h} does not fit image {image_w}x{image_h}")]
    InvalidFrameSize {
        frame_w: u16,
        frame_h: u16,
        image_w: u16,
        image_h: u16,
    },
    #[error("pixel buffer has {actual} entries, expected {expected}")]
    PixelCount { expected: usize, actual: usize },
    #[error(transparent)]
    Asset(#[from] AssetError),
}

#[derive(Debug, Clone)]
pub struct Sprite {
    image_w: u16,
    image_h: u16,
    pixels: Vec<Color>,

    frame_w: u16,
    frame_h: u16,
    frames_in_row: u16,
    frames_in_col: u16,
    frames_total: i32,
    frame: i32,

    transparent: Option<Color>,

    animations: HashMap<String, Animation>,
    active: Option<Animation>,

    scale_x: f32,
    scale_y: f32,
    width: i32,
    height: i32,
    rx: f32,
    ry: f32,
    radius: f32,
    bound: Rect,

    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    ax: f32,
    ay: f32,

    pub visible: bool,
    pub alive: bool,
    /// Free-form gameplay counters.
    pub counter: i32,
    pub lives: i32,
    pub health: i32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Sprite {
    /// Create a sprite showing the solid placeholder until an image is loaded.
    pub fn new(transparent: Option<Color>) -> Self {
        let size = PLACEHOLDER_SIZE;
        let mut sprite = Self {
            image_w: 0,
            image_h: 0,
            pixels: Vec::new(),
            frame_w: 0,
            frame_h: 0,
            frames_in_row: 0,
            frames_in_col: 0,
            frames_total: 0,
            frame: 0,
            transparent,
            animations: HashMap::new(),
            active: None,
            scale_x: 1.0,
            scale_y: 1.0,
            width: 0,
            height: 0,
            rx: 0.0,
            ry: 0.0,
            radius: 0.0,
            bound: Rect::default(),
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            ay: 0.0,
            visible: false,
            alive: false,
            counter: 0,
            lives: 0,
            health: 0,
        };
        sprite.set_image(SpriteImage {
            width: size,
            height: size,
            pixels: vec![PLACEHOLDER_COLOR; size as usize * size as usize],
        });
        sprite
    }

    /// Build a sprite from an in-memory pixel buffer.
    pub fn from_pixels(
        width: u16,
        height: u16,
        pixels: Vec<Color>,
        frame_w: u16,
        frame_h: u16,
        transparent: Option<Color>,
    ) -> Result<Self, SpriteError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected || expected == 0 {
            return Err(SpriteError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        let mut sprite = Self::new(transparent);
        sprite.apply_image(
            SpriteImage {
                width,
                height,
                pixels,
            },
            frame_w,
            frame_h,
        )?;
        Ok(sprite)
    }

    /// A single-frame sprite filled with one color.
    pub fn solid(width: u16, height: u16, color: Color) -> Self {
        let mut sprite = Self::new(None);
        sprite.set_image(SpriteImage {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![color; width.max(1) as usize * height.max(1) as usize],
        });
        sprite
    }

    /// Load an asset from memory, falling back to the placeholder on failure.
    ///
    /// A `frame_w`/`frame_h` of zero uses the full image extent. The return
    /// value only reports whether the asset was accepted.
    pub fn load(&mut self, bytes: &[u8], frame_w: u16, frame_h: u16) -> bool {
        let result = asset::decode(bytes)
            .map_err(SpriteError::from)
            .and_then(|image| self.apply_image(image, frame_w, frame_h));
        self.finish_load(result, None)
    }

    /// Load an asset file, falling back to the placeholder on failure.
    pub fn load_file(&mut self, path: impl AsRef<Path>, frame_w: u16, frame_h: u16) -> bool {
        let path = path.as_ref();
        let result = asset::read_file(path)
            .map_err(SpriteError::from)
            .and_then(|image| self.apply_image(image, frame_w, frame_h));
        self.finish_load(result, Some(path))
    }

    /// Load from memory, reporting the failure reason without falling back.
    pub fn try_load(&mut self, bytes: &[u8], frame_w: u16, frame_h: u16) -> Result<(), SpriteError> {
        let image = asset::decode(bytes)?;
        self.apply_image(image, frame_w, frame_h)
    }

    fn finish_load(&mut self, result: Result<(), SpriteError>, path: Option<&Path>) -> bool {
        match result {
            Ok(()) => {
                debug!(
                    image_w = self.image_w,
                    image_h = self.image_h,
                    frames = self.frames_total,
                    "sprite_loaded"
                );
                true
            }
            Err(error) => {
                warn!(
                    error = %error,
                    path = ?path,
                    "sprite_load_failed"
                );
                self.set_placeholder();
                false
            }
        }
    }

    fn set_placeholder(&mut self) {
        let size = PLACEHOLDER_SIZE;
        self.set_image(SpriteImage {
            width: size,
            height: size,
            pixels: vec![PLACEHOLDER_COLOR; size as usize * size as usize],
        });
    }

    fn apply_image(
        &mut self,
        image: SpriteImage,
        frame_w: u16,
        frame_h: u16,
    ) -> Result<(), SpriteError> {
        let fw = if frame_w == 0 { image.width } else { frame_w };
        let fh = if frame_h == 0 { image.height } else { frame_h };
        if fw > image.width || fh > image.height {
            return Err(SpriteError::InvalidFrameSize {
                frame_w: fw,
                frame_h: fh,
                image_w: image.width,
                image_h: image.height,
            });
        }
        self.set_frames(image, fw, fh);
        Ok(())
    }

    fn set_image(&mut self, image: SpriteImage) {
        let (w, h) = (image.width, image.height);
        self.set_frames(image, w, h);
    }

    fn set_frames(&mut self, image: SpriteImage, frame_w: u16, frame_h: u16) {
        self.image_w = image.width;
        self.image_h = image.height;
        self.pixels = image.pixels;
        self.frame_w = frame_w;
        self.frame_h = frame_h;
        self.frames_in_row = image.width / frame_w;
        self.frames_in_col = image.height / frame_h;
        self.frames_total = self.frames_in_row as i32 * self.frames_in_col as i32;
        self.frame = 0;
        self.update_bound();
    }

    // ---------------------------------------------------------------------
    // Frames and scale
    // ---------------------------------------------------------------------

    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.scale_x = scale_x.max(0.0);
        self.scale_y = scale_y.max(0.0);
        self.update_bound();
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    /// Select a frame; `n` wraps around the frame count in both directions.
    pub fn set_frame(&mut self, n: i32) {
        self.frame = n.rem_euclid(self.frames_total.max(1));
        self.update_bound();
    }

    pub fn next_frame(&mut self, steps: i32) {
        self.set_frame(self.frame.wrapping_add(steps));
    }

    pub fn frame(&self) -> i32 {
        self.frame
    }

    pub fn frames_in_row(&self) -> u16 {
        self.frames_in_row
    }

    pub fn frames_in_col(&self) -> u16 {
        self.frames_in_col
    }

    pub fn total_frames(&self) -> i32 {
        self.frames_total
    }

    pub fn frame_size(&self) -> (u16, u16) {
        (self.frame_w, self.frame_h)
    }

    pub fn image_size(&self) -> (u16, u16) {
        (self.image_w, self.image_h)
    }

    /// Scaled width in canvas pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Scaled height in canvas pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    // ---------------------------------------------------------------------
    // Pixels
    // ---------------------------------------------------------------------

    pub fn transparent(&self) -> Option<Color> {
        self.transparent
    }

    pub fn is_transparent(&self, color: Color) -> bool {
        self.transparent == Some(color)
    }

    /// Raw color at `(x, y)` of the current frame, `None` outside the frame.
    pub fn pixel_color(&self, x: i32, y: i32) -> Option<Color> {
        self.frame_pixel(self.frame, x, y)
    }

    /// Raw color at `(x, y)` of any frame, `None` outside the frame.
    pub fn frame_pixel(&self, frame: i32, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.frame_w as i32 || y >= self.frame_h as i32 {
            return None;
        }
        let frame = frame.rem_euclid(self.frames_total.max(1));
        let row = self.frames_in_row.max(1) as i32;
        let fx = (frame % row) * self.frame_w as i32;
        let fy = (frame / row) * self.frame_h as i32;
        let idx = (fy + y) as usize * self.image_w as usize + (fx + x) as usize;
        self.pixels.get(idx).copied()
    }

    /// Opaque color drawn at offset `(dx, dy)` inside the scaled bound.
    ///
    /// This is the single mapping from canvas space back to frame texels; both
    /// blitting and pixel collision go through it.
    pub fn texel(&self, dx: i32, dy: i32) -> Option<Color> {
        if dx < 0 || dy < 0 || dx >= self.width || dy >= self.height {
            return None;
        }
        let sx = (dx as i64 * self.frame_w as i64 / self.width as i64) as i32;
        let sy = (dy as i64 * self.frame_h as i64 / self.height as i64) as i32;
        self.pixel_color(sx, sy)
            .filter(|color| !self.is_transparent(*color))
    }

    // ---------------------------------------------------------------------
    // Animations
    // ---------------------------------------------------------------------

    /// Register an animation. A zero `duration` makes it a static display.
    pub fn add_animation(
        &mut self,
        name: impl Into<String>,
        sequence: impl Into<Vec<i32>>,
        duration: f32,
    ) -> Result<(), SpriteError> {
        let animation = Animation::new(sequence.into(), duration)?;
        self.animations.insert(name.into(), animation);
        Ok(())
    }

    pub fn set_animation(&mut self, name: &str, frame_offset: usize) -> bool {
        self.set_animation_at(name, frame_offset, Instant::now())
    }

    /// Copy the named animation into the active slot and show its first step.
    pub fn set_animation_at(&mut self, name: &str, frame_offset: usize, now: Instant) -> bool {
        let Some(template) = self.animations.get(name) else {
            warn!(animation = name, "unknown_animation");
            return false;
        };
        let mut animation = template.clone();
        animation.restart(now);
        let frame = animation.frame(frame_offset);
        self.active = Some(animation);
        self.set_frame(frame);
        true
    }

    pub fn play_animation(&mut self, frame_offset: usize) {
        self.play_animation_at(frame_offset, Instant::now());
    }

    pub fn play_animation_at(&mut self, frame_offset: usize, now: Instant) {
        let Some(animation) = self.active.as_mut() else {
            return;
        };
        if animation.is_static() {
            return;
        }
        animation.tick(now);
        let frame = animation.frame(frame_offset);
        self.set_frame(frame);
    }

    /// True once the active animation has wrapped `loops` times.
    pub fn is_animation_played(&self, loops: u32) -> bool {
        self.active
            .as_ref()
            .is_some_and(|animation| animation.loops() >= loops)
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    // ---------------------------------------------------------------------
    // Movement
    // ---------------------------------------------------------------------

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.update_bound();
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vx = vx;
        self.vy = vy;
    }

    pub fn set_accel(&mut self, ax: f32, ay: f32) {
        self.ax = ax;
        self.ay = ay;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Semi-implicit Euler step: velocity first, then position.
    pub fn update_position(&mut self, dt: f32) {
        self.vx += self.ax * dt;
        self.vy += self.ay * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.update_bound();
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn vx(&self) -> f32 {
        self.vx
    }

    pub fn vy(&self) -> f32 {
        self.vy
    }

    pub fn ax(&self) -> f32 {
        self.ax
    }

    pub fn ay(&self) -> f32 {
        self.ay
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn accel(&self) -> (f32, f32) {
        (self.ax, self.ay)
    }

    // ---------------------------------------------------------------------
    // Bound
    // ---------------------------------------------------------------------

    fn update_bound(&mut self) {
        self.width = (self.frame_w as f32 * self.scale_x).round().max(0.0) as i32;
        self.height = (self.frame_h as f32 * self.scale_y).round().max(0.0) as i32;
        self.rx = self.width as f32 / 2.0;
        self.ry = self.height as f32 / 2.0;
        self.radius = self.rx.max(self.ry);
        self.bound = Rect::from_xywh(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.width,
            self.height,
        );
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    pub fn cx(&self) -> i32 {
        self.bound.cx
    }

    pub fn cy(&self) -> i32 {
        self.bound.cy
    }

    pub fn rx(&self) -> f32 {
        self.rx
    }

    pub fn ry(&self) -> f32 {
        self.ry
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}
