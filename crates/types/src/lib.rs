//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data types used by every other crate in the
//! workspace. Nothing here performs I/O or depends on a terminal backend, so the
//! types are usable from drawing code, the game loop and tests alike.
//!
//! # Palette
//!
//! All drawing uses a fixed 16-entry palette addressed by a 4-bit index:
//!
//! | Index | Color | Index | Color |
//! |-------|-------|-------|-------|
//! | 0 | Black | 8 | DarkGrey |
//! | 1 | DarkBlue | 9 | Blue |
//! | 2 | DarkGreen | 10 | Green |
//! | 3 | DarkCyan | 11 | Cyan |
//! | 4 | DarkRed | 12 | Red |
//! | 5 | DarkMagenta | 13 | Magenta |
//! | 6 | DarkYellow | 14 | Yellow |
//! | 7 | Grey | 15 | White |
//!
//! There is no alpha channel. "No color" (transparent, or "keep the original
//! color" for overrides) is expressed as `Option::<Color>::None`.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_CANVAS_WIDTH` | 160 | Canvas columns |
//! | `DEFAULT_CANVAS_HEIGHT` | 100 | Canvas rows |
//! | `DEFAULT_FPS` | 60 | Desired frames per second |
//! | `BACK_COLOR_OFFSET` | 16 | Multiplier applied to every written cell attribute |
//!
//! # Examples
//!
//! ```
//! use tui_canvas_types::{Color, Rect};
//!
//! assert_eq!(Color::from_index(12), Some(Color::Red));
//! assert_eq!(Color::from_index(16), None);
//!
//! let a = Rect::from_xywh(0, 0, 10, 10);
//! let b = Rect::from_xywh(5, 5, 10, 10);
//! assert!(a.intersects(&b));
//! ```

pub mod rng;
pub mod util;

pub use rng::SimpleRng;

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u16 = 160;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u16 = 100;

/// Default desired frame rate.
pub const DEFAULT_FPS: f32 = 60.0;

/// Attribute multiplier applied to every cell written to a display surface.
///
/// A value of 16 moves the palette index into the background nibble.
pub const BACK_COLOR_OFFSET: u16 = 16;

/// Size of the solid placeholder a sprite degrades to when loading fails.
pub const PLACEHOLDER_SIZE: u16 = 8;

/// Color of the solid placeholder sprite.
pub const PLACEHOLDER_COLOR: Color = Color::Green;

/// Font names cycled by the font-name hotkey.
pub const FONT_NAMES: [&str; 5] = [
    "Consolas",
    "Lucida Console",
    "Raster",
    "ProggyCleanTT NF",
    "TerminessTTF NF",
];

/// Inclusive font size range accepted by configuration edits.
pub const FONT_SIZE_RANGE: (u16, u16) = (1, 64);

/// Inclusive font weight range and step accepted by configuration edits.
pub const FONT_WEIGHT_RANGE: (u16, u16) = (100, 900);
pub const FONT_WEIGHT_STEP: u16 = 100;

/// Normal font weight.
pub const FONT_WEIGHT_NORMAL: u16 = 400;

/// Inclusive zoom range accepted by configuration edits.
pub const ZOOM_RANGE: (u16, u16) = (1, 16);

/// One of the 16 palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkCyan = 3,
    DarkRed = 4,
    DarkMagenta = 5,
    DarkYellow = 6,
    Grey = 7,
    DarkGrey = 8,
    Blue = 9,
    Green = 10,
    Cyan = 11,
    Red = 12,
    Magenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// All palette entries in index order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Grey,
        Color::DarkGrey,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Palette index (0..=15).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Convert a raw palette index into a color.
    ///
    /// Returns `None` for anything outside `0..=15`.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Reference RGB value of this palette entry.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0, 0, 0),
            Color::DarkBlue => (0, 0, 128),
            Color::DarkGreen => (0, 128, 0),
            Color::DarkCyan => (0, 128, 128),
            Color::DarkRed => (128, 0, 0),
            Color::DarkMagenta => (128, 0, 128),
            Color::DarkYellow => (128, 128, 0),
            Color::Grey => (192, 192, 192),
            Color::DarkGrey => (128, 128, 128),
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Cyan => (0, 255, 255),
            Color::Red => (255, 0, 0),
            Color::Magenta => (255, 0, 255),
            Color::Yellow => (255, 255, 0),
            Color::White => (255, 255, 255),
        }
    }
}

/// Axis-aligned rectangle in canvas space.
///
/// `(x1, y1)` is the top-left corner (inclusive), `(x2, y2)` the bottom-right
/// corner (exclusive), `(cx, cy)` the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub cx: i32,
    pub cy: i32,
}

impl Rect {
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            cx: midpoint(x1, x2),
            cy: midpoint(y1, y2),
        }
    }

    /// Corners saturate at the `i32` range.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_corners(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::from_corners(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        ))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    (a as i64 + (b as i64 - a as i64) / 2) as i32
}

/// Horizontal text alignment relative to the anchor x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A named display preset: font request plus zoom factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub font_name: String,
    pub font_size: u16,
    pub font_weight: u16,
    pub zoom_x: u16,
    pub zoom_y: u16,
}

impl Configuration {
    pub fn new(
        name: impl Into<String>,
        font_name: impl Into<String>,
        font_size: u16,
        font_weight: u16,
        zoom_x: u16,
        zoom_y: u16,
    ) -> Self {
        Self {
            name: name.into(),
            font_name: font_name.into(),
            font_size,
            font_weight,
            zoom_x,
            zoom_y,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new("default", FONT_NAMES[0], 2, FONT_WEIGHT_NORMAL, 1, 1)
    }
}
