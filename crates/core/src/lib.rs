//! Core drawing and sprite module - pure and testable
//!
//! Everything in this crate works on in-memory data only: no terminal access
//! and no global state. Animation methods that read the wall clock have `*_at`
//! twins taking an explicit `Instant`, so playback can be tested exactly.
//!
//! # Module Structure
//!
//! - [`canvas`]: fixed-size palette pixel grid and the drawing primitives
//!   (pixels, DDA lines, rectangles, progress bars, midpoint circles, sprite blits)
//! - [`sprite`]: framed, scalable sprite with movement and named animations
//! - [`animation`]: frame-sequence clock with loop counting
//! - [`collision`]: rect/rect, circle/circle and pixel/pixel tests between sprites
//! - [`text`]: bitmap-font text rendering from a glyph sheet sprite
//! - [`asset`]: binary sprite file codec
//!
//! # Example
//!
//! ```
//! use tui_canvas_core::{PixelCanvas, Sprite};
//! use tui_canvas_types::Color;
//!
//! let mut canvas = PixelCanvas::new(32, 16);
//! canvas.clear(Color::DarkBlue);
//! canvas.line(0, 0, 31, 15, Color::Yellow);
//!
//! let mut ship = Sprite::solid(4, 2, Color::White);
//! ship.set_position(10.0, 5.0);
//! ship.set_visible(true);
//! canvas.draw_sprite(&ship, None);
//!
//! assert_eq!(canvas.get_pixel(10, 5), Some(Color::White));
//! ```

pub mod animation;
pub mod asset;
pub mod canvas;
pub mod collision;
pub mod sprite;
pub mod text;

pub use tui_canvas_types as types;

pub use animation::Animation;
pub use asset::{AssetError, SpriteImage};
pub use canvas::PixelCanvas;
pub use sprite::{Sprite, SpriteError};
pub use text::{TextProperties, TextRenderer};
