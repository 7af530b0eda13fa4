//! Terminal display for the engine.
//!
//! The loop composites the pixel canvas into a [`WindowBuffer`] at the
//! current zoom and hands it to a [`CellSink`]. [`TerminalSurface`] is the
//! crossterm-backed sink; [`MemorySurface`] keeps frames in memory for
//! headless runs and tests.

pub mod renderer;
pub mod surface;
pub mod window;

pub use tui_canvas_core as core;
pub use tui_canvas_types as types;

pub use renderer::{encode_diff_into, encode_full_into, TerminalSurface};
pub use surface::{decode_attribute, encode_attribute, CellSink, MemorySurface};
pub use window::WindowBuffer;
