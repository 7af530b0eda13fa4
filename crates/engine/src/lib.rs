//! Game loop and engine context.
//!
//! A game implements [`Game`] and is driven by [`GameLoop::run`], which owns
//! the frame sequence: input polling, the reserved hotkeys (F1-F8 display
//! settings, `P` pause, `Esc` quit), the game callback, compositing the
//! canvas at the live zoom and presenting it on a [`term::CellSink`].
//!
//! Configuration comes from [`EngineConfig`], loadable from JSON.

pub mod config;
pub mod engine;
pub mod game_loop;
pub mod hud;
pub mod session;

pub use tui_canvas_audio as audio;
pub use tui_canvas_core as core;
pub use tui_canvas_input as input;
pub use tui_canvas_term as term;
pub use tui_canvas_types as types;

pub use config::{validate_preset, ConfigError, ConfigurationRegistry, EngineConfig};
pub use engine::{Engine, EngineError};
pub use game_loop::{Game, GameLoop, LoopSummary};
pub use hud::{StatusInfo, BAR_HEIGHT};
pub use session::{FrameTimer, LoopState, QuitHandle, SessionState};
