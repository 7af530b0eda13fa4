//! tui-canvas (workspace facade crate).
//!
//! Re-exports the member crates under one name so games depend on a single
//! package: `tui_canvas::{types, core, input, term, audio, engine}`.

pub use tui_canvas_audio as audio;
pub use tui_canvas_core as core;
pub use tui_canvas_engine as engine;
pub use tui_canvas_input as input;
pub use tui_canvas_term as term;
pub use tui_canvas_types as types;
