//! Keyboard and mouse input for the engine.
//!
//! Events come from an [`InputSource`]: the live terminal through `crossterm`,
//! or a scripted sequence for headless runs. [`InputManager`] turns them into
//! per-frame key states with pressed/released edges. Terminals without
//! key-release events are handled with a release timeout.

pub mod hotkeys;
pub mod key;
pub mod manager;
pub mod source;

pub use tui_canvas_types as types;

pub use crossterm::event::{KeyCode, MouseButton};
pub use hotkeys::{is_interrupt, Hotkey};
pub use key::{Key, KeyState, SHIFT};
pub use manager::InputManager;
pub use source::{CrosstermSource, EventBatch, InputSource, ScriptedSource};
