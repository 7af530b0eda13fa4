//! Per-frame input polling with edge detection.
//!
//! Terminals deliver key events, not key states. The manager folds each
//! frame's events into a raw "is down" table and then derives level and
//! transition flags for every watched key by comparing against the previous
//! frame.
//!
//! Many terminals never report key releases. Until the first release event
//! is seen, a key counts as released once no press or auto-repeat has arrived
//! for `release_timeout`.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::hotkeys::is_interrupt;
use crate::key::{normalize, Key, KeyState, SHIFT};
use crate::source::{EventBatch, InputSource};

// Long enough to bridge the OS delay before auto-repeat starts.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone, Copy)]
struct RawKey {
    down: bool,
    last_seen: Instant,
}

#[derive(Debug)]
pub struct InputManager {
    raw: HashMap<KeyCode, RawKey>,
    watched: HashMap<KeyCode, Key>,
    release_events_seen: bool,
    release_timeout: Duration,

    mouse_raw: [bool; 3],
    mouse: [KeyState; 3],
    mouse_cell: (u16, u16),
    mouse_x: i32,
    mouse_y: i32,

    focus_lost: bool,
    focus_gained: bool,
    interrupt: bool,

    batch: EventBatch,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            raw: HashMap::new(),
            watched: HashMap::new(),
            release_events_seen: false,
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            mouse_raw: [false; 3],
            mouse: [KeyState::default(); 3],
            mouse_cell: (0, 0),
            mouse_x: 0,
            mouse_y: 0,
            focus_lost: false,
            focus_gained: false,
            interrupt: false,
            batch: EventBatch::new(),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Poll the source once and refresh every watched key and mouse button.
    ///
    /// `zoom_x`/`zoom_y` convert the mouse position from window cells to
    /// canvas pixels.
    pub fn update(
        &mut self,
        source: &mut dyn InputSource,
        zoom_x: u16,
        zoom_y: u16,
        now: Instant,
    ) -> io::Result<()> {
        self.focus_lost = false;
        self.focus_gained = false;
        self.interrupt = false;

        let mut batch = std::mem::take(&mut self.batch);
        batch.clear();
        source.drain(&mut batch)?;
        for event in &batch {
            self.apply(event, now);
        }
        self.batch = batch;

        if !self.release_events_seen {
            let timeout = self.release_timeout;
            for raw in self.raw.values_mut() {
                if raw.down && now.saturating_duration_since(raw.last_seen) > timeout {
                    raw.down = false;
                }
            }
        }

        let raw = &self.raw;
        for (code, key) in self.watched.iter_mut() {
            key.update(raw.get(code).is_some_and(|r| r.down));
        }
        for (state, down) in self.mouse.iter_mut().zip(self.mouse_raw) {
            state.update(down);
        }

        self.mouse_x = (self.mouse_cell.0 / zoom_x.max(1)) as i32;
        self.mouse_y = (self.mouse_cell.1 / zoom_y.max(1)) as i32;
        Ok(())
    }

    fn apply(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => {
                let pressed = key.kind != KeyEventKind::Release;
                if pressed && is_interrupt(*key) {
                    self.interrupt = true;
                    return;
                }
                if !pressed {
                    self.release_events_seen = true;
                }
                self.set_raw(normalize(key.code), pressed, now);
                // Every key event carries the current Shift level.
                if !matches!(key.code, KeyCode::Modifier(_)) {
                    self.set_raw(SHIFT, key.modifiers.contains(KeyModifiers::SHIFT), now);
                }
            }
            Event::Mouse(mouse) => {
                self.mouse_cell = (mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(button) => self.mouse_raw[button_index(button)] = true,
                    MouseEventKind::Up(button) => self.mouse_raw[button_index(button)] = false,
                    _ => {}
                }
            }
            Event::FocusLost => self.focus_lost = true,
            Event::FocusGained => self.focus_gained = true,
            _ => {}
        }
    }

    fn set_raw(&mut self, code: KeyCode, down: bool, now: Instant) {
        let entry = self.raw.entry(code).or_insert(RawKey {
            down,
            last_seen: now,
        });
        entry.down = down;
        entry.last_seen = now;
    }

    /// Raw level of a key as of the last update.
    pub fn is_raw_down(&self, code: KeyCode) -> bool {
        self.raw.get(&normalize(code)).is_some_and(|r| r.down)
    }

    /// State of a key, watching it from now on.
    ///
    /// Watched keys are refreshed on every update, so their pressed/released
    /// flags are exact frame-to-frame transitions.
    pub fn key(&mut self, code: KeyCode) -> Key {
        let code = normalize(code);
        let raw_down = self.is_raw_down(code);
        *self.watched.entry(code).or_insert_with(|| {
            let mut key = Key::new(code);
            key.update(raw_down);
            key
        })
    }

    /// Refresh a caller-owned key from the raw table.
    ///
    /// Call once per frame per key; calling twice collapses the edge.
    pub fn handle_key(&self, key: &mut Key) {
        key.update(self.is_raw_down(key.code()));
    }

    /// Button state; left, right and middle are tracked.
    pub fn mouse(&self, button: MouseButton) -> KeyState {
        self.mouse[button_index(button)]
    }

    /// Mouse x in canvas pixels.
    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    /// Mouse y in canvas pixels.
    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    pub fn focus_lost(&self) -> bool {
        self.focus_lost
    }

    pub fn focus_gained(&self) -> bool {
        self.focus_gained
    }

    /// Ctrl+C arrived this frame.
    pub fn interrupt_requested(&self) -> bool {
        self.interrupt
    }
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}
