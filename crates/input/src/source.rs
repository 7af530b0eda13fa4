//! Device event sources.
//!
//! A source hands the input manager the events that arrived since the last
//! frame. The terminal source drains crossterm's queue without blocking; the
//! scripted source replays prepared batches for headless runs and tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event};

/// Upper bound on events consumed per frame. Anything beyond stays queued
/// in the device and is picked up next frame.
pub const MAX_EVENTS_PER_FRAME: usize = 64;

pub type EventBatch = ArrayVec<Event, MAX_EVENTS_PER_FRAME>;

pub trait InputSource {
    /// Move pending events into `out` without blocking.
    fn drain(&mut self, out: &mut EventBatch) -> io::Result<()>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermSource;

impl CrosstermSource {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermSource {
    fn drain(&mut self, out: &mut EventBatch) -> io::Result<()> {
        while !out.is_full() && event::poll(Duration::ZERO)? {
            out.push(event::read()?);
        }
        Ok(())
    }
}

/// Replays one prepared batch per frame; empty frames once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<Event>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered on the next unconsumed frame.
    pub fn push_frame(&mut self, events: Vec<Event>) -> &mut Self {
        self.frames.push_back(events);
        self
    }

    /// Queue `n` frames without events.
    pub fn push_idle(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.frames.push_back(Vec::new());
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedSource {
    fn drain(&mut self, out: &mut EventBatch) -> io::Result<()> {
        if let Some(events) = self.frames.pop_front() {
            for ev in events.into_iter().take(out.remaining_capacity()) {
                out.push(ev);
            }
        }
        Ok(())
    }
}
