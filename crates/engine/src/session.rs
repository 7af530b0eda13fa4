//! Loop state, quit signalling and frame timing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Paused,
    /// Absorbing: the loop finishes the current frame and returns.
    Terminated,
}

/// Cross-thread quit request. Clone it into a signal handler or a worker
/// thread; the loop polls it once per frame.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle {
    flag: Arc<AtomicBool>,
}

impl QuitHandle {
    pub fn request_quit(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_quit_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    state: LoopState,
    quit: QuitHandle,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    pub fn is_terminated(&self) -> bool {
        self.state == LoopState::Terminated
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    /// Pause hotkey: Running <-> Paused. No effect once terminated.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            LoopState::Running => LoopState::Paused,
            LoopState::Paused => LoopState::Running,
            LoopState::Terminated => LoopState::Terminated,
        };
    }

    /// Focus loss pauses but never resumes.
    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Paused;
        }
    }

    pub fn terminate(&mut self) {
        self.state = LoopState::Terminated;
    }

    /// Fold an external quit request into the state machine.
    pub fn sync_quit(&mut self) -> bool {
        if self.quit.is_quit_requested() {
            self.state = LoopState::Terminated;
        }
        self.is_terminated()
    }
}

/// Measures each frame and computes the sleep needed to hold the desired
/// frame rate.
///
/// Two quantities are tracked: the work time of a frame (start to stop),
/// which decides the sleep, and the interval between successive frame
/// starts, which is what games see as elapsed time and fps.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    desired: Duration,
    start: Option<Instant>,
    work: Duration,
    elapsed: Duration,
    fps: f32,
}

impl FrameTimer {
    pub fn new(desired_fps: f32) -> Self {
        let fps = if desired_fps.is_finite() && desired_fps > 0.0 {
            desired_fps
        } else {
            crate::types::DEFAULT_FPS
        };
        Self {
            desired: Duration::from_secs_f64(1.0 / fps as f64),
            start: None,
            work: Duration::ZERO,
            elapsed: Duration::ZERO,
            fps: 0.0,
        }
    }

    pub fn desired(&self) -> Duration {
        self.desired
    }

    /// Open a frame. The time since the previous frame start becomes the
    /// elapsed time; the first frame reports zero.
    pub fn start(&mut self, now: Instant) {
        if let Some(prev) = self.start {
            self.elapsed = now.saturating_duration_since(prev);
            let secs = self.elapsed.as_secs_f32();
            self.fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };
        }
        self.start = Some(now);
    }

    /// Close the frame and record its work time.
    pub fn stop(&mut self, now: Instant) {
        self.work = self
            .start
            .map_or(Duration::ZERO, |s| now.saturating_duration_since(s));
    }

    /// Time between the last two frame starts, sleep included.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Work time of the last closed frame.
    pub fn work(&self) -> Duration {
        self.work
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// `max(0, desired - work)`.
    pub fn remaining(&self) -> Duration {
        self.desired.saturating_sub(self.work)
    }

    pub fn sleep(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}
