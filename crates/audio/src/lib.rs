//! Sound effects with a single voice.
//!
//! [`Audio`] owns the sound on/off switch and decides whether a request may
//! cut off the sound that is already playing. The actual output happens in a
//! [`SoundBackend`]: [`SilentBackend`] and [`MemoryBackend`] always exist,
//! `RodioBackend` needs the `playback` feature.

mod backend;
#[cfg(feature = "playback")]
mod device;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

pub use backend::{MemoryBackend, SilentBackend, SoundBackend};
#[cfg(feature = "playback")]
pub use device::RodioBackend;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("cannot open sound {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot play sound {}: {reason}", path.display())]
    Playback { path: PathBuf, reason: String },
    #[error("no audio output device: {0}")]
    Device(String),
}

#[derive(Debug, Clone, Copy)]
struct Voice {
    started: Instant,
    duration: Duration,
}

/// One-voice sound player.
///
/// A sound started with a duration holds the voice for that long: ordinary
/// requests arriving meanwhile are dropped, priority requests replace it.
/// A duration of zero never holds the voice.
#[derive(Debug)]
pub struct Audio {
    enabled: bool,
    backend: Box<dyn SoundBackend>,
    voice: Option<Voice>,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
    }
}

impl Audio {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self {
            enabled: true,
            backend,
            voice: None,
        }
    }

    /// Swap the output, silencing the old one.
    pub fn set_backend(&mut self, backend: Box<dyn SoundBackend>) {
        self.backend.stop();
        self.backend = backend;
        self.voice = None;
    }

    /// Turning sound off stops the current sound.
    pub fn set_sound(&mut self, on: bool) {
        if !on {
            self.stop();
        }
        self.enabled = on;
    }

    pub fn is_sound(&self) -> bool {
        self.enabled
    }

    /// True while the current sound still holds the voice.
    pub fn is_busy_at(&self, now: Instant) -> bool {
        self.voice
            .is_some_and(|v| now.saturating_duration_since(v.started) < v.duration)
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy_at(Instant::now())
    }

    /// Play `path` for `duration` seconds. Returns whether the sound was
    /// started; `false` when sound is off or the voice is held.
    pub fn play(
        &mut self,
        path: impl AsRef<Path>,
        duration: f32,
        priority: bool,
    ) -> Result<bool, AudioError> {
        self.play_at(path, duration, priority, Instant::now())
    }

    pub fn play_at(
        &mut self,
        path: impl AsRef<Path>,
        duration: f32,
        priority: bool,
        now: Instant,
    ) -> Result<bool, AudioError> {
        let path = path.as_ref();
        if !self.enabled {
            return Ok(false);
        }
        if !priority && self.is_busy_at(now) {
            debug!(sound = %path.display(), "sound_skipped_voice_busy");
            return Ok(false);
        }

        if let Err(e) = self.backend.play(path) {
            warn!(sound = %path.display(), error = %e, "sound_play_failed");
            self.voice = None;
            return Err(e);
        }
        self.voice = Some(Voice {
            started: now,
            duration: hold_time(duration),
        });
        debug!(sound = %path.display(), duration, priority, "sound_started");
        Ok(true)
    }

    pub fn stop(&mut self) {
        self.backend.stop();
        self.voice = None;
    }
}

fn hold_time(seconds: f32) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
