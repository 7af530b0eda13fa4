use std::cell::RefCell;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::AudioError;

/// Sound output device.
pub trait SoundBackend: Debug {
    /// Start `path`, cutting off whatever is playing.
    fn play(&mut self, path: &Path) -> Result<(), AudioError>;

    fn stop(&mut self);
}

/// Discards every sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

impl SoundBackend for SilentBackend {
    fn play(&mut self, _path: &Path) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Default)]
struct Log {
    played: Vec<PathBuf>,
    stops: u32,
    fail_next: bool,
}

/// Records requests instead of playing them. Clones share one log, so a
/// clone kept outside [`crate::Audio`] can inspect what was played.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    log: Rc<RefCell<Log>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.log.borrow().played.clone()
    }

    pub fn stops(&self) -> u32 {
        self.log.borrow().stops
    }

    /// Make the next `play` fail.
    pub fn fail_next(&self) {
        self.log.borrow_mut().fail_next = true;
    }
}

impl SoundBackend for MemoryBackend {
    fn play(&mut self, path: &Path) -> Result<(), AudioError> {
        let mut log = self.log.borrow_mut();
        if std::mem::take(&mut log.fail_next) {
            return Err(AudioError::Playback {
                path: path.to_path_buf(),
                reason: "rejected by memory backend".to_string(),
            });
        }
        log.played.push(path.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) {
        self.log.borrow_mut().stops += 1;
    }
}
