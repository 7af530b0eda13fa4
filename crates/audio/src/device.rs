use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::backend::SoundBackend;
use crate::AudioError;

/// Plays WAV files on the default output device.
pub struct RodioBackend {
    // Dropping the stream closes the device.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioBackend {
    pub fn open_default() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

impl fmt::Debug for RodioBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RodioBackend")
            .field("playing", &self.sink.as_ref().is_some_and(|s| !s.empty()))
            .finish_non_exhaustive()
    }
}

impl SoundBackend for RodioBackend {
    fn play(&mut self, path: &Path) -> Result<(), AudioError> {
        self.stop();
        let file = File::open(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let playback = |e: &dyn fmt::Display| AudioError::Playback {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let source = Decoder::new(BufReader::new(file)).map_err(|e| playback(&e))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| playback(&e))?;
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
