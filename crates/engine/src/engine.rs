//! The engine context handed to game callbacks.

use std::io;
use std::time::Instant;

use thiserror::Error;

use crate::audio::Audio;
use crate::config::{ConfigError, ConfigurationRegistry, EngineConfig};
use crate::core::{PixelCanvas, TextRenderer};
use crate::input::{Hotkey, InputManager, Key, KeyCode, KeyState, MouseButton, SHIFT};
use crate::session::{FrameTimer, LoopState, QuitHandle, SessionState};
use crate::term::WindowBuffer;
use crate::types::{Align, Color, Configuration};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("input device failed: {0}")]
    Input(#[source] io::Error),
    #[error("display surface failed: {0:#}")]
    Surface(anyhow::Error),
}

/// Everything a game touches during a frame: the canvas, text defaults,
/// input, sound, display configuration and session state.
#[derive(Debug)]
pub struct Engine {
    title: String,
    back_color_offset: u16,
    pub(crate) canvas: PixelCanvas,
    pub(crate) window: WindowBuffer,
    pub(crate) text: TextRenderer,
    pub(crate) input: InputManager,
    audio: Audio,
    pub(crate) registry: ConfigurationRegistry,
    pub(crate) session: SessionState,
    pub(crate) timer: FrameTimer,
    started: Instant,
    pub(crate) frame: u64,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut input = InputManager::new().with_release_timeout(config.key_release_timeout());
        for hotkey in Hotkey::ALL {
            input.key(hotkey.code());
        }
        input.key(SHIFT);
        let mut audio = Audio::default();
        audio.set_sound(config.sound);

        Ok(Self {
            title: config.title.clone(),
            back_color_offset: config.back_color_offset,
            canvas: PixelCanvas::new(config.canvas_width, config.canvas_height),
            window: WindowBuffer::default(),
            text: TextRenderer::new(),
            input,
            audio,
            registry: ConfigurationRegistry::new(config.presets.clone()),
            session: SessionState::new(),
            timer: FrameTimer::new(config.desired_fps),
            started: Instant::now(),
            frame: 0,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn back_color_offset(&self) -> u16 {
        self.back_color_offset
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PixelCanvas {
        &mut self.canvas
    }

    pub fn canvas_width(&self) -> i32 {
        self.canvas.width() as i32
    }

    pub fn canvas_height(&self) -> i32 {
        self.canvas.height() as i32
    }

    pub fn center_x(&self) -> i32 {
        self.canvas.center_x()
    }

    pub fn center_y(&self) -> i32 {
        self.canvas.center_y()
    }

    pub fn clear_screen(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    /// Last composited window; stale until the first frame is presented.
    pub fn window(&self) -> &WindowBuffer {
        &self.window
    }

    /// Window size in cells for the live configuration.
    pub fn window_size(&self) -> (u16, u16) {
        let c = self.registry.current();
        (
            self.canvas.width().saturating_mul(c.zoom_x.max(1)),
            self.canvas.height().saturating_mul(c.zoom_y.max(1)),
        )
    }

    pub fn text(&self) -> &TextRenderer {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextRenderer {
        &mut self.text
    }

    pub fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.text.draw_text(&mut self.canvas, text, x, y);
    }

    pub fn draw_text_with(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        align: Align,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        self.text
            .draw_text_with(&mut self.canvas, text, x, y, align, fg, bg);
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Current state of `code`; the key is watched from the first call on.
    pub fn key(&mut self, code: KeyCode) -> Key {
        self.input.key(code)
    }

    /// Refresh a game-owned key. Call once per frame per key.
    pub fn handle_key(&self, key: &mut Key) {
        self.input.handle_key(key);
    }

    pub fn mouse(&self, button: MouseButton) -> KeyState {
        self.input.mouse(button)
    }

    pub fn mouse_x(&self) -> i32 {
        self.input.mouse_x()
    }

    pub fn mouse_y(&self) -> i32 {
        self.input.mouse_y()
    }

    /// Silent until a backend is installed with `audio_mut().set_backend`.
    pub fn audio(&self) -> &Audio {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut Audio {
        &mut self.audio
    }

    pub fn registry(&self) -> &ConfigurationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConfigurationRegistry {
        &mut self.registry
    }

    pub fn add_config(&mut self, config: Configuration) -> Result<(), EngineError> {
        Ok(self.registry.add(config)?)
    }

    pub fn configuration(&self) -> &Configuration {
        self.registry.current()
    }

    pub fn state(&self) -> LoopState {
        self.session.state()
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn quit_handle(&self) -> QuitHandle {
        self.session.quit_handle()
    }

    /// Stop after the current frame has been presented.
    pub fn request_quit(&mut self) {
        self.session.terminate();
    }

    /// Seconds between the last two frame starts, sleep included. Use it as
    /// the frame `dt`; zero on the first frame.
    pub fn elapsed_time(&self) -> f32 {
        self.timer.elapsed().as_secs_f32()
    }

    pub fn fps(&self) -> f32 {
        self.timer.fps()
    }

    pub fn desired_fps(&self) -> f32 {
        1.0 / self.timer.desired().as_secs_f32()
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Time since the engine was created.
    pub fn uptime(&self) -> std::time::Duration {
        self.started.elapsed()
    }

    /// Terminal title: game name, live configuration and fps.
    pub fn window_title(&self) -> String {
        let config = self.registry.current();
        if self.title.is_empty() {
            format!("{} - {:.0} fps", config.name, self.fps())
        } else {
            format!("{} - {} - {:.0} fps", self.title, config.name, self.fps())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_matches_config() {
        let config = EngineConfig::new("demo", 40, 30).with_presets(vec![Configuration::new(
            "wide", "Raster", 4, 400, 2, 1,
        )]);
        let engine = Engine::new(&config).unwrap();
        assert_eq!(engine.canvas_width(), 40);
        assert_eq!(engine.canvas_height(), 30);
        assert_eq!((engine.center_x(), engine.center_y()), (20, 15));
        assert_eq!(engine.window_size(), (80, 30));
        assert_eq!(engine.state(), LoopState::Running);
        assert_eq!(engine.frame_count(), 0);
        assert!(engine.window_title().starts_with("demo - wide - "));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig::new("demo", 0, 10);
        assert!(matches!(
            Engine::new(&config),
            Err(EngineError::Config(ConfigError::ZeroCanvas { .. }))
        ));
    }

    #[test]
    fn sound_setting_reaches_audio() {
        use crate::audio::MemoryBackend;

        let mut engine = Engine::new(&EngineConfig::default().with_sound(false)).unwrap();
        let log = MemoryBackend::new();
        engine.audio_mut().set_backend(Box::new(log.clone()));
        assert!(!engine.audio().is_sound());
        assert!(!engine.audio_mut().play("hit.wav", 0.0, true).unwrap());

        engine.audio_mut().set_sound(true);
        assert!(engine.audio_mut().play("hit.wav", 0.0, false).unwrap());
        assert_eq!(log.played().len(), 1);
    }

    #[test]
    fn add_config_rejects_zero_zoom() {
        let mut engine = Engine::new(&EngineConfig::default()).unwrap();
        let err = engine
            .add_config(Configuration::new("bad", "Consolas", 4, 400, 0, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::PresetOutOfRange { field: "zoom_x", .. })
        ));
        assert_eq!(engine.registry().len(), 1);

        engine
            .add_config(Configuration::new("ok", "Consolas", 4, 400, 2, 1))
            .unwrap();
        assert_eq!(engine.registry().len(), 2);
    }

    #[test]
    fn request_quit_terminates_session() {
        let mut engine = Engine::new(&EngineConfig::default()).unwrap();
        engine.request_quit();
        assert_eq!(engine.state(), LoopState::Terminated);
    }
}
