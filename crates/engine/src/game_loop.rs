//! The main loop.
//!
//! One iteration: start the timer, poll input, apply settings hotkeys, apply
//! pause/quit, run the game callback, composite, present, stop the timer and
//! sleep out the rest of the frame.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engine::{Engine, EngineError};
use crate::input::{Hotkey, InputSource, SHIFT};
use crate::session::LoopState;
use crate::term::CellSink;
use crate::types::Color;

/// User game logic.
pub trait Game {
    /// Runs once before the first frame.
    fn setup(&mut self, _engine: &mut Engine) {}

    /// Runs every frame while the session is running.
    fn update(&mut self, engine: &mut Engine);

    /// Runs every frame while paused, instead of `update`.
    fn show_pause_info(&mut self, engine: &mut Engine) {
        engine.draw_pause_dialog(Color::Grey, None, 0);
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub state: LoopState,
}

#[derive(Debug, Clone)]
pub struct GameLoop {
    max_frames: Option<u64>,
    metrics_interval: Duration,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self {
            max_frames: None,
            metrics_interval: Duration::from_secs(1),
        }
    }
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `frames` frames even without a quit request.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// How often fps is logged and the terminal title refreshed.
    pub fn with_metrics_interval(mut self, interval: Duration) -> Self {
        self.metrics_interval = interval;
        self
    }

    /// Drive `game` until it terminates.
    ///
    /// Surface and input failures end the run with an error; restoring the
    /// terminal is left to the caller.
    pub fn run<G: Game + ?Sized>(
        &self,
        engine: &mut Engine,
        game: &mut G,
        surface: &mut dyn CellSink,
        source: &mut dyn InputSource,
    ) -> Result<LoopSummary, EngineError> {
        apply_configuration(engine, surface)?;
        surface
            .set_title(&engine.window_title())
            .map_err(EngineError::Surface)?;

        info!(
            title = %engine.title(),
            canvas_width = engine.canvas_width(),
            canvas_height = engine.canvas_height(),
            desired_fps = engine.desired_fps(),
            config = %engine.configuration().name,
            "loop_start"
        );

        game.setup(engine);

        let mut interval_start = Instant::now();
        let mut interval_frames: u32 = 0;
        let mut interval_work = Duration::ZERO;

        while !engine.session.sync_quit() {
            let now = Instant::now();
            engine.timer.start(now);

            let (zoom_x, zoom_y) = {
                let c = engine.registry.current();
                (c.zoom_x, c.zoom_y)
            };
            engine
                .input
                .update(source, zoom_x, zoom_y, now)
                .map_err(EngineError::Input)?;

            if handle_settings_hotkeys(engine) {
                apply_configuration(engine, surface)?;
                surface
                    .set_title(&engine.window_title())
                    .map_err(EngineError::Surface)?;
            }
            handle_session_hotkeys(engine);

            match engine.session.state() {
                LoopState::Running => game.update(engine),
                LoopState::Paused => game.show_pause_info(engine),
                LoopState::Terminated => {}
            }

            let (zoom_x, zoom_y) = {
                let c = engine.registry.current();
                (c.zoom_x, c.zoom_y)
            };
            engine.window.composite(&engine.canvas, zoom_x, zoom_y);
            surface
                .present(&engine.window)
                .map_err(EngineError::Surface)?;

            engine.timer.stop(Instant::now());
            engine.frame += 1;

            interval_frames += 1;
            interval_work += engine.timer.work();
            let since = interval_start.elapsed();
            if since >= self.metrics_interval {
                let fps = interval_frames as f32 / since.as_secs_f32();
                let frame_time_ms =
                    interval_work.as_secs_f32() * 1000.0 / interval_frames as f32;
                info!(fps, frame_time_ms, frames = engine.frame, "loop_metrics");
                surface
                    .set_title(&engine.window_title())
                    .map_err(EngineError::Surface)?;
                interval_start = Instant::now();
                interval_frames = 0;
                interval_work = Duration::ZERO;
            }

            if self.max_frames.is_some_and(|max| engine.frame >= max) {
                debug!(frames = engine.frame, "frame_limit_reached");
                break;
            }
            if engine.session.sync_quit() {
                break;
            }
            engine.timer.sleep();
        }

        let summary = LoopSummary {
            frames: engine.frame,
            state: engine.session.state(),
        };
        info!(
            frames = summary.frames,
            state = ?summary.state,
            uptime_ms = engine.uptime().as_millis() as u64,
            "loop_stopped"
        );
        Ok(summary)
    }
}

/// F1-F8. Returns true when the live configuration changed.
fn handle_settings_hotkeys(engine: &mut Engine) -> bool {
    let reverse = engine.input.is_raw_down(SHIFT);
    let mut changed = false;
    for hotkey in Hotkey::ALL.into_iter().filter(|h| h.is_setting()) {
        if engine.input.key(hotkey.code()).is_pressed() {
            changed |= engine.registry.apply_hotkey(hotkey, reverse);
        }
    }
    if changed {
        let c = engine.registry.current();
        info!(
            index = engine.registry.index(),
            config = %c.name,
            font = %c.font_name,
            font_size = c.font_size,
            font_weight = c.font_weight,
            zoom_x = c.zoom_x,
            zoom_y = c.zoom_y,
            "configuration_changed"
        );
    }
    changed
}

fn handle_session_hotkeys(engine: &mut Engine) {
    if engine.input.key(Hotkey::Pause.code()).is_pressed() {
        engine.session.toggle_pause();
        debug!(state = ?engine.session.state(), "pause_toggled");
    }
    if engine.input.focus_lost() {
        engine.session.pause();
    }
    if engine.input.key(Hotkey::Quit.code()).is_pressed() {
        info!(reason = "escape_key", "shutdown_requested");
        engine.session.terminate();
    }
    if engine.input.interrupt_requested() {
        info!(reason = "interrupt", "shutdown_requested");
        engine.session.terminate();
    }
    engine.session.sync_quit();
}

fn apply_configuration(engine: &Engine, surface: &mut dyn CellSink) -> Result<(), EngineError> {
    let (w, h) = engine.window_size();
    surface
        .apply_configuration(engine.registry.current(), w, h)
        .map_err(EngineError::Surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::input::{KeyCode, ScriptedSource};
    use crate::term::MemorySurface;
    use crossterm::event::{Event, KeyEvent, KeyEventKind, KeyModifiers};

    struct Counter {
        setups: u32,
        updates: u32,
        pauses: u32,
    }

    impl Game for Counter {
        fn setup(&mut self, _engine: &mut Engine) {
            self.setups += 1;
        }

        fn update(&mut self, engine: &mut Engine) {
            self.updates += 1;
            engine.clear_screen(Color::Red);
        }

        fn show_pause_info(&mut self, _engine: &mut Engine) {
            self.pauses += 1;
        }
    }

    fn fast_engine() -> Engine {
        Engine::new(&EngineConfig::new("test", 8, 4).with_fps(1000.0)).unwrap()
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn frame_limit_stops_a_running_loop() {
        let mut engine = fast_engine();
        let mut game = Counter { setups: 0, updates: 0, pauses: 0 };
        let mut surface = MemorySurface::default();
        let mut source = ScriptedSource::new();

        let summary = GameLoop::new()
            .with_max_frames(3)
            .run(&mut engine, &mut game, &mut surface, &mut source)
            .unwrap();

        assert_eq!(summary, LoopSummary { frames: 3, state: LoopState::Running });
        assert_eq!(game.setups, 1);
        assert_eq!(game.updates, 3);
        assert_eq!(surface.frames_presented(), 3);
        assert_eq!(surface.attribute(0, 0), Some(Color::Red.index() as u16 * 16));
        assert_eq!(surface.configurations().len(), 1);
    }

    #[test]
    fn escape_terminates_after_presenting_the_frame() {
        let mut engine = fast_engine();
        let mut game = Counter { setups: 0, updates: 0, pauses: 0 };
        let mut surface = MemorySurface::default();
        let mut source = ScriptedSource::new();
        source.push_idle(1).push_frame(vec![press(KeyCode::Esc)]);

        let summary = GameLoop::new()
            .with_max_frames(10)
            .run(&mut engine, &mut game, &mut surface, &mut source)
            .unwrap();

        assert_eq!(summary, LoopSummary { frames: 2, state: LoopState::Terminated });
        assert_eq!(game.updates, 1);
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn pause_key_switches_callbacks() {
        let mut engine = fast_engine();
        let mut game = Counter { setups: 0, updates: 0, pauses: 0 };
        let mut surface = MemorySurface::default();
        let mut source = ScriptedSource::new();
        source
            .push_frame(vec![press(KeyCode::Char('p'))])
            .push_frame(vec![release(KeyCode::Char('p'))])
            .push_frame(vec![press(KeyCode::Char('p'))])
            .push_frame(vec![release(KeyCode::Char('p'))]);

        GameLoop::new()
            .with_max_frames(4)
            .run(&mut engine, &mut game, &mut surface, &mut source)
            .unwrap();

        assert_eq!(game.pauses, 2);
        assert_eq!(game.updates, 2);
    }

    #[test]
    fn zoom_hotkey_reconfigures_the_surface() {
        let mut engine = fast_engine();
        let mut game = Counter { setups: 0, updates: 0, pauses: 0 };
        let mut surface = MemorySurface::default();
        let mut source = ScriptedSource::new();
        source.push_frame(vec![press(KeyCode::F(5))]);

        GameLoop::new()
            .with_max_frames(1)
            .run(&mut engine, &mut game, &mut surface, &mut source)
            .unwrap();

        assert_eq!(engine.configuration().zoom_x, 2);
        assert_eq!(surface.size(), (16, 4));
        let last = surface.configurations().last().unwrap();
        assert_eq!((last.1, last.2), (16, 4));
    }

    #[test]
    fn external_quit_request_stops_before_next_frame() {
        let mut engine = fast_engine();
        engine.quit_handle().request_quit();
        let mut game = Counter { setups: 0, updates: 0, pauses: 0 };
        let mut surface = MemorySurface::default();
        let mut source = ScriptedSource::new();

        let summary = GameLoop::new()
            .run(&mut engine, &mut game, &mut surface, &mut source)
            .unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(game.setups, 1);
        assert_eq!(surface.frames_presented(), 0);
    }
}
