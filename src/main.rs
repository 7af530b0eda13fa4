//! Terminal canvas demo (default binary).
//!
//! Usage: `tui-canvas [config.json] [font.bin] [hit.wav]`
//!
//! Bouncing balls and a player block built from procedural sprites. Arrow
//! keys move the player, a left click teleports it, `Space` respawns the
//! balls. The reserved engine keys (F1-F8, `P`, `Esc`) work as usual.
//! `S` toggles sound; hits are only audible in a `playback` build.
//!
//! Logs go to the file named by `TUI_CANVAS_LOG`; stdout belongs to the
//! terminal surface.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_canvas::core::Sprite;
use tui_canvas::engine::{Engine, EngineConfig, Game, GameLoop, StatusInfo, BAR_HEIGHT};
use tui_canvas::input::{CrosstermSource, KeyCode, MouseButton};
use tui_canvas::term::TerminalSurface;
use tui_canvas::types::{Align, Color, Configuration, SimpleRng};

const LOG_ENV: &str = "TUI_CANVAS_LOG";
const BALL_COUNT: usize = 6;
const PLAYER_SPEED: f32 = 40.0;

fn main() -> Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => default_config(),
    };
    let font_path = args.next();
    let hit_sound = args.next();

    let mut engine = Engine::new(&config)?;
    if hit_sound.is_some() {
        open_audio(&mut engine);
    }
    let mut game = Bounce::new(font_path, hit_sound);

    let mut surface = TerminalSurface::new(config.back_color_offset);
    surface.enter()?;

    let result = GameLoop::new().run(
        &mut engine,
        &mut game,
        &mut surface,
        &mut CrosstermSource::new(),
    );

    // Always try to restore terminal state.
    let _ = surface.exit();
    let summary = result?;
    info!(frames = summary.frames, "demo_finished");
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match std::env::var_os(LOG_ENV) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
    Ok(())
}

#[cfg(feature = "playback")]
fn open_audio(engine: &mut Engine) {
    match tui_canvas::audio::RodioBackend::open_default() {
        Ok(backend) => engine.audio_mut().set_backend(Box::new(backend)),
        Err(e) => warn!(error = %e, "audio_unavailable"),
    }
}

#[cfg(not(feature = "playback"))]
fn open_audio(_engine: &mut Engine) {
    warn!("built without playback, sound stays silent");
}

fn default_config() -> EngineConfig {
    EngineConfig::new("Bounce", 120, 60).with_presets(vec![
        Configuration::new("normal", "Consolas", 4, 400, 1, 1),
        Configuration::new("wide", "Consolas", 4, 400, 2, 1),
        Configuration::new("large", "Lucida Console", 8, 700, 2, 2),
    ])
}

/// An 8x8 disc on a black (transparent) background.
fn ball_sprite(color: Color) -> Sprite {
    let mut pixels = Vec::with_capacity(64);
    for y in 0..8 {
        for x in 0..8 {
            let (dx, dy) = (x as f32 - 3.5, y as f32 - 3.5);
            let inside = dx * dx + dy * dy <= 16.0;
            pixels.push(if inside { color } else { Color::Black });
        }
    }
    let mut sprite =
        Sprite::from_pixels(8, 8, pixels, 0, 0, Some(Color::Black)).unwrap_or_default();
    sprite.set_visible(true);
    sprite.alive = true;
    sprite
}

/// Two 6x6 frames side by side: solid yellow and a yellow ring.
fn player_sprite() -> Sprite {
    let mut pixels = Vec::with_capacity(72);
    for y in 0..6 {
        for x in 0..12 {
            let fx = x % 6;
            let edge = fx == 0 || fx == 5 || y == 0 || y == 5;
            let color = if x < 6 || edge { Color::Yellow } else { Color::Black };
            pixels.push(color);
        }
    }
    let mut sprite =
        Sprite::from_pixels(12, 6, pixels, 6, 6, Some(Color::Black)).unwrap_or_default();
    let _ = sprite.add_animation("idle", vec![0], 0.0);
    let _ = sprite.add_animation("blink", vec![0, 1], 0.15);
    sprite.set_visible(true);
    sprite
}

struct Bounce {
    font_path: Option<String>,
    hit_sound: Option<String>,
    rng: SimpleRng,
    player: Sprite,
    ball: Sprite,
    balls: Vec<Sprite>,
    hits: usize,
}

impl Bounce {
    fn new(font_path: Option<String>, hit_sound: Option<String>) -> Self {
        Self {
            font_path,
            hit_sound,
            rng: SimpleRng::from_time(),
            player: player_sprite(),
            ball: ball_sprite(Color::Cyan),
            balls: Vec::new(),
            hits: 0,
        }
    }

    fn spawn_balls(&mut self, engine: &Engine) {
        let (w, h) = (engine.canvas_width(), engine.canvas_height());
        self.balls.clear();
        for _ in 0..BALL_COUNT {
            let mut ball = self.ball.clone();
            let x = self.rng.range(0, w - 8) as f32;
            let y = self.rng.range(BAR_HEIGHT, h - BAR_HEIGHT - 8) as f32;
            ball.set_position(x, y);
            let speed = 20.0 + self.rng.next_f32() * 30.0;
            let vx = if self.rng.range(0, 1) == 0 { speed } else { -speed };
            let vy = if self.rng.range(0, 1) == 0 { speed } else { -speed };
            ball.set_velocity(vx, vy);
            ball.set_scale(1.0 + self.rng.next_f32(), 1.0 + self.rng.next_f32());
            self.balls.push(ball);
        }
        self.hits = 0;
    }
}

impl Game for Bounce {
    fn setup(&mut self, engine: &mut Engine) {
        if let Some(path) = self.font_path.as_deref() {
            let mut font = Sprite::new(Some(Color::Black));
            font.load_file(path, 7, 9);
            engine.text_mut().set_font(font);
        }
        engine.text_mut().set_spacing(1);

        self.player.set_position(
            engine.center_x() as f32 - 3.0,
            engine.center_y() as f32 - 3.0,
        );
        self.player.set_animation("idle", 0);
        self.spawn_balls(engine);
    }

    fn update(&mut self, engine: &mut Engine) {
        let dt = engine.elapsed_time().min(0.05);
        let (w, h) = (engine.canvas_width(), engine.canvas_height());

        let mut vx = 0.0;
        let mut vy = 0.0;
        if engine.key(KeyCode::Left).is_down() {
            vx -= PLAYER_SPEED;
        }
        if engine.key(KeyCode::Right).is_down() {
            vx += PLAYER_SPEED;
        }
        if engine.key(KeyCode::Up).is_down() {
            vy -= PLAYER_SPEED;
        }
        if engine.key(KeyCode::Down).is_down() {
            vy += PLAYER_SPEED;
        }
        self.player.set_velocity(vx, vy);
        self.player.update_position(dt);
        if engine.mouse(MouseButton::Left).is_pressed() {
            self.player
                .set_position(engine.mouse_x() as f32, engine.mouse_y() as f32);
        }
        if engine.key(KeyCode::Char(' ')).is_pressed() {
            self.spawn_balls(engine);
        }
        if engine.key(KeyCode::Char('s')).is_pressed() {
            let on = !engine.audio().is_sound();
            engine.audio_mut().set_sound(on);
        }

        let top = BAR_HEIGHT as f32;
        let bottom = (h - BAR_HEIGHT) as f32;
        let mut touching = false;
        for ball in &mut self.balls {
            ball.update_position(dt);
            let (mut bvx, mut bvy) = ball.velocity();
            if ball.x() < 0.0 {
                bvx = bvx.abs();
            } else if ball.x() + ball.width() as f32 > w as f32 {
                bvx = -bvx.abs();
            }
            if ball.y() < top {
                bvy = bvy.abs();
            } else if ball.y() + ball.height() as f32 > bottom {
                bvy = -bvy.abs();
            }
            ball.set_velocity(bvx, bvy);

            if ball.alive && ball.is_pixel_collision(&self.player) {
                ball.alive = false;
                self.hits += 1;
                touching = true;
            }
        }
        if touching {
            if let Some(path) = self.hit_sound.as_deref() {
                // Failures are already logged by the player.
                let _ = engine.audio_mut().play(path, 0.2, self.hits == BALL_COUNT);
            }
            self.player.set_animation("blink", 0);
        } else if self.player.is_animation_played(3) {
            self.player.set_animation("idle", 0);
        }
        self.player.play_animation(0);

        engine.clear_screen(Color::DarkBlue);
        for ball in &self.balls {
            let tint = if ball.alive { None } else { Some(Color::Red) };
            engine.canvas_mut().draw_sprite(ball, tint);
        }
        engine.canvas_mut().draw_sprite(&self.player, None);
        if engine.key(KeyCode::Tab).is_down() {
            engine.canvas_mut().draw_sprite_rect(&self.player, Color::White);
            for ball in &self.balls {
                engine
                    .canvas_mut()
                    .draw_sprite_circle(ball, Color::Magenta, None);
            }
        }

        let progress = self.hits as f32 / BALL_COUNT as f32;
        engine.draw_title_bar(BAR_HEIGHT, Color::Grey);
        engine.canvas_mut().rectangle_percent(
            w / 2 - 20,
            2,
            40,
            5,
            Some(Color::Green),
            Some(Color::DarkGrey),
            1,
            progress,
            true,
        );
        let score = format!("{}/{}", self.hits, BALL_COUNT);
        engine.draw_title_bar_info("BOUNCE", &score, Color::Grey, 0, 0);
        engine.draw_status_bar(BAR_HEIGHT, Color::DarkGrey);
        engine.draw_status_bar_info(StatusInfo::Configuration, Color::DarkGrey, 0, 0);

        let (mx, my) = (engine.mouse_x(), engine.mouse_y());
        engine.canvas_mut().set_pixel(mx, my, Color::White);
        if self.hits == BALL_COUNT {
            let (cx, cy) = (engine.center_x(), engine.center_y());
            engine.draw_text_with("CLEAR", cx, cy, Align::Center, Some(Color::Yellow), None);
        }
    }
}
