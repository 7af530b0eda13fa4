//! Engine settings and the live display configuration registry.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::manager::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::input::Hotkey;
use crate::types::{
    Configuration, BACK_COLOR_OFFSET, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_FPS,
    FONT_NAMES, FONT_SIZE_RANGE, FONT_WEIGHT_RANGE, FONT_WEIGHT_STEP, ZOOM_RANGE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas size must be non-zero, got {width}x{height}")]
    ZeroCanvas { width: u16, height: u16 },
    #[error("desired fps must be a positive number, got {0}")]
    InvalidFps(f32),
    #[error("back color offset must be non-zero")]
    ZeroBackColorOffset,
    #[error("at least one configuration preset is required")]
    NoPresets,
    #[error("preset {name:?}: {field} {value} outside {min}..={max}")]
    PresetOutOfRange {
        name: String,
        field: &'static str,
        value: u16,
        min: u16,
        max: u16,
    },
}

/// Startup settings for one engine session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub desired_fps: f32,
    pub back_color_offset: u16,
    /// Auto-release delay for terminals that never report key releases.
    pub key_release_timeout_ms: u64,
    /// Display presets cycled with F7; the first one is the default (F8).
    pub presets: Vec<Configuration>,
    /// Sound effects start enabled.
    pub sound: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            desired_fps: DEFAULT_FPS,
            back_color_offset: BACK_COLOR_OFFSET,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            presets: vec![Configuration::default()],
            sound: true,
        }
    }
}

impl EngineConfig {
    pub fn new(title: impl Into<String>, canvas_width: u16, canvas_height: u16) -> Self {
        Self {
            title: title.into(),
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }

    pub fn with_fps(mut self, fps: f32) -> Self {
        self.desired_fps = fps;
        self
    }

    pub fn with_presets(mut self, presets: Vec<Configuration>) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_sound(mut self, on: bool) -> Self {
        self.sound = on;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::ZeroCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !self.desired_fps.is_finite() || self.desired_fps <= 0.0 {
            return Err(ConfigError::InvalidFps(self.desired_fps));
        }
        if self.back_color_offset == 0 {
            return Err(ConfigError::ZeroBackColorOffset);
        }
        if self.presets.is_empty() {
            return Err(ConfigError::NoPresets);
        }
        self.presets.iter().try_for_each(validate_preset)
    }

    pub fn key_release_timeout(&self) -> Duration {
        Duration::from_millis(self.key_release_timeout_ms)
    }
}

/// Preset fields must lie in the ranges the settings hotkeys clamp to.
pub fn validate_preset(preset: &Configuration) -> Result<(), ConfigError> {
    check_range(preset, "font_size", preset.font_size, FONT_SIZE_RANGE)?;
    check_range(preset, "font_weight", preset.font_weight, FONT_WEIGHT_RANGE)?;
    check_range(preset, "zoom_x", preset.zoom_x, ZOOM_RANGE)?;
    check_range(preset, "zoom_y", preset.zoom_y, ZOOM_RANGE)
}

fn check_range(
    preset: &Configuration,
    field: &'static str,
    value: u16,
    (min, max): (u16, u16),
) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ConfigError::PresetOutOfRange {
        name: preset.name.clone(),
        field,
        value,
        min,
        max,
    })
}

/// Display presets plus the live configuration derived from them.
///
/// F1-F6 edit the live copy only. Switching presets (F7/F8) replaces the
/// live copy with a fresh copy of the chosen preset.
#[derive(Debug, Clone)]
pub struct ConfigurationRegistry {
    presets: Vec<Configuration>,
    index: usize,
    current: Configuration,
}

impl Default for ConfigurationRegistry {
    fn default() -> Self {
        Self::new(vec![Configuration::default()])
    }
}

impl ConfigurationRegistry {
    /// An empty list falls back to the built-in default preset.
    pub fn new(presets: Vec<Configuration>) -> Self {
        let presets = if presets.is_empty() {
            vec![Configuration::default()]
        } else {
            presets
        };
        let current = presets[0].clone();
        Self {
            presets,
            index: 0,
            current,
        }
    }

    /// Append a preset; out-of-range fields are rejected.
    pub fn add(&mut self, config: Configuration) -> Result<(), ConfigError> {
        validate_preset(&config)?;
        self.presets.push(config);
        Ok(())
    }

    pub fn presets(&self) -> &[Configuration] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Configuration {
        &self.current
    }

    /// Switch to preset `index`; out of range is ignored.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(preset) = self.presets.get(index) else {
            return false;
        };
        self.index = index;
        self.current = preset.clone();
        true
    }

    /// Step to the next preset, or the previous one when `reverse`.
    pub fn cycle(&mut self, reverse: bool) {
        let n = self.presets.len();
        let next = if reverse {
            (self.index + n - 1) % n
        } else {
            (self.index + 1) % n
        };
        self.select(next);
    }

    pub fn reset(&mut self) {
        self.select(0);
    }

    pub fn cycle_font_name(&mut self, reverse: bool) {
        let n = FONT_NAMES.len();
        let next = match FONT_NAMES.iter().position(|f| *f == self.current.font_name) {
            Some(i) if reverse => (i + n - 1) % n,
            Some(i) => (i + 1) % n,
            None => 0,
        };
        self.current.font_name = FONT_NAMES[next].to_string();
    }

    pub fn step_font_size(&mut self, reverse: bool) {
        self.current.font_size = step(self.current.font_size, 1, reverse, FONT_SIZE_RANGE);
    }

    pub fn step_font_weight(&mut self, reverse: bool) {
        self.current.font_weight = step(
            self.current.font_weight,
            FONT_WEIGHT_STEP,
            reverse,
            FONT_WEIGHT_RANGE,
        );
    }

    pub fn step_zoom_x(&mut self, reverse: bool) {
        self.current.zoom_x = step(self.current.zoom_x, 1, reverse, ZOOM_RANGE);
    }

    pub fn step_zoom_y(&mut self, reverse: bool) {
        self.current.zoom_y = step(self.current.zoom_y, 1, reverse, ZOOM_RANGE);
    }

    /// Apply a settings hotkey. Returns true when the live configuration
    /// changed; pause and quit are not settings and return false.
    pub fn apply_hotkey(&mut self, hotkey: Hotkey, reverse: bool) -> bool {
        let before = self.current.clone();
        let before_index = self.index;
        match hotkey {
            Hotkey::FontName => self.cycle_font_name(reverse),
            Hotkey::FontSize => self.step_font_size(reverse),
            Hotkey::FontWeight => self.step_font_weight(reverse),
            Hotkey::ZoomX => self.step_zoom_x(reverse),
            Hotkey::ZoomY => self.step_zoom_y(reverse),
            Hotkey::NextConfig => self.cycle(reverse),
            Hotkey::DefaultConfig => self.reset(),
            Hotkey::Pause | Hotkey::Quit => return false,
        }
        self.current != before || self.index != before_index
    }
}

fn step(value: u16, delta: u16, reverse: bool, (min, max): (u16, u16)) -> u16 {
    let next = if reverse {
        value.saturating_sub(delta)
    } else {
        value.saturating_add(delta)
    };
    next.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConfigurationRegistry {
        ConfigurationRegistry::new(vec![
            Configuration::new("small", "Consolas", 4, 400, 1, 1),
            Configuration::new("large", "Raster", 8, 700, 2, 3),
        ])
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut r = registry();
        r.cycle(false);
        assert_eq!(r.index(), 1);
        assert_eq!(r.current().name, "large");
        r.cycle(false);
        assert_eq!(r.index(), 0);
        r.cycle(true);
        assert_eq!(r.index(), 1);
        r.reset();
        assert_eq!(r.current().name, "small");
    }

    #[test]
    fn edits_touch_only_the_live_copy() {
        let mut r = registry();
        r.step_zoom_x(false);
        assert_eq!(r.current().zoom_x, 2);
        assert_eq!(r.presets()[0].zoom_x, 1);
        r.cycle(false);
        r.reset();
        assert_eq!(r.current().zoom_x, 1);
    }

    #[test]
    fn field_steps_are_clamped() {
        let mut r = registry();
        for _ in 0..20 {
            r.step_zoom_y(false);
        }
        assert_eq!(r.current().zoom_y, ZOOM_RANGE.1);
        for _ in 0..20 {
            r.step_zoom_y(true);
        }
        assert_eq!(r.current().zoom_y, 1);

        r.step_font_weight(false);
        assert_eq!(r.current().font_weight, 500);
        for _ in 0..10 {
            r.step_font_weight(true);
        }
        assert_eq!(r.current().font_weight, 100);

        for _ in 0..10 {
            r.step_font_size(true);
        }
        assert_eq!(r.current().font_size, 1);
    }

    #[test]
    fn font_names_cycle_through_the_list() {
        let mut r = registry();
        r.cycle_font_name(false);
        assert_eq!(r.current().font_name, FONT_NAMES[1]);
        r.cycle_font_name(true);
        r.cycle_font_name(true);
        assert_eq!(r.current().font_name, FONT_NAMES[FONT_NAMES.len() - 1]);

        let mut custom = ConfigurationRegistry::new(vec![Configuration::new("x", "Fira", 2, 400, 1, 1)]);
        custom.cycle_font_name(false);
        assert_eq!(custom.current().font_name, FONT_NAMES[0]);
    }

    #[test]
    fn hotkeys_report_changes() {
        let mut r = registry();
        assert!(r.apply_hotkey(Hotkey::ZoomX, false));
        assert!(!r.apply_hotkey(Hotkey::Pause, false));
        assert!(r.apply_hotkey(Hotkey::DefaultConfig, false));
        assert!(!r.apply_hotkey(Hotkey::DefaultConfig, false));

        let mut single = ConfigurationRegistry::default();
        assert!(!single.apply_hotkey(Hotkey::NextConfig, false));
    }

    #[test]
    fn added_presets_are_range_checked() {
        let mut r = registry();
        let err = r
            .add(Configuration::new("flat", "Consolas", 4, 400, 1, 0))
            .unwrap_err();
        assert!(matches!(err, ConfigError::PresetOutOfRange { field: "zoom_y", value: 0, .. }));
        let err = r
            .add(Configuration::new("heavy", "Consolas", 4, 5000, 1, 1))
            .unwrap_err();
        assert!(matches!(err, ConfigError::PresetOutOfRange { field: "font_weight", .. }));
        assert_eq!(r.len(), 2);

        r.add(Configuration::new("wide", "Raster", 6, 400, 3, 1)).unwrap();
        r.cycle(true);
        assert_eq!(r.current().name, "wide");
    }

    #[test]
    fn empty_presets_fall_back_to_default() {
        let r = ConfigurationRegistry::new(Vec::new());
        assert_eq!(r.len(), 1);
        assert_eq!(r.current(), &Configuration::default());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "title": "demo", "canvas_width": 80 }"#)
            .unwrap();
        assert_eq!(config.title, "demo");
        assert_eq!(config.canvas_width, 80);
        assert_eq!(config.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(config.presets.len(), 1);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let err = EngineConfig::from_json_str(r#"{ "canvas_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCanvas { .. }));

        let err = EngineConfig::from_json_str(r#"{ "desired_fps": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFps(_)));

        let err = EngineConfig::from_json_str(r#"{ "presets": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoPresets));

        let json = r#"{ "presets": [ { "name": "z", "font_name": "Consolas",
            "font_size": 2, "font_weight": 400, "zoom_x": 0, "zoom_y": 1 } ] }"#;
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::PresetOutOfRange { field: "zoom_x", .. }));

        assert!(matches!(
            EngineConfig::from_json_str("not json").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn json_round_trip_preserves_presets() {
        let config = EngineConfig::new("demo", 64, 48)
            .with_presets(vec![Configuration::new("big", "Raster", 8, 700, 4, 2)]);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
