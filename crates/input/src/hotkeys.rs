//! Engine-reserved keys.
//!
//! These are consumed by the loop before the game sees the frame. Games can
//! still query them through the input manager; they just should not bind
//! their own meaning to them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::key::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hotkey {
    /// Cycle the font name of the current configuration.
    FontName,
    FontSize,
    FontWeight,
    ZoomX,
    ZoomY,
    /// Switch to the next configuration preset.
    NextConfig,
    /// Switch back to the first preset.
    DefaultConfig,
    Pause,
    Quit,
}

impl Hotkey {
    pub const ALL: [Hotkey; 9] = [
        Hotkey::FontName,
        Hotkey::FontSize,
        Hotkey::FontWeight,
        Hotkey::ZoomX,
        Hotkey::ZoomY,
        Hotkey::NextConfig,
        Hotkey::DefaultConfig,
        Hotkey::Pause,
        Hotkey::Quit,
    ];

    pub fn code(self) -> KeyCode {
        match self {
            Hotkey::FontName => KeyCode::F(1),
            Hotkey::FontSize => KeyCode::F(3),
            Hotkey::FontWeight => KeyCode::F(4),
            Hotkey::ZoomX => KeyCode::F(5),
            Hotkey::ZoomY => KeyCode::F(6),
            Hotkey::NextConfig => KeyCode::F(7),
            Hotkey::DefaultConfig => KeyCode::F(8),
            Hotkey::Pause => KeyCode::Char('p'),
            Hotkey::Quit => KeyCode::Esc,
        }
    }

    pub fn from_code(code: KeyCode) -> Option<Hotkey> {
        let code = normalize(code);
        Self::ALL.into_iter().find(|h| h.code() == code)
    }

    /// Keys that change the display configuration (everything but pause
    /// and quit); Shift reverses their direction.
    pub fn is_setting(self) -> bool {
        !matches!(self, Hotkey::Pause | Hotkey::Quit)
    }
}

/// Ctrl+C asks the engine to stop, same as Esc.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_keys() {
        assert_eq!(Hotkey::from_code(KeyCode::F(1)), Some(Hotkey::FontName));
        assert_eq!(Hotkey::from_code(KeyCode::F(3)), Some(Hotkey::FontSize));
        assert_eq!(Hotkey::from_code(KeyCode::F(4)), Some(Hotkey::FontWeight));
        assert_eq!(Hotkey::from_code(KeyCode::F(5)), Some(Hotkey::ZoomX));
        assert_eq!(Hotkey::from_code(KeyCode::F(6)), Some(Hotkey::ZoomY));
        assert_eq!(Hotkey::from_code(KeyCode::F(7)), Some(Hotkey::NextConfig));
        assert_eq!(Hotkey::from_code(KeyCode::F(8)), Some(Hotkey::DefaultConfig));
        assert_eq!(Hotkey::from_code(KeyCode::F(2)), None);
    }

    #[test]
    fn test_pause_and_quit_keys() {
        assert_eq!(Hotkey::from_code(KeyCode::Char('p')), Some(Hotkey::Pause));
        assert_eq!(Hotkey::from_code(KeyCode::Char('P')), Some(Hotkey::Pause));
        assert_eq!(Hotkey::from_code(KeyCode::Esc), Some(Hotkey::Quit));
        assert_eq!(Hotkey::from_code(KeyCode::Char('q')), None);
    }

    #[test]
    fn test_codes_round_trip() {
        for h in Hotkey::ALL {
            assert_eq!(Hotkey::from_code(h.code()), Some(h));
        }
    }

    #[test]
    fn test_setting_keys() {
        assert!(Hotkey::ZoomY.is_setting());
        assert!(Hotkey::NextConfig.is_setting());
        assert!(!Hotkey::Pause.is_setting());
        assert!(!Hotkey::Quit.is_setting());
    }

    #[test]
    fn test_interrupt() {
        assert!(is_interrupt(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_interrupt(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }
}
