//! Edge-triggered key state.

use crossterm::event::{KeyCode, ModifierKeyCode};

/// Pseudo key tracking the Shift modifier.
pub const SHIFT: KeyCode = KeyCode::Modifier(ModifierKeyCode::LeftShift);

/// Level and transition state derived from two consecutive raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    state_old: bool,
    state_new: bool,
}

impl KeyState {
    /// Shift in this frame's raw sample.
    pub fn update(&mut self, raw_down: bool) {
        self.state_old = self.state_new;
        self.state_new = raw_down;
    }

    pub fn is_up(&self) -> bool {
        !self.state_new
    }

    pub fn is_down(&self) -> bool {
        self.state_new
    }

    /// Went down this frame.
    pub fn is_pressed(&self) -> bool {
        self.state_new && !self.state_old
    }

    /// Went up this frame.
    pub fn is_released(&self) -> bool {
        !self.state_new && self.state_old
    }
}

/// A watched keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    code: KeyCode,
    state: KeyState,
}

impl Key {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code: normalize(code),
            state: KeyState::default(),
        }
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn update(&mut self, raw_down: bool) {
        self.state.update(raw_down);
    }

    pub fn is_up(&self) -> bool {
        self.state.is_up()
    }

    pub fn is_down(&self) -> bool {
        self.state.is_down()
    }

    pub fn is_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    pub fn is_released(&self) -> bool {
        self.state.is_released()
    }
}

/// Fold case and left/right modifier variants so that one identifier names
/// one physical key.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        KeyCode::BackTab => KeyCode::Tab,
        KeyCode::Modifier(ModifierKeyCode::RightShift) => SHIFT,
        KeyCode::Modifier(ModifierKeyCode::RightControl) => {
            KeyCode::Modifier(ModifierKeyCode::LeftControl)
        }
        KeyCode::Modifier(ModifierKeyCode::RightAlt) => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_sequence() {
        let mut k = Key::new(KeyCode::Char('a'));
        assert!(k.is_up());
        assert!(!k.is_pressed());

        k.update(true);
        assert!(k.is_down() && k.is_pressed());
        assert!(!k.is_released());

        k.update(true);
        assert!(k.is_down());
        assert!(!k.is_pressed());

        k.update(false);
        assert!(k.is_up() && k.is_released());

        k.update(false);
        assert!(k.is_up());
        assert!(!k.is_released());
    }

    #[test]
    fn codes_are_normalized() {
        assert_eq!(Key::new(KeyCode::Char('P')).code(), KeyCode::Char('p'));
        assert_eq!(
            normalize(KeyCode::Modifier(ModifierKeyCode::RightShift)),
            SHIFT
        );
        assert_eq!(normalize(KeyCode::F(7)), KeyCode::F(7));
    }
}
