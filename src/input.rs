//! Key bindings: translating terminal key presses into game input codes

use crate::game::InputCode;
use crate::settings::KeyBindings as KeySettings;
use crossterm::event::{KeyCode, ModifierKeyCode};

/// Debug key that reveals invisible blocks
const FORCE_VISIBLE_KEY: KeyCode = KeyCode::Char('o');

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub drop: Vec<KeyCode>,
    pub rotate_clockwise: Vec<KeyCode>,
    pub rotate_counterclockwise: Vec<KeyCode>,
    pub hold: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let key = Self::parse_key(s);
                if key.is_none() {
                    tracing::warn!("Ignoring unknown key binding '{}'", s);
                }
                key
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(keys: &KeySettings) -> Self {
        Self {
            left: Self::parse_keys(&keys.left),
            right: Self::parse_keys(&keys.right),
            down: Self::parse_keys(&keys.down),
            drop: Self::parse_keys(&keys.drop),
            rotate_clockwise: Self::parse_keys(&keys.rotate_clockwise),
            rotate_counterclockwise: Self::parse_keys(&keys.rotate_counterclockwise),
            hold: Self::parse_keys(&keys.hold),
            quit: Self::parse_keys(&keys.quit),
        }
    }

    /// The input code bound to a key, if any
    pub fn input_for(&self, key: KeyCode) -> Option<InputCode> {
        // Letters match regardless of case
        let key = match key {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        let table = [
            (&self.quit, InputCode::Quit),
            (&self.left, InputCode::Left),
            (&self.right, InputCode::Right),
            (&self.down, InputCode::Down),
            (&self.rotate_clockwise, InputCode::RotateClockwise),
            (&self.rotate_counterclockwise, InputCode::RotateCounterClockwise),
            (&self.drop, InputCode::Drop),
            (&self.hold, InputCode::Hold),
        ];
        table
            .iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|&(_, code)| code)
            .or((key == FORCE_VISIBLE_KEY).then_some(InputCode::ForceVisible))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&KeySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.input_for(KeyCode::Left), Some(InputCode::Left));
        assert_eq!(keys.input_for(KeyCode::Char(' ')), Some(InputCode::Drop));
        assert_eq!(keys.input_for(KeyCode::Up), Some(InputCode::RotateClockwise));
        assert_eq!(keys.input_for(KeyCode::Char('x')), Some(InputCode::RotateClockwise));
        assert_eq!(
            keys.input_for(KeyCode::Char('Z')),
            Some(InputCode::RotateCounterClockwise)
        );
        assert_eq!(keys.input_for(KeyCode::Char('c')), Some(InputCode::Hold));
        assert_eq!(keys.input_for(KeyCode::Esc), Some(InputCode::Quit));
        assert_eq!(keys.input_for(KeyCode::Char('o')), Some(InputCode::ForceVisible));
        assert_eq!(keys.input_for(KeyCode::Char('k')), None);
    }

    #[test]
    fn test_custom_bindings() {
        let settings = KeySettings {
            left: vec!["a".to_string()],
            hold: vec!["Shift".to_string(), "Tab".to_string()],
            drop: vec!["nonsense".to_string()],
            ..KeySettings::default()
        };
        let keys = KeyBindings::from_settings(&settings);
        assert_eq!(keys.input_for(KeyCode::Char('a')), Some(InputCode::Left));
        assert_eq!(keys.input_for(KeyCode::Left), None);
        assert_eq!(keys.input_for(KeyCode::Tab), Some(InputCode::Hold));
        assert!(keys.drop.is_empty());
    }
}
