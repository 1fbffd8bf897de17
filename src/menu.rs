//! Main menu with the game mode toggles

use crate::settings::GameConfig;

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub selected: usize,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub item_type: MenuItemType,
}

#[derive(Debug, Clone)]
pub enum MenuItemType {
    /// Simple button that triggers an action
    Button(MenuAction),
    /// Toggle boolean setting
    Toggle { key: SettingKey, value: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Quit,
}

/// Setting keys for identifying which setting to modify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Hold,
    Invisible,
    SlideLeft,
    SlideRight,
}

impl SettingKey {
    fn flag(self, config: &mut GameConfig) -> &mut bool {
        match self {
            SettingKey::Hold => &mut config.can_hold,
            SettingKey::Invisible => &mut config.invisible,
            SettingKey::SlideLeft => &mut config.slide_left,
            SettingKey::SlideRight => &mut config.slide_right,
        }
    }
}

impl Menu {
    pub fn new(config: &GameConfig) -> Self {
        let button = |label: &str, action| MenuItem {
            label: label.to_string(),
            item_type: MenuItemType::Button(action),
        };
        let toggle = |label: &str, key, value| MenuItem {
            label: label.to_string(),
            item_type: MenuItemType::Toggle { key, value },
        };

        Self {
            selected: 0,
            items: vec![
                button("Start", MenuAction::StartGame),
                toggle("Hold", SettingKey::Hold, config.can_hold),
                toggle("Invisible", SettingKey::Invisible, config.invisible),
                toggle("Slide Left", SettingKey::SlideLeft, config.slide_left),
                toggle("Slide Right", SettingKey::SlideRight, config.slide_right),
                button("Quit", MenuAction::Quit),
            ],
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    /// Flip the selected toggle, writing it through to the config
    pub fn toggle(&mut self, config: &mut GameConfig) {
        if let Some(MenuItem {
            item_type: MenuItemType::Toggle { key, value },
            ..
        }) = self.items.get_mut(self.selected)
        {
            *value = !*value;
            *key.flag(config) = *value;
        }
    }

    /// Get the action for the current selection (for Button types)
    pub fn select(&self) -> Option<MenuAction> {
        match self.items.get(self.selected) {
            Some(MenuItem {
                item_type: MenuItemType::Button(action),
                ..
            }) => Some(*action),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut menu = Menu::new(&GameConfig::default());
        assert_eq!(menu.select(), Some(MenuAction::StartGame));
        menu.move_up();
        assert_eq!(menu.select(), Some(MenuAction::Quit));
        menu.move_down();
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_toggles_write_config() {
        let mut config = GameConfig::default();
        let mut menu = Menu::new(&config);

        menu.move_down();
        assert_eq!(menu.select(), None);
        menu.toggle(&mut config);
        assert!(!config.can_hold);

        menu.move_down();
        menu.toggle(&mut config);
        assert!(config.invisible);

        menu.move_down();
        menu.move_down();
        menu.toggle(&mut config);
        assert!(config.slide_right);
        assert!(!config.slide_left);
    }

    #[test]
    fn test_toggle_on_button_does_nothing() {
        let mut config = GameConfig::default();
        let mut menu = Menu::new(&config);
        menu.toggle(&mut config);
        assert_eq!(config, GameConfig::default());
    }
}
