//! Screen flow: the main menu and the game screen, switched by a state manager
//!
//! Every screen implements the same four operations. `update` returns a
//! [`StateCode`] telling the manager whether to stay or which screen to
//! build next.

use crate::game::{GameModeSurvival, InputCode};
use crate::input::KeyBindings;
use crate::menu::{Menu, MenuAction};
use crate::settings::Settings;
use crate::ui;
use crossterm::event::KeyCode;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Target frame rate
const TARGET_FPS: u64 = 60;
pub const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Input delay after game over to prevent accidental menu return
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_secs(2);

/// What the manager should do after a screen's update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCode {
    Continue,
    Quit,
    GameStart,
    MainMenu,
}

/// One screen of the application
pub trait Screen {
    /// Called once right after the screen becomes current
    fn load(&mut self);
    /// Advance one frame with the key pressed during it, if any
    fn update(&mut self, key: Option<KeyCode>, settings: &mut Settings) -> StateCode;
    fn draw(&self, frame: &mut Frame);
    /// Called once right before the screen is dropped
    fn unload(&mut self);
}

/// Source of key presses, polled once per frame
pub trait InputSource {
    /// Wait up to `timeout` for a key press
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<KeyCode>>;
}

/// Main menu: start a game, flip mode toggles, or quit
pub struct MainMenuScreen {
    menu: Menu,
}

impl MainMenuScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            menu: Menu::new(&settings.game),
        }
    }
}

impl Screen for MainMenuScreen {
    fn load(&mut self) {
        debug!("Main menu loaded");
    }

    fn update(&mut self, key: Option<KeyCode>, settings: &mut Settings) -> StateCode {
        let Some(key) = key else {
            return StateCode::Continue;
        };

        match key {
            KeyCode::Up => self.menu.move_up(),
            KeyCode::Down => self.menu.move_down(),
            KeyCode::Left | KeyCode::Right => self.menu.toggle(&mut settings.game),
            KeyCode::Enter => match self.menu.select() {
                Some(MenuAction::StartGame) => return StateCode::GameStart,
                Some(MenuAction::Quit) => return StateCode::Quit,
                None => self.menu.toggle(&mut settings.game),
            },
            KeyCode::Esc | KeyCode::Char('q') => return StateCode::Quit,
            _ => {}
        }
        StateCode::Continue
    }

    fn draw(&self, frame: &mut Frame) {
        ui::render_menu(frame, &self.menu);
    }

    fn unload(&mut self) {
        debug!("Main menu unloaded");
    }
}

/// A survival run
pub struct GameScreen {
    game: GameModeSurvival,
    keys: KeyBindings,
    /// When the run ended, to hold back the return to the menu
    over_since: Option<Instant>,
}

impl GameScreen {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: GameModeSurvival::new(settings.game.clone()),
            keys: KeyBindings::from_settings(&settings.keys),
            over_since: None,
        }
    }
}

impl Screen for GameScreen {
    fn load(&mut self) {
        info!("Game screen loaded: {:?}", self.game.config());
    }

    fn update(&mut self, key: Option<KeyCode>, _settings: &mut Settings) -> StateCode {
        let input = key.and_then(|key| self.keys.input_for(key));

        match self.over_since {
            Some(since) => {
                if input == Some(InputCode::Quit) {
                    self.game.handle_input(InputCode::Quit);
                } else if key.is_some() && since.elapsed() >= GAME_OVER_INPUT_DELAY {
                    return StateCode::MainMenu;
                }
            }
            None => {
                if let Some(code) = input {
                    self.game.handle_input(code);
                }
                self.game.update();
                if self.game.is_over() {
                    self.over_since = Some(Instant::now());
                }
            }
        }

        if self.game.will_quit() {
            return StateCode::MainMenu;
        }
        StateCode::Continue
    }

    fn draw(&self, frame: &mut Frame) {
        ui::render_game(frame, &self.game);
    }

    fn unload(&mut self) {
        let score = self.game.score();
        let stats = self.game.statistics();
        info!(
            "Leaving game: {} points, {} lines, level {}, {} pieces ({} singles, {} doubles, {} triples, {} tetris)",
            score.points,
            score.lines,
            score.level,
            stats.pieces,
            stats.singles,
            stats.doubles,
            stats.triples,
            stats.tetris
        );
    }
}

/// Owns the current screen and switches between screens
pub struct StateManager {
    current: Box<dyn Screen>,
    settings: Settings,
}

impl StateManager {
    /// Start on the main menu
    pub fn new(settings: Settings) -> Self {
        let mut current: Box<dyn Screen> = Box::new(MainMenuScreen::new(&settings));
        current.load();
        Self { current, settings }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Hand back the settings, including anything changed in the menu
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Update the current screen and act on its answer.
    /// Returns false once the application should exit.
    pub fn step(&mut self, key: Option<KeyCode>) -> bool {
        let code = self.current.update(key, &mut self.settings);

        let next: Box<dyn Screen> = match code {
            StateCode::Continue => return true,
            StateCode::Quit => {
                info!("Quitting");
                self.current.unload();
                return false;
            }
            StateCode::GameStart => Box::new(GameScreen::new(&self.settings)),
            StateCode::MainMenu => Box::new(MainMenuScreen::new(&self.settings)),
        };

        debug!("Switching screen: {:?}", code);
        self.current.unload();
        self.current = next;
        self.current.load();
        true
    }

    /// Run frames until a screen asks to quit
    pub fn run<B: Backend, I: InputSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut I,
    ) -> io::Result<()> {
        loop {
            let key = input.poll(FRAME_DURATION)?;
            if !self.step(key) {
                return Ok(());
            }
            terminal.draw(|frame| self.current.draw(frame))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    /// Replays a fixed list of frames' worth of key presses
    struct ScriptedInput(VecDeque<Option<KeyCode>>);

    impl InputSource for ScriptedInput {
        fn poll(&mut self, _timeout: Duration) -> io::Result<Option<KeyCode>> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script ended"))
        }
    }

    fn keys(keys: &[Option<KeyCode>]) -> ScriptedInput {
        ScriptedInput(keys.iter().copied().collect())
    }

    #[test]
    fn test_menu_quit() {
        let mut manager = StateManager::new(Settings::default());
        assert!(manager.step(None));
        assert!(!manager.step(Some(KeyCode::Esc)));
    }

    #[test]
    fn test_menu_toggle_updates_settings() {
        let mut manager = StateManager::new(Settings::default());
        manager.step(Some(KeyCode::Down));
        manager.step(Some(KeyCode::Down));
        manager.step(Some(KeyCode::Right));
        assert!(manager.settings().game.invisible);
        manager.step(Some(KeyCode::Enter));
        assert!(!manager.settings().game.invisible);
    }

    #[test]
    fn test_start_game_and_return_to_menu() {
        let mut manager = StateManager::new(Settings::default());
        // Start, play a little, quit the run, quit the app
        assert!(manager.step(Some(KeyCode::Enter)));
        assert!(manager.step(Some(KeyCode::Left)));
        assert!(manager.step(Some(KeyCode::Char(' '))));
        assert!(manager.step(None));
        assert!(manager.step(Some(KeyCode::Char('q'))));
        // Back on the menu, where Enter starts another run
        assert!(manager.step(Some(KeyCode::Up)));
        assert!(!manager.step(Some(KeyCode::Enter)));
    }

    #[test]
    fn test_run_draws_until_quit() {
        let mut terminal = Terminal::new(TestBackend::new(80, 26)).unwrap();
        let mut manager = StateManager::new(Settings::default());
        let mut input = keys(&[
            None,
            Some(KeyCode::Enter),
            Some(KeyCode::Char(' ')),
            None,
            Some(KeyCode::Esc),
            Some(KeyCode::Esc),
        ]);

        manager.run(&mut terminal, &mut input).unwrap();
        assert!(input.0.is_empty());
        assert_eq!(manager.into_settings(), Settings::default());
    }

    #[test]
    fn test_game_screen_forwards_keys() {
        let mut settings = Settings::default();
        let mut screen = GameScreen::new(&settings);
        screen.load();
        let before = screen.game.current_piece().x();
        assert_eq!(
            screen.update(Some(KeyCode::Left), &mut settings),
            StateCode::Continue
        );
        assert_eq!(screen.game.current_piece().x(), before - 1);

        assert_eq!(
            screen.update(Some(KeyCode::Char('k')), &mut settings),
            StateCode::Continue
        );
        assert_eq!(
            screen.update(Some(KeyCode::Char('q')), &mut settings),
            StateCode::MainMenu
        );
        screen.unload();
    }
}
