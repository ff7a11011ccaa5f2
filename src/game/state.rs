//! Menu / playing / paused state machine.
//!
//! Every transition is edge-triggered: holding a key across many frames
//! changes state once. The machine never touches entities itself; it reports
//! what the game should do through [`StateCommand`] and which draw sets are
//! active through [`VisibleSets`].

use crate::{config::KeyMappings, input::InputState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuOption {
    #[default]
    StartGame,
    Settings,
    ExitGame,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [
        MenuOption::StartGame,
        MenuOption::Settings,
        MenuOption::ExitGame,
    ];

    pub fn index(self) -> usize {
        match self {
            MenuOption::StartGame => 0,
            MenuOption::Settings => 1,
            MenuOption::ExitGame => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::StartGame => "START GAME",
            MenuOption::Settings => "SETTINGS",
            MenuOption::ExitGame => "EXIT GAME",
        }
    }
}

/// Something the game has to carry out after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateCommand {
    /// Entered `Playing` from the menu; the viewer goes back to spawn.
    StartGame,
    /// Close the window.
    Exit,
}

/// Which draw sets are rendered, in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleSets {
    pub menu: bool,
    pub world: bool,
    pub projectiles: bool,
    pub weapon: bool,
}

#[derive(Debug, Default)]
pub struct StateMachine {
    state: GameState,
    selected: MenuOption,
    settings_open: bool,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn selected(&self) -> MenuOption {
        self.selected
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    /// Movement, shooting and projectile physics only run while playing.
    pub fn is_simulating(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn visible_sets(&self) -> VisibleSets {
        match self.state {
            GameState::Menu => VisibleSets {
                menu: true,
                world: false,
                projectiles: false,
                weapon: false,
            },
            GameState::Playing => VisibleSets {
                menu: false,
                world: true,
                projectiles: true,
                weapon: true,
            },
            GameState::Paused => VisibleSets {
                menu: false,
                world: true,
                projectiles: true,
                weapon: false,
            },
        }
    }

    pub fn handle_input(&mut self, input: &InputState, keys: &KeyMappings) -> Option<StateCommand> {
        match self.state {
            GameState::Menu => self.handle_menu(input, keys),
            GameState::Playing => {
                if input.pressed(keys.menu) {
                    self.enter_menu();
                } else if input.pressed(keys.pause_game) {
                    self.state = GameState::Paused;
                    log::info!("Game paused. Press ENTER to resume, ESC for the main menu");
                }
                None
            }
            GameState::Paused => {
                if input.pressed(keys.select) {
                    self.state = GameState::Playing;
                    log::info!("Game resumed");
                } else if input.pressed(keys.menu) {
                    self.enter_menu();
                }
                None
            }
        }
    }

    fn handle_menu(&mut self, input: &InputState, keys: &KeyMappings) -> Option<StateCommand> {
        if self.settings_open {
            if input.pressed(keys.menu) {
                self.settings_open = false;
                log::info!("Settings closed");
                self.log_menu();
            }
            return None;
        }

        if input.any_pressed(&keys.menu_up) {
            self.selected = self.selected.prev();
            self.log_menu();
        } else if input.any_pressed(&keys.menu_down) {
            self.selected = self.selected.next();
            self.log_menu();
        }

        if !input.pressed(keys.select) {
            return None;
        }
        match self.selected {
            MenuOption::StartGame => {
                self.state = GameState::Playing;
                log::info!("Game started. Use P to pause, ESC for the menu");
                Some(StateCommand::StartGame)
            }
            MenuOption::Settings => {
                self.settings_open = true;
                log::info!("Settings: nothing to configure yet. Press ESC to go back");
                None
            }
            MenuOption::ExitGame => {
                log::info!("Exiting game");
                Some(StateCommand::Exit)
            }
        }
    }

    fn enter_menu(&mut self) {
        self.state = GameState::Menu;
        log::info!("Returned to main menu");
        self.log_menu();
    }

    /// The textual menu, written whenever it changes.
    pub fn log_menu(&self) {
        log::info!("MAIN MENU (W/S or arrows to move, ENTER to select)");
        for option in MenuOption::ALL {
            let marker = if option == self.selected { ">" } else { " " };
            log::info!("  {} {}", marker, option.label());
        }
    }
}
