use flow_fps::{
    config::KeyMappings,
    game::state::{GameState, MenuOption, StateCommand, StateMachine},
    input::InputState,
};
use winit::keyboard::KeyCode;

use crate::common::test_utils::tap_state;

mod common;

fn setup() -> (StateMachine, InputState, KeyMappings) {
    (StateMachine::new(), InputState::new(), KeyMappings::default())
}

#[test]
fn selector_cycles_modulo_three() {
    assert_eq!(MenuOption::StartGame.prev(), MenuOption::ExitGame);
    assert_eq!(MenuOption::ExitGame.next(), MenuOption::StartGame);
    assert_eq!(MenuOption::Settings.next().next().next(), MenuOption::Settings);
    assert_eq!(MenuOption::Settings.prev().prev().prev(), MenuOption::Settings);
    assert_eq!(MenuOption::from_index(4), MenuOption::Settings);
}

#[test]
fn menu_navigation_wraps_both_ways() {
    let (mut machine, mut input, keys) = setup();

    tap_state(&mut machine, &mut input, &keys, KeyCode::ArrowUp);
    assert_eq!(machine.selected(), MenuOption::ExitGame);
    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyS);
    assert_eq!(machine.selected(), MenuOption::StartGame);
    tap_state(&mut machine, &mut input, &keys, KeyCode::ArrowDown);
    assert_eq!(machine.selected(), MenuOption::Settings);
}

#[test]
fn held_navigation_key_moves_once() {
    let (mut machine, mut input, keys) = setup();
    input.press(KeyCode::KeyS);

    for _ in 0..10 {
        machine.handle_input(&input, &keys);
        input.end_frame();
    }

    assert_eq!(machine.selected(), MenuOption::Settings);
}

#[test]
fn start_game_enters_playing() {
    let (mut machine, mut input, keys) = setup();

    let command = tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);

    assert_eq!(command, Some(StateCommand::StartGame));
    assert_eq!(machine.state(), GameState::Playing);
    assert!(machine.is_simulating());
}

#[test]
fn held_pause_key_pauses_once() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);
    input.press(KeyCode::KeyP);

    for _ in 0..5 {
        machine.handle_input(&input, &keys);
        input.end_frame();
    }

    assert_eq!(machine.state(), GameState::Paused);
    assert!(!machine.is_simulating());
}

#[test]
fn menu_key_wins_over_pause_on_the_same_frame() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);

    input.press(KeyCode::KeyP);
    input.press(KeyCode::Escape);
    machine.handle_input(&input, &keys);

    assert_eq!(machine.state(), GameState::Menu);
}

#[test]
fn round_trip_keeps_the_menu_selection() {
    let (mut machine, mut input, keys) = setup();
    let selected = machine.selected();

    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);
    assert_eq!(machine.state(), GameState::Playing);
    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyP);
    assert_eq!(machine.state(), GameState::Paused);
    tap_state(&mut machine, &mut input, &keys, KeyCode::Escape);
    assert_eq!(machine.state(), GameState::Menu);

    assert_eq!(machine.selected(), selected);
}

#[test]
fn paused_resumes_on_enter() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);
    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyP);

    let command = tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);

    assert_eq!(command, None);
    assert_eq!(machine.state(), GameState::Playing);
}

#[test]
fn escape_while_playing_returns_to_menu() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);

    tap_state(&mut machine, &mut input, &keys, KeyCode::Escape);

    assert_eq!(machine.state(), GameState::Menu);
}

#[test]
fn settings_view_is_nested_in_the_menu() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyS);

    let command = tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);
    assert_eq!(command, None);
    assert!(machine.is_settings_open());
    assert_eq!(machine.state(), GameState::Menu);

    // Navigation is ignored while the settings view is open.
    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyS);
    assert_eq!(machine.selected(), MenuOption::Settings);

    tap_state(&mut machine, &mut input, &keys, KeyCode::Escape);
    assert!(!machine.is_settings_open());
    assert_eq!(machine.state(), GameState::Menu);
}

#[test]
fn exit_option_requests_exit() {
    let (mut machine, mut input, keys) = setup();
    tap_state(&mut machine, &mut input, &keys, KeyCode::ArrowUp);

    let command = tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);

    assert_eq!(command, Some(StateCommand::Exit));
}

#[test]
fn visible_sets_follow_the_state() {
    let (mut machine, mut input, keys) = setup();

    let menu = machine.visible_sets();
    assert!(menu.menu && !menu.world && !menu.projectiles && !menu.weapon);

    tap_state(&mut machine, &mut input, &keys, KeyCode::Enter);
    let playing = machine.visible_sets();
    assert!(!playing.menu && playing.world && playing.projectiles && playing.weapon);

    tap_state(&mut machine, &mut input, &keys, KeyCode::KeyP);
    let paused = machine.visible_sets();
    assert!(!paused.menu && paused.world && paused.projectiles && !paused.weapon);
}
