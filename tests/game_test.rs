use flow_fps::{
    config::Config,
    data_structures::transform::Transform,
    game::{
        Game,
        state::{GameState, MenuOption},
    },
    input::InputState,
};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::common::test_utils::{assert_vec_close, tap};

mod common;

const DT: f32 = 1.0 / 60.0;

fn new_game() -> Game {
    Game::new(&Config::default(), None).expect("level builds without meshes")
}

fn press(game: &mut Game, input: &mut InputState, key: impl Into<flow_fps::input::Button>) -> bool {
    tap(input, key, |input| game.update(input, DT))
}

fn set_names(game: &Game) -> Vec<&'static str> {
    game.scene(1.0).sets.iter().map(|set| set.name).collect()
}

#[test]
fn starts_in_the_menu() {
    let game = new_game();

    assert_eq!(game.state(), GameState::Menu);
    assert_eq!(set_names(&game), vec!["menu"]);
    assert_eq!(game.menu().table.len(), 8);
}

#[test]
fn level_is_made_of_static_colliders() {
    let game = new_game();

    assert_eq!(game.world().len(), 10);
    assert!(game.world().iter().all(|(_, entity)| entity.is_static()));
}

#[test]
fn menu_highlights_the_selected_option() {
    let mut game = new_game();
    let mut input = InputState::new();

    press(&mut game, &mut input, KeyCode::KeyS);

    let selected = game.menu().option(MenuOption::Settings).unwrap();
    let other = game.menu().option(MenuOption::StartGame).unwrap();
    assert_vec_close(selected.transform.scale, [2.5, 0.4, 0.6]);
    assert_vec_close(other.transform.scale, [2.0, 0.3, 0.5]);
    assert_eq!(other.color, [0.1, 0.4, 0.1]);
}

#[test]
fn starting_puts_the_viewer_at_spawn() {
    let mut game = new_game();
    let mut input = InputState::new();
    *game.viewer_mut() = Transform::new().with_translation([9.0, 9.0, 9.0]);

    press(&mut game, &mut input, KeyCode::Enter);

    assert_eq!(game.state(), GameState::Playing);
    assert_vec_close(game.viewer().translation, [0.0, 1.5, 5.0]);
    assert_eq!(set_names(&game), vec!["world", "projectiles", "weapon"]);
}

#[test]
fn shooting_spawns_one_projectile_per_click() {
    let mut game = new_game();
    let mut input = InputState::new();
    press(&mut game, &mut input, KeyCode::Enter);

    input.press(MouseButton::Left);
    for _ in 0..10 {
        game.update(&input, DT);
        input.end_frame();
    }
    input.release(MouseButton::Left);
    input.end_frame();

    assert_eq!(game.projectiles().len(), 1);
    let projectile = game.projectiles().iter().next().unwrap();
    // Launched from just ahead of the weapon, so in front of the viewer.
    assert!(projectile.transform.translation.z < game.viewer().translation.z);
}

#[test]
fn pausing_freezes_projectiles_and_hides_the_weapon() {
    let mut game = new_game();
    let mut input = InputState::new();
    press(&mut game, &mut input, KeyCode::Enter);
    press(&mut game, &mut input, MouseButton::Left);
    press(&mut game, &mut input, KeyCode::KeyP);
    let frozen = game.projectiles().iter().next().unwrap().transform;

    for _ in 0..10 {
        game.update(&input, DT);
        input.end_frame();
    }

    assert_eq!(game.state(), GameState::Paused);
    assert_eq!(game.projectiles().iter().next().unwrap().transform, frozen);
    assert_eq!(set_names(&game), vec!["world", "projectiles"]);
}

#[test]
fn weapon_tracks_the_viewer() {
    let mut game = new_game();
    let mut input = InputState::new();
    press(&mut game, &mut input, KeyCode::Enter);

    input.press(KeyCode::KeyD);
    for _ in 0..30 {
        game.update(&input, DT);
        input.end_frame();
    }

    let expected = game.controller().weapon_pose(game.viewer());
    assert_eq!(game.weapon().transform, expected);
}

#[test]
fn exit_option_ends_the_game() {
    let mut game = new_game();
    let mut input = InputState::new();
    press(&mut game, &mut input, KeyCode::ArrowUp);

    assert!(press(&mut game, &mut input, KeyCode::Enter));
}

#[test]
fn escape_while_playing_goes_back_to_the_menu_without_exiting() {
    let mut game = new_game();
    let mut input = InputState::new();
    press(&mut game, &mut input, KeyCode::Enter);

    let exit = press(&mut game, &mut input, KeyCode::Escape);

    assert!(!exit);
    assert_eq!(game.state(), GameState::Menu);
    assert_eq!(game.states().selected(), MenuOption::StartGame);
}
