use std::f32::consts::TAU;

use cgmath::InnerSpace;
use flow_fps::{
    config::{ControllerConfig, KeyMappings},
    controller::{FpsController, forward_dir, right_dir, view_dir, wrap_angle},
    data_structures::transform::Transform,
    input::InputState,
};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::common::test_utils::{assert_close, assert_vec_close};

mod common;

const DT: f32 = 1.0 / 60.0;

fn setup() -> (FpsController, Transform, InputState) {
    let controller = FpsController::new(KeyMappings::default(), ControllerConfig::default());
    let viewer = controller.spawn_pose();
    (controller, viewer, InputState::new())
}

#[test]
fn first_cursor_sample_only_seeds_the_baseline() {
    let (mut controller, mut viewer, mut input) = setup();

    input.move_cursor(500.0, -250.0);
    controller.update(&input, DT, &mut viewer);

    assert_close(viewer.rotation.x, 0.0);
    assert_close(viewer.rotation.y, 0.0);
}

#[test]
fn mouse_motion_turns_the_view() {
    let (mut controller, mut viewer, mut input) = setup();
    input.move_cursor(10.0, 10.0);
    controller.update(&input, DT, &mut viewer);

    input.move_cursor(100.0, 50.0);
    controller.update(&input, DT, &mut viewer);

    assert_close(viewer.rotation.y, 100.0 * 0.002);
    assert_close(viewer.rotation.x, -50.0 * 0.002);
}

#[test]
fn yaw_and_pitch_stay_bounded() {
    let (mut controller, mut viewer, mut input) = setup();
    let deltas = [(3000.0, 900.0), (-7000.0, -4000.0), (12345.0, 2500.0), (-1.0, -9999.0)];

    for (dx, dy) in deltas.iter().cycle().take(200) {
        input.move_cursor(*dx, *dy);
        controller.update(&input, DT, &mut viewer);
        input.end_frame();

        assert!(viewer.rotation.y >= 0.0 && viewer.rotation.y < TAU, "yaw {}", viewer.rotation.y);
        assert!(
            viewer.rotation.x >= -1.5 && viewer.rotation.x <= 1.5,
            "pitch {}",
            viewer.rotation.x
        );
    }
}

#[test]
fn wrap_angle_lands_in_range() {
    assert_close(wrap_angle(-0.5), TAU - 0.5);
    assert_close(wrap_angle(TAU + 1.0), 1.0);
    assert_eq!(wrap_angle(0.0), 0.0);
    assert!(wrap_angle(-1e-9) < TAU);
}

#[test]
fn forward_moves_along_negative_z_at_zero_yaw() {
    let (mut controller, mut viewer, mut input) = setup();
    input.press(KeyCode::KeyW);

    controller.update(&input, 1.0, &mut viewer);

    assert_vec_close(viewer.translation, [0.0, 1.5, 5.0 - 3.0]);
}

#[test]
fn diagonal_movement_is_normalized() {
    let (mut controller, mut viewer, mut input) = setup();
    let start = viewer.translation;
    input.press(KeyCode::KeyW);
    input.press(KeyCode::KeyD);

    controller.update(&input, 1.0, &mut viewer);

    assert_close((viewer.translation - start).magnitude(), 3.0);
}

#[test]
fn basis_vectors_follow_yaw() {
    assert_vec_close(forward_dir(0.0), [0.0, 0.0, -1.0]);
    assert_vec_close(right_dir(0.0), [1.0, 0.0, 0.0]);
    assert_vec_close(forward_dir(std::f32::consts::FRAC_PI_2), [1.0, 0.0, 0.0]);
    assert_vec_close(view_dir(0.0, std::f32::consts::FRAC_PI_2), [0.0, 1.0, 0.0]);
}

#[test]
fn held_jump_only_takes_off_once() {
    let (mut controller, mut viewer, mut input) = setup();
    let ground = 1.5;
    input.press(KeyCode::Space);

    let mut takeoffs = 0;
    let mut apex: f32 = ground;
    for _ in 0..300 {
        let grounded_before = viewer.translation.y <= ground;
        controller.update(&input, DT, &mut viewer);
        input.end_frame();
        if grounded_before && viewer.translation.y > ground {
            takeoffs += 1;
        }
        apex = apex.max(viewer.translation.y);
    }

    assert_eq!(takeoffs, 1);
    assert!(apex > ground + 2.0, "apex {}", apex);
    assert_close(viewer.translation.y, ground);
    assert!(controller.is_on_ground());

    // Release and press again: a second jump.
    input.release(KeyCode::Space);
    controller.update(&input, DT, &mut viewer);
    input.end_frame();
    input.press(KeyCode::Space);
    controller.update(&input, DT, &mut viewer);
    assert!(viewer.translation.y > ground);
    assert!(controller.vertical_velocity() > 0.0);
}

#[test]
fn flying_cancels_vertical_velocity() {
    let (mut controller, mut viewer, mut input) = setup();
    input.press(KeyCode::KeyE);

    controller.update(&input, 0.5, &mut viewer);

    assert_close(viewer.translation.y, 1.5 + 1.5);
    assert_eq!(controller.vertical_velocity(), 0.0);
}

#[test]
fn fire_is_edge_triggered() {
    let (controller, _, mut input) = setup();

    input.press(MouseButton::Left);
    assert!(controller.should_fire(&input));
    input.end_frame();
    assert!(!controller.should_fire(&input));

    input.release(MouseButton::Left);
    input.end_frame();
    input.press(MouseButton::Left);
    assert!(controller.should_fire(&input));
}

#[test]
fn fire_direction_comes_from_the_view_only() {
    let (controller, viewer, _) = setup();
    let aimed = viewer.with_rotation([0.3, 1.0, 0.0]);
    let moved = aimed.with_translation([10.0, 4.0, -2.0]);

    let direction = controller.fire_direction(&aimed);

    assert_close(direction.magnitude(), 1.0);
    assert_eq!(direction, controller.fire_direction(&moved));
    assert_vec_close(direction, view_dir(1.0, 0.3).into());
}

#[test]
fn exit_key_requests_exit() {
    let (mut controller, mut viewer, mut input) = setup();
    input.press(KeyCode::Escape);

    assert!(controller.update(&input, DT, &mut viewer).exit_requested);
}

#[test]
fn weapon_sits_ahead_right_and_below_the_eye() {
    let (controller, viewer, _) = setup();

    let weapon = controller.weapon_pose(&viewer);

    assert_vec_close(weapon.translation, [0.25, 1.5 - 0.15, 5.0 - 0.8]);
}
