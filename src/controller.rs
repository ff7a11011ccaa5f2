//! First-person movement: mouse look, WASD, jumping and gravity.
//!
//! The controller drives the viewer's [`Transform`] directly. Its rotation
//! holds pitch in `x` and yaw in `y`, which is also what the camera reads.
//!
//! World convention: right-handed, +Y up, yaw 0 looks down −Z.

use std::f32::consts::TAU;

use cgmath::{InnerSpace, Vector3};

use crate::{
    config::{ControllerConfig, KeyMappings},
    data_structures::transform::Transform,
    input::InputState,
};

/// Side effects the controller asks the caller to perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerOutput {
    pub exit_requested: bool,
}

#[derive(Debug)]
pub struct FpsController {
    pub keys: KeyMappings,
    pub config: ControllerConfig,
    last_cursor: Option<(f64, f64)>,
    vertical_velocity: f32,
    on_ground: bool,
}

impl FpsController {
    pub fn new(keys: KeyMappings, config: ControllerConfig) -> Self {
        Self {
            keys,
            config,
            last_cursor: None,
            vertical_velocity: 0.0,
            on_ground: false,
        }
    }

    /// The pose the viewer is put in when a game starts.
    pub fn spawn_pose(&self) -> Transform {
        Transform::from(self.config.spawn_position)
    }

    /// Forget the cursor baseline and any vertical motion.
    pub fn reset(&mut self) {
        self.last_cursor = None;
        self.vertical_velocity = 0.0;
        self.on_ground = false;
    }

    /// Drop the cursor baseline; the next sample seeds a new one.
    pub fn forget_cursor(&mut self) {
        self.last_cursor = None;
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn update(&mut self, input: &InputState, dt: f32, viewer: &mut Transform) -> ControllerOutput {
        if input.pressed(self.keys.exit_game) {
            return ControllerOutput {
                exit_requested: true,
            };
        }

        if self.config.mouse_look {
            if let Some((x, y)) = input.cursor() {
                // The first sample only seeds the baseline.
                let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));
                self.last_cursor = Some((x, y));
                viewer.rotation.y += (x - last_x) as f32 * self.config.mouse_sensitivity;
                viewer.rotation.x -= (y - last_y) as f32 * self.config.mouse_sensitivity;
            }
        }
        let limit = self.config.pitch_limit;
        viewer.rotation.x = viewer.rotation.x.clamp(-limit, limit);
        viewer.rotation.y = wrap_angle(viewer.rotation.y);

        let yaw = viewer.rotation.y;
        let forward = forward_dir(yaw);
        let right = right_dir(yaw);
        let up = Vector3::unit_y();

        let mut move_dir = Vector3::new(0.0, 0.0, 0.0);
        if input.is_down(self.keys.move_forward) {
            move_dir += forward;
        }
        if input.is_down(self.keys.move_backward) {
            move_dir -= forward;
        }
        if input.is_down(self.keys.move_right) {
            move_dir += right;
        }
        if input.is_down(self.keys.move_left) {
            move_dir -= right;
        }
        if move_dir.magnitude2() > f32::EPSILON {
            viewer.translation += move_dir.normalize() * self.config.move_speed * dt;
        }

        if viewer.translation.y <= self.config.ground_level {
            self.on_ground = true;
            viewer.translation.y = self.config.ground_level;
            self.vertical_velocity = 0.0;
        } else {
            self.on_ground = false;
        }

        if input.pressed(self.keys.jump) && self.on_ground {
            self.vertical_velocity = self.config.jump_speed;
            self.on_ground = false;
        }
        if !self.on_ground {
            self.vertical_velocity += self.config.gravity * dt;
        }
        viewer.translation.y += self.vertical_velocity * dt;

        // Flying cancels gravity.
        if input.is_down(self.keys.move_up) {
            viewer.translation += up * self.config.move_speed * dt;
            self.vertical_velocity = 0.0;
        }
        if input.is_down(self.keys.move_down) {
            viewer.translation -= up * self.config.move_speed * dt;
            self.vertical_velocity = 0.0;
        }

        ControllerOutput::default()
    }

    /// True exactly once per press of the fire button.
    pub fn should_fire(&self, input: &InputState) -> bool {
        input.pressed(self.keys.shoot)
    }

    /// Unit vector along the line of sight; movement plays no part in it.
    pub fn fire_direction(&self, viewer: &Transform) -> Vector3<f32> {
        view_dir(viewer.rotation.y, viewer.rotation.x)
    }

    /// Where the first-person weapon sits for the given viewer: slightly
    /// ahead of, right of and below the eye, pointing along the view.
    pub fn weapon_pose(&self, viewer: &Transform) -> Transform {
        let yaw = viewer.rotation.y;
        let pitch = viewer.rotation.x;
        let translation = viewer.translation + view_dir(yaw, pitch) * 0.8 + right_dir(yaw) * 0.25
            - Vector3::unit_y() * 0.15;
        Transform::from(translation).with_rotation([pitch, -yaw, 0.0])
    }
}

/// Wrap into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn forward_dir(yaw: f32) -> Vector3<f32> {
    Vector3::new(yaw.sin(), 0.0, -yaw.cos())
}

pub fn right_dir(yaw: f32) -> Vector3<f32> {
    Vector3::new(yaw.cos(), 0.0, yaw.sin())
}

pub fn view_dir(yaw: f32, pitch: f32) -> Vector3<f32> {
    Vector3::new(pitch.cos() * yaw.sin(), pitch.sin(), -pitch.cos() * yaw.cos()).normalize()
}
