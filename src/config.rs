//! Tunables for the window, renderer, controls and physics.
//!
//! Every struct has a `Default` carrying the values the demo ships with.
//! Construct a [`Config`], change what you need and hand it to
//! [`crate::flow::run_with`].

use cgmath::Vector3;
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::input::Button;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub keys: KeyMappings,
    pub controller: ControllerConfig,
    pub projectiles: ProjectileConfig,
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Flow FPS".to_string(),
            width: 900,
            height: 660,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub clear_colour: wgpu::Color,
    /// Number of presentable images (and therefore per-image command slots).
    pub image_count: u32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Upper bound on the frame delta fed into the simulation, in seconds.
    pub max_frame_time: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            image_count: 2,
            fov_y_degrees: 50.0,
            z_near: 0.1,
            z_far: 100.0,
            max_frame_time: 0.25,
        }
    }
}

/// Which physical inputs drive which action. Menu navigation accepts either
/// of the paired keys.
#[derive(Clone, Debug)]
pub struct KeyMappings {
    pub move_left: Button,
    pub move_right: Button,
    pub move_forward: Button,
    pub move_backward: Button,
    pub move_up: Button,
    pub move_down: Button,
    pub jump: Button,
    pub shoot: Button,
    pub exit_game: Button,
    pub pause_game: Button,
    pub menu: Button,
    pub select: Button,
    pub menu_up: [Button; 2],
    pub menu_down: [Button; 2],
}

impl Default for KeyMappings {
    fn default() -> Self {
        Self {
            move_left: Button::Key(KeyCode::KeyA),
            move_right: Button::Key(KeyCode::KeyD),
            move_forward: Button::Key(KeyCode::KeyW),
            move_backward: Button::Key(KeyCode::KeyS),
            move_up: Button::Key(KeyCode::KeyE),
            move_down: Button::Key(KeyCode::KeyQ),
            jump: Button::Key(KeyCode::Space),
            shoot: Button::Mouse(MouseButton::Left),
            exit_game: Button::Key(KeyCode::Escape),
            pause_game: Button::Key(KeyCode::KeyP),
            menu: Button::Key(KeyCode::Escape),
            select: Button::Key(KeyCode::Enter),
            menu_up: [Button::Key(KeyCode::KeyW), Button::Key(KeyCode::ArrowUp)],
            menu_down: [Button::Key(KeyCode::KeyS), Button::Key(KeyCode::ArrowDown)],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub move_speed: f32,
    pub jump_speed: f32,
    /// Acceleration applied to the viewer while airborne (negative = down).
    pub gravity: f32,
    /// Eye height the viewer is clamped to when standing on the ground.
    pub ground_level: f32,
    pub mouse_look: bool,
    pub mouse_sensitivity: f32,
    pub pitch_limit: f32,
    pub spawn_position: Vector3<f32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            jump_speed: 7.0,
            gravity: -9.8,
            ground_level: 1.5,
            mouse_look: true,
            mouse_sensitivity: 0.002,
            pitch_limit: 1.5,
            spawn_position: Vector3::new(0.0, 1.5, 5.0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub gravity: f32,
    /// Fraction of vertical speed kept after any bounce.
    pub bounce_damping: f32,
    /// Horizontal speed kept after touching the ground plane.
    pub ground_friction: f32,
    /// Horizontal speed kept after hitting a static entity.
    pub hit_friction: f32,
    pub ground_level: f32,
    pub scale: f32,
    pub color: [f32; 3],
    /// Seconds a projectile stays alive.
    pub lifetime: f32,
    /// Maximum number of live projectiles; the oldest is evicted beyond it.
    pub capacity: usize,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            gravity: -15.0,
            bounce_damping: 0.7,
            ground_friction: 0.9,
            hit_friction: 0.8,
            ground_level: 0.0,
            scale: 0.05,
            color: [1.0, 1.0, 1.0],
            lifetime: 8.0,
            capacity: 64,
        }
    }
}
