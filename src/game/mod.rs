//! The FPS demo: menu, level, weapon and projectiles.
//!
//! [`Game`] owns every entity table and advances them once per frame from the
//! sampled [`InputState`]. Rendering only borrows it through [`Game::scene`].

pub mod physics;
pub mod scene;
pub mod state;

use std::iter;

use crate::{
    camera::Camera,
    config::{Config, KeyMappings},
    controller::FpsController,
    data_structures::{entity::Entity, table::EntityTable, transform::Transform},
    input::InputState,
    render::{DrawSet, Scene},
    resources::MeshLibrary,
};

use self::{
    physics::ProjectilePool,
    scene::MenuLayout,
    state::{GameState, StateCommand, StateMachine},
};

/// How far ahead of the weapon projectiles appear.
const MUZZLE_OFFSET: f32 = 0.5;
const WEAPON_GREY: [f32; 3] = [0.3, 0.3, 0.3];

#[derive(Debug)]
pub struct Game {
    keys: KeyMappings,
    camera: Camera,
    controller: FpsController,
    states: StateMachine,
    world: EntityTable,
    menu: MenuLayout,
    projectiles: ProjectilePool,
    weapon: Entity,
    viewer: Transform,
    menu_viewer: Transform,
    elapsed: f32,
}

impl Game {
    /// Build the level and the menu. Pass `None` for `meshes` to simulate
    /// without anything to draw.
    pub fn new(config: &Config, meshes: Option<&MeshLibrary>) -> anyhow::Result<Self> {
        let controller = FpsController::new(config.keys.clone(), config.controller.clone());
        let viewer = controller.spawn_pose();

        let mut projectiles = ProjectilePool::new(config.projectiles.clone());
        let mut weapon = Entity::create().with_color(WEAPON_GREY);
        if let Some(meshes) = meshes {
            projectiles = projectiles.with_mesh(&meshes.projectile);
            weapon = weapon.with_mesh(&meshes.weapon);
        }
        weapon.transform = controller.weapon_pose(&viewer);

        let game = Self {
            keys: config.keys.clone(),
            camera: Camera::new(&config.render),
            controller,
            states: StateMachine::new(),
            world: scene::build_world(meshes)?,
            menu: MenuLayout::build(meshes)?,
            projectiles,
            weapon,
            viewer,
            menu_viewer: scene::menu_viewer(),
            elapsed: 0.0,
        };
        game.states.log_menu();
        Ok(game)
    }

    /// Advance one frame. Returns `true` when the player asked to quit.
    pub fn update(&mut self, input: &InputState, dt: f32) -> bool {
        self.elapsed += dt;

        match self.states.handle_input(input, &self.keys) {
            Some(StateCommand::StartGame) => {
                self.viewer = self.controller.spawn_pose();
                self.controller.reset();
            }
            Some(StateCommand::Exit) => return true,
            None => {}
        }

        if self.states.is_simulating() {
            if self.controller.update(input, dt, &mut self.viewer).exit_requested {
                return true;
            }
            self.weapon.transform = self.controller.weapon_pose(&self.viewer);
            if self.controller.should_fire(input) {
                self.fire();
            }
            self.projectiles.step(dt, &self.world);
        } else {
            // The cursor keeps moving while the game is not running; don't
            // turn that into one large look delta on resume.
            self.controller.forget_cursor();
        }

        if self.states.state() == GameState::Menu {
            self.menu.highlight(self.states.selected(), self.elapsed);
        }
        false
    }

    fn fire(&mut self) {
        let direction = self.controller.fire_direction(&self.viewer);
        let origin = self.weapon.transform.translation + direction * MUZZLE_OFFSET;
        let id = self.projectiles.spawn(origin, direction);
        log::debug!(
            "Fired projectile {} towards {:?}, {} in flight",
            id,
            direction,
            self.projectiles.len()
        );
    }

    /// Everything visible in the current state, in draw order.
    pub fn scene(&self, aspect: f32) -> Scene<'_> {
        let visible = self.states.visible_sets();
        let viewer = if visible.menu {
            &self.menu_viewer
        } else {
            &self.viewer
        };

        let mut scene = Scene::new(self.camera.view_projection(viewer, aspect));
        if visible.menu {
            scene = scene.with_set(DrawSet::from_table("menu", &self.menu.table));
        }
        if visible.world {
            scene = scene.with_set(DrawSet::from_table("world", &self.world));
        }
        if visible.projectiles {
            scene = scene.with_set(DrawSet::from_entities("projectiles", self.projectiles.iter()));
        }
        if visible.weapon {
            scene = scene.with_set(DrawSet::from_entities("weapon", iter::once(&self.weapon)));
        }
        scene
    }

    pub fn state(&self) -> GameState {
        self.states.state()
    }

    pub fn states(&self) -> &StateMachine {
        &self.states
    }

    pub fn viewer(&self) -> &Transform {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Transform {
        &mut self.viewer
    }

    pub fn controller(&self) -> &FpsController {
        &self.controller
    }

    pub fn world(&self) -> &EntityTable {
        &self.world
    }

    pub fn menu(&self) -> &MenuLayout {
        &self.menu
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn weapon(&self) -> &Entity {
        &self.weapon
    }
}
