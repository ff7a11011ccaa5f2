//! Level and menu layout.
//!
//! Builders take an optional [`MeshLibrary`]; without one the entities carry
//! no mesh, which is enough for simulation and keeps tests off the GPU.

use std::sync::Arc;

use cgmath::Vector3;

use crate::{
    data_structures::{
        entity::{Body, Entity, EntityId},
        model::Mesh,
        table::EntityTable,
        transform::Transform,
    },
    game::state::MenuOption,
    resources::MeshLibrary,
};

const PLATFORM_GREY: [f32; 3] = [0.7, 0.7, 0.7];
const TITLE_YELLOW: [f32; 3] = [0.9, 0.9, 0.1];

const OPTION_SCALE: [f32; 3] = [2.0, 0.3, 0.5];
const SELECTED_OPTION_SCALE: [f32; 3] = [2.5, 0.4, 0.6];

fn place(
    mesh: Option<&Arc<Mesh>>,
    translation: [f32; 3],
    scale: [f32; 3],
    color: [f32; 3],
) -> Entity {
    let entity = Entity::create()
        .with_transform(Transform::new().with_translation(translation).with_scale(scale))
        .with_color(color);
    match mesh {
        Some(mesh) => entity.with_mesh(mesh),
        None => entity,
    }
}

/// The static level: four platforms around an opening, two floating
/// platforms, three targets and the floor. Everything is a collider.
pub fn build_world(meshes: Option<&MeshLibrary>) -> anyhow::Result<EntityTable> {
    log::info!("Loading game objects");
    let cube = meshes.map(|m| &m.cube);
    let floor = meshes.map(|m| &m.floor);

    let mut world = EntityTable::new();
    for (x, z) in [(-2.0, -2.0), (2.0, -2.0), (-2.0, 2.0), (2.0, 2.0)] {
        world.push(place(cube, [x, 1.0, z], [1.5, 0.2, 1.5], PLATFORM_GREY).with_body(Body::Static))?;
    }

    world.push(place(cube, [4.0, 2.5, 4.0], [1.0, 0.2, 1.0], [0.6, 0.8, 0.6]).with_body(Body::Static))?;
    world.push(place(cube, [-4.0, 2.0, -3.0], [1.0, 0.2, 1.0], [0.8, 0.6, 0.6]).with_body(Body::Static))?;

    world.push(place(cube, [3.0, 3.0, 1.0], [0.3, 0.3, 0.3], [1.0, 0.2, 0.2]).with_body(Body::Static))?;
    world.push(place(cube, [-3.0, 3.0, -1.0], [0.3, 0.3, 0.3], [0.2, 0.2, 1.0]).with_body(Body::Static))?;
    world.push(place(cube, [0.0, 5.0, 5.0], [0.4, 0.4, 0.4], [1.0, 1.0, 0.2]).with_body(Body::Static))?;

    // A thin slab just under the ground plane; the ground bounce keeps
    // projectiles out of it, so it never double-bounces them.
    world.push(
        place(floor, [0.0, -0.05, 0.0], [12.0, 0.04, 12.0], [0.3, 0.5, 0.3]).with_body(Body::Static),
    )?;

    log::info!("Loaded {} game objects", world.len());
    Ok(world)
}

/// Menu entities plus the ids of the three option bars, indexed by
/// [`MenuOption::index`].
#[derive(Debug)]
pub struct MenuLayout {
    pub table: EntityTable,
    pub options: [EntityId; 3],
}

impl MenuLayout {
    pub fn build(meshes: Option<&MeshLibrary>) -> anyhow::Result<Self> {
        let cube = meshes.map(|m| &m.cube);
        let mut table = EntityTable::new();

        let mut options = [0; 3];
        for (option, y) in MenuOption::ALL.into_iter().zip([0.5, 0.0, -0.5]) {
            options[option.index()] =
                table.push(place(cube, [0.0, y, 0.0], OPTION_SCALE, option_color(option)))?;
        }
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            table.push(place(cube, [x, 1.5, 0.0], [0.3, 0.3, 0.3], TITLE_YELLOW))?;
        }

        Ok(Self { table, options })
    }

    /// Enlarge the selected bar and pulse its colour; dim the others.
    pub fn highlight(&mut self, selected: MenuOption, time: f32) {
        let pulse = 0.5 + 0.3 * (time * 3.0).sin();
        for option in MenuOption::ALL {
            let Some(entity) = self.table.get_mut(self.options[option.index()]) else {
                continue;
            };
            if option == selected {
                let [r, g, b] = bright_color(option);
                entity.transform.scale = SELECTED_OPTION_SCALE.into();
                entity.color = [r * pulse, g * pulse, b * pulse];
            } else {
                entity.transform.scale = OPTION_SCALE.into();
                entity.color = dim_color(option);
            }
        }
    }

    pub fn option(&self, option: MenuOption) -> Option<&Entity> {
        self.table.get(self.options[option.index()])
    }
}

fn option_color(option: MenuOption) -> [f32; 3] {
    match option {
        MenuOption::StartGame => [0.2, 0.8, 0.2],
        MenuOption::Settings => [0.2, 0.2, 0.8],
        MenuOption::ExitGame => [0.8, 0.2, 0.2],
    }
}

fn bright_color(option: MenuOption) -> [f32; 3] {
    match option {
        MenuOption::StartGame => [0.2, 1.0, 0.2],
        MenuOption::Settings => [0.2, 0.2, 1.0],
        MenuOption::ExitGame => [1.0, 0.2, 0.2],
    }
}

fn dim_color(option: MenuOption) -> [f32; 3] {
    match option {
        MenuOption::StartGame => [0.1, 0.4, 0.1],
        MenuOption::Settings => [0.1, 0.1, 0.4],
        MenuOption::ExitGame => [0.4, 0.1, 0.1],
    }
}

/// Fixed pose the menu is viewed from.
pub fn menu_viewer() -> Transform {
    Transform::from(Vector3::new(0.0, 0.5, 7.0))
}
