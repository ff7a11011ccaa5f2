//! What the frame controller draws.
//!
//! The game hands the frame controller a [`Scene`]: a camera matrix and an
//! ordered list of [`DrawSet`]s. Each set is an ordered run of
//! [`Drawable`]s. The controller records them front to back without caring
//! whether they came from the menu, the level, the projectile pool or the
//! weapon; picking the active sets is the game-state machine's job.
//!
//! # Key types
//!
//! - [`Drawable<'a>`] borrows a transform, a color and a mesh
//! - [`DrawSet<'a>`] is a named, ordered sequence of drawables
//! - [`Scene<'a>`] bundles the view-projection matrix with the active sets
//!

use cgmath::{Matrix4, SquareMatrix};

use crate::data_structures::{
    entity::Entity, instance::InstanceRaw, model::Mesh, table::EntityTable, transform::Transform,
};

/// One draw call: where, in which color and with which geometry.
#[derive(Clone, Copy, Debug)]
pub struct Drawable<'a> {
    pub transform: &'a Transform,
    pub color: [f32; 3],
    pub mesh: &'a Mesh,
}

impl<'a> Drawable<'a> {
    /// Entities without a mesh are not drawable.
    pub fn from_entity(entity: &'a Entity) -> Option<Self> {
        entity.mesh.as_deref().map(|mesh| Drawable {
            transform: &entity.transform,
            color: entity.color,
            mesh,
        })
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw::new(self.transform, self.color)
    }
}

#[derive(Debug, Default)]
pub struct DrawSet<'a> {
    pub name: &'static str,
    pub drawables: Vec<Drawable<'a>>,
}

impl<'a> DrawSet<'a> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            drawables: Vec::new(),
        }
    }

    /// Every drawable entity of `table`, in table order.
    pub fn from_table(name: &'static str, table: &'a EntityTable) -> Self {
        Self::from_entities(name, table.iter().map(|(_, entity)| entity))
    }

    pub fn from_entities(name: &'static str, entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        Self {
            name,
            drawables: entities
                .into_iter()
                .filter_map(Drawable::from_entity)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

#[derive(Debug)]
pub struct Scene<'a> {
    pub view_proj: Matrix4<f32>,
    pub sets: Vec<DrawSet<'a>>,
}

impl<'a> Scene<'a> {
    pub fn new(view_proj: Matrix4<f32>) -> Self {
        Self {
            view_proj,
            sets: Vec::new(),
        }
    }

    /// Nothing to draw; only the clear colour ends up on screen.
    pub fn empty() -> Self {
        Self::new(Matrix4::identity())
    }

    pub fn with_set(mut self, set: DrawSet<'a>) -> Self {
        self.sets.push(set);
        self
    }

    /// All drawables across sets, set order first, then order within a set.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable<'a>> {
        self.sets.iter().flat_map(|set| set.drawables.iter())
    }

    pub fn len(&self) -> usize {
        self.sets.iter().map(DrawSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
