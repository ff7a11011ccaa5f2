//! Entities: the unit of everything that is simulated or drawn.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use cgmath::Vector3;

use crate::data_structures::{model::Mesh, transform::Transform};

pub type EntityId = u32;

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(0);

/// Optional physics attribute of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Body {
    /// Never moves; projectiles collide with it.
    Static,
    /// Integrated every tick with the given velocity (units per second).
    Kinematic { velocity: Vector3<f32> },
}

/// A transform, a color, an optional shared mesh and an optional body.
///
/// Entities are move-only. Ids come from a process-wide counter and are never
/// handed out twice, even after the entity is dropped.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    pub transform: Transform,
    pub color: [f32; 3],
    pub mesh: Option<Arc<Mesh>>,
    pub body: Option<Body>,
}

impl Entity {
    /// Allocate the next id and return a fresh entity at the origin.
    pub fn create() -> Self {
        let id = NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            transform: Transform::default(),
            color: [0.0; 3],
            mesh: None,
            body: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn with_mesh(mut self, mesh: &Arc<Mesh>) -> Self {
        self.mesh = Some(Arc::clone(mesh));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn is_static(&self) -> bool {
        matches!(self.body, Some(Body::Static))
    }

    pub fn velocity(&self) -> Option<Vector3<f32>> {
        match self.body {
            Some(Body::Kinematic { velocity }) => Some(velocity),
            _ => None,
        }
    }
}
