//! Projectile ballistics and the pool that owns live projectiles.
//!
//! Projectiles are plain entities with a [`Body::Kinematic`] velocity. Each
//! tick they fall under gravity, bounce off the ground plane and bounce off
//! the first static entity whose box contains them.

use std::sync::Arc;

use cgmath::{InnerSpace, Vector3};

use crate::{
    config::ProjectileConfig,
    data_structures::{
        entity::{Body, Entity, EntityId},
        model::Mesh,
        table::EntityTable,
        transform::Transform,
    },
};

/// Inclusive axis-aligned box test. `half_extent` is taken by magnitude so a
/// mirrored scale still describes the same box.
pub fn aabb_contains(center: Vector3<f32>, half_extent: Vector3<f32>, point: Vector3<f32>) -> bool {
    (point.x - center.x).abs() <= half_extent.x.abs()
        && (point.y - center.y).abs() <= half_extent.y.abs()
        && (point.z - center.z).abs() <= half_extent.z.abs()
}

/// Semi-implicit Euler: velocity first, then position.
pub fn integrate(transform: &mut Transform, velocity: &mut Vector3<f32>, gravity: f32, dt: f32) {
    velocity.y += gravity * dt;
    transform.translation += *velocity * dt;
}

/// Returns `true` if the projectile touched the ground this tick.
pub fn ground_bounce(
    transform: &mut Transform,
    velocity: &mut Vector3<f32>,
    config: &ProjectileConfig,
) -> bool {
    if transform.translation.y > config.ground_level {
        return false;
    }
    transform.translation.y = config.ground_level;
    velocity.y = -velocity.y * config.bounce_damping;
    velocity.x *= config.ground_friction;
    velocity.z *= config.ground_friction;
    true
}

/// Bounce off the first static entity (in table order) containing the
/// projectile. Later overlaps in the same tick are ignored.
pub fn static_bounce(
    transform: &Transform,
    velocity: &mut Vector3<f32>,
    world: &EntityTable,
    config: &ProjectileConfig,
) -> Option<EntityId> {
    let (id, _) = world.iter().find(|(_, entity)| {
        entity.is_static()
            && aabb_contains(
                entity.transform.translation,
                entity.transform.scale,
                transform.translation,
            )
    })?;
    velocity.y = velocity.y.abs() * config.bounce_damping;
    velocity.x *= config.hit_friction;
    velocity.z *= config.hit_friction;
    Some(id)
}

#[derive(Debug)]
struct Projectile {
    entity: Entity,
    age: f32,
    spawned: u64,
}

/// Fixed-capacity arena of live projectiles.
///
/// Freed slots are recycled through a free list; entity ids are not, they
/// keep coming from the global counter. A projectile lives for
/// `config.lifetime` seconds, and spawning into a full pool evicts the oldest.
#[derive(Debug)]
pub struct ProjectilePool {
    config: ProjectileConfig,
    mesh: Option<Arc<Mesh>>,
    slots: Vec<Option<Projectile>>,
    free: Vec<usize>,
    live: usize,
    spawn_counter: u64,
}

impl ProjectilePool {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            config,
            mesh: None,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            spawn_counter: 0,
        }
    }

    /// Mesh every spawned projectile is drawn with.
    pub fn with_mesh(mut self, mesh: &Arc<Mesh>) -> Self {
        self.mesh = Some(Arc::clone(mesh));
        self
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of arena slots ever allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten().map(|p| &p.entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|entity| entity.id() == id)
    }

    /// Launch a projectile from `origin` along `direction`.
    pub fn spawn(&mut self, origin: Vector3<f32>, direction: Vector3<f32>) -> EntityId {
        if self.live >= self.config.capacity.max(1) {
            self.evict_oldest();
        }

        let direction = if direction.magnitude2() > f32::EPSILON {
            direction.normalize()
        } else {
            Vector3::new(0.0, 0.0, -1.0)
        };
        let scale = self.config.scale;
        let mut entity = Entity::create()
            .with_transform(Transform::from(origin).with_scale([scale, scale, scale]))
            .with_color(self.config.color)
            .with_body(Body::Kinematic {
                velocity: direction * self.config.speed,
            });
        if let Some(mesh) = &self.mesh {
            entity = entity.with_mesh(mesh);
        }
        let id = entity.id();

        let projectile = Projectile {
            entity,
            age: 0.0,
            spawned: self.spawn_counter,
        };
        self.spawn_counter += 1;
        match self.free.pop() {
            Some(slot) => self.slots[slot] = Some(projectile),
            None => self.slots.push(Some(projectile)),
        }
        self.live += 1;
        log::debug!("Projectile {} fired, {} live", id, self.live);
        id
    }

    /// Advance every projectile by `dt`, then drop the expired ones.
    pub fn step(&mut self, dt: f32, world: &EntityTable) {
        for projectile in self.slots.iter_mut().flatten() {
            projectile.age += dt;
            let entity = &mut projectile.entity;
            let Some(mut velocity) = entity.velocity() else {
                continue;
            };

            integrate(&mut entity.transform, &mut velocity, self.config.gravity, dt);
            if ground_bounce(&mut entity.transform, &mut velocity, &self.config) {
                log::trace!("Projectile {} bounced off the ground", entity.id());
            }
            if let Some(hit) = static_bounce(&entity.transform, &mut velocity, world, &self.config) {
                log::trace!("Projectile {} bounced off entity {}", entity.id(), hit);
            }
            entity.body = Some(Body::Kinematic { velocity });
        }

        let lifetime = self.config.lifetime;
        for slot in 0..self.slots.len() {
            if self.slots[slot].as_ref().is_some_and(|p| p.age >= lifetime) {
                self.release(slot);
            }
        }
    }

    pub fn clear(&mut self) {
        for slot in 0..self.slots.len() {
            if self.slots[slot].is_some() {
                self.release(slot);
            }
        }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, p)| p.as_ref().map(|p| (slot, p.spawned)))
            .min_by_key(|(_, spawned)| *spawned)
            .map(|(slot, _)| slot);
        if let Some(slot) = oldest {
            log::debug!("Projectile pool full, evicting the oldest projectile");
            self.release(slot);
        }
    }

    fn release(&mut self, slot: usize) {
        if self.slots[slot].take().is_some() {
            self.free.push(slot);
            self.live -= 1;
        }
    }
}
