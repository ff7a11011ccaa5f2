//! Insertion-ordered entity storage.

use std::collections::HashMap;

use crate::data_structures::entity::{Entity, EntityId};

/// Owns entities keyed by id and yields them in insertion order.
///
/// Rendering and simulation both walk the table front to back, so the order
/// in which entities were inserted is the order in which they are drawn.
#[derive(Debug, Default)]
pub struct EntityTable {
    entries: Vec<(EntityId, Entity)>,
    index: HashMap<EntityId, usize>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` under `id`. Fails if `id` is already taken.
    pub fn insert(&mut self, id: EntityId, entity: Entity) -> anyhow::Result<()> {
        if self.index.contains_key(&id) {
            anyhow::bail!("entity id {} is already present in the table", id);
        }
        self.index.insert(id, self.entries.len());
        self.entries.push((id, entity));
        Ok(())
    }

    /// Insert under the entity's own id.
    pub fn push(&mut self, entity: Entity) -> anyhow::Result<EntityId> {
        let id = entity.id();
        self.insert(id, entity)?;
        Ok(id)
    }

    /// Remove and return the entity, keeping the remaining order intact.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let position = self.index.remove(&id)?;
        let (_, entity) = self.entries.remove(position);
        for (shifted, (key, _)) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(*key, shifted);
        }
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index.get(&id).map(|&i| &mut self.entries[i].1)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entries.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.entries.iter_mut().map(|(id, entity)| (*id, entity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
