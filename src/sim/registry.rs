//! Live entity registry with deferred mutation
//!
//! Adds and removes issued while entities are being updated or colliding are
//! queued in `Commands` and applied at `Registry::flush`, so a strategy that
//! spawns pucks or removes its brick never invalidates the traversal in
//! progress. Iteration order is stable: by layer, then by entity ID.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Stable entity identifier (allocated at `add` time, never reused)
pub type EntityId = u32;

/// Render/update layer. Does not affect collision eligibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Layer {
    Background,
    #[default]
    Default,
    Ui,
}

#[derive(Debug)]
enum Command {
    Add { id: EntityId, layer: Layer, entity: Box<Entity> },
    Remove { id: EntityId },
}

/// Queue of pending registry mutations
#[derive(Debug)]
pub struct Commands {
    next_id: EntityId,
    queue: Vec<Command>,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            next_id: 1,
            queue: Vec::new(),
        }
    }
}

impl Commands {
    /// Queue an entity for insertion. The ID is valid immediately, the entity
    /// becomes visible after the next flush.
    pub fn add(&mut self, entity: Entity, layer: Layer) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Command::Add {
            id,
            layer,
            entity: Box::new(entity),
        });
        id
    }

    /// Queue an entity for removal (no-op if it is gone by flush time)
    pub fn remove(&mut self, id: EntityId) {
        self.queue.push(Command::Remove { id });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued mutations
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug)]
struct Slot {
    layer: Layer,
    entity: Entity,
}

/// All live entities plus the pending command queue
#[derive(Debug, Default)]
pub struct Registry {
    slots: BTreeMap<EntityId, Slot>,
    commands: Commands,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an insertion (see `Commands::add`)
    pub fn add(&mut self, entity: Entity, layer: Layer) -> EntityId {
        self.commands.add(entity, layer)
    }

    /// Queue a removal
    pub fn remove(&mut self, id: EntityId) {
        self.commands.remove(id);
    }

    pub fn commands_mut(&mut self) -> &mut Commands {
        &mut self.commands
    }

    /// Apply every queued mutation in the order it was issued
    pub fn flush(&mut self) {
        for command in self.commands.queue.drain(..) {
            match command {
                Command::Add { id, layer, entity } => {
                    log::trace!("add {:?} #{} on {:?}", entity.tag(), id, layer);
                    self.slots.insert(
                        id,
                        Slot {
                            layer,
                            entity: *entity,
                        },
                    );
                }
                Command::Remove { id } => {
                    if self.slots.remove(&id).is_some() {
                        log::trace!("remove #{}", id);
                    }
                }
            }
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|slot| &slot.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(&id).map(|slot| &mut slot.entity)
    }

    /// Mutable entity together with the command queue, for callbacks that
    /// spawn or remove other entities
    pub fn entity_and_commands(&mut self, id: EntityId) -> Option<(&mut Entity, &mut Commands)> {
        let Self { slots, commands } = self;
        slots.get_mut(&id).map(|slot| (&mut slot.entity, commands))
    }

    pub fn layer_of(&self, id: EntityId) -> Option<Layer> {
        self.slots.get(&id).map(|slot| slot.layer)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Live entities by ID
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().map(|(id, slot)| (*id, &slot.entity))
    }

    /// Snapshot of live IDs in update order (layer, then ID)
    pub fn update_order(&self) -> Vec<EntityId> {
        let mut ids: Vec<(Layer, EntityId)> =
            self.slots.iter().map(|(id, slot)| (slot.layer, *id)).collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Snapshot of IDs whose entity matches the predicate
    pub fn ids_where(&self, mut pred: impl FnMut(&Entity) -> bool) -> Vec<EntityId> {
        self.slots
            .iter()
            .filter(|(_, slot)| pred(&slot.entity))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Count live entities matching the predicate
    pub fn count_where(&self, mut pred: impl FnMut(&Entity) -> bool) -> usize {
        self.slots.values().filter(|slot| pred(&slot.entity)).count()
    }
}
