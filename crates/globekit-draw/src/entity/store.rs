//! In-memory entity collection.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::descriptor::EntityDescriptor;

/// Handle to an entity in an [`EntityStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// The raw id value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns every entity the drawing tool creates.
///
/// Shared behind `Rc` between the tool, the gesture closures, and callers;
/// all mutation goes through interior mutability. Ids are sequential and
/// never reused within a store.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: RefCell<HashMap<EntityId, EntityDescriptor>>,
    next_id: Cell<u64>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor and returns its new id.
    pub fn add(&self, descriptor: EntityDescriptor) -> EntityId {
        let id = EntityId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entities.borrow_mut().insert(id, descriptor);
        id
    }

    /// Removes an entity, returning its descriptor. `None` when the id is
    /// unknown (already removed ids are not an error).
    pub fn remove(&self, id: EntityId) -> Option<EntityDescriptor> {
        self.entities.borrow_mut().remove(&id)
    }

    /// Returns a clone of the descriptor.
    pub fn get(&self, id: EntityId) -> Option<EntityDescriptor> {
        self.entities.borrow().get(&id).cloned()
    }

    /// Runs a closure over the descriptor without cloning it.
    pub fn with_entity<R>(&self, id: EntityId, f: impl FnOnce(&EntityDescriptor) -> R) -> Option<R> {
        self.entities.borrow().get(&id).map(f)
    }

    /// Runs a closure over the descriptor with mutable access.
    pub fn with_entity_mut<R>(
        &self,
        id: EntityId,
        f: impl FnOnce(&mut EntityDescriptor) -> R,
    ) -> Option<R> {
        self.entities.borrow_mut().get_mut(&id).map(f)
    }

    /// Ids of every entity stamped with the given layer, ascending.
    /// Unstamped entities (transient previews) never match.
    pub fn ids_in_layer(&self, layer: &str) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .entities
            .borrow()
            .iter()
            .filter(|(_, d)| d.properties.as_ref().is_some_and(|p| p.layer == layer))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Every id in the store, ascending.
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.borrow().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of entities in the store.
    pub fn len(&self) -> usize {
        self.entities.borrow().len()
    }

    /// Reports whether the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.borrow().is_empty()
    }

    /// Removes every entity.
    pub fn clear(&self) {
        self.entities.borrow_mut().clear();
    }
}
