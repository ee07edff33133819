//! Sparse per-type component storage
//!
//! One `Option<T>` slot per entity index. Entity counts are tiny, so a flat
//! vector beats anything cleverer.

use super::entity::Entity;

#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    data: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Store a component, returning the one it replaced (if any)
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        let idx = entity.index();
        self.ensure_capacity(idx);
        self.data[idx].replace(component)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.get_mut(entity.index()).and_then(Option::take)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Number of entities holding this component
    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
