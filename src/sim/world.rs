//! Entity/component registry
//!
//! The World owns every entity, its system memberships and its components.
//! Component types are known up front, so each gets a typed storage field
//! and the `Component` trait maps a type to its field.
//!
//! Iteration is always in entity creation order, which keeps a run fully
//! deterministic for a given setup and seed.

use thiserror::Error;

use super::component::ComponentStorage;
use super::components::{Collider, Control, ScoreLabel, Spatial, Velocity};
use super::entity::{Entity, SystemId};

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("entity {0} does not exist")]
    NoSuchEntity(Entity),
    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        entity: Entity,
        component: &'static str,
    },
}

/// A type that can be attached to an entity
pub trait Component: Sized + 'static {
    const NAME: &'static str;

    fn storage(world: &World) -> &ComponentStorage<Self>;
    fn storage_mut(world: &mut World) -> &mut ComponentStorage<Self>;
}

macro_rules! impl_component {
    ($ty:ty, $field:ident) => {
        impl Component for $ty {
            const NAME: &'static str = stringify!($ty);

            fn storage(world: &World) -> &ComponentStorage<Self> {
                &world.$field
            }

            fn storage_mut(world: &mut World) -> &mut ComponentStorage<Self> {
                &mut world.$field
            }
        }
    };
}

impl_component!(Spatial, spatials);
impl_component!(Velocity, velocities);
impl_component!(Control, controls);
impl_component!(Collider, colliders);
impl_component!(ScoreLabel, labels);

#[derive(Debug, Clone)]
struct EntityRecord {
    entity: Entity,
    systems: Vec<SystemId>,
}

/// All entities and their components
#[derive(Debug, Default)]
pub struct World {
    /// Live entities in creation order
    records: Vec<EntityRecord>,
    next_id: u32,

    spatials: ComponentStorage<Spatial>,
    velocities: ComponentStorage<Velocity>,
    controls: ComponentStorage<Control>,
    colliders: ComponentStorage<Collider>,
    labels: ComponentStorage<ScoreLabel>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity that participates in the given systems
    pub fn create_entity(&mut self, systems: &[SystemId]) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;

        let mut memberships = Vec::with_capacity(systems.len());
        for &system in systems {
            if !memberships.contains(&system) {
                memberships.push(system);
            }
        }

        log::debug!("Created entity {} in {:?}", entity, memberships);
        self.records.push(EntityRecord {
            entity,
            systems: memberships,
        });
        entity
    }

    /// Destroy an entity and drop all its components.
    /// Returns false if it was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(pos) = self.records.iter().position(|r| r.entity == entity) else {
            return false;
        };
        self.records.remove(pos);

        self.spatials.remove(entity);
        self.velocities.remove(entity);
        self.controls.remove(entity);
        self.colliders.remove(entity);
        self.labels.remove(entity);

        log::debug!("Destroyed entity {}", entity);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.records.iter().any(|r| r.entity == entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All live entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records.iter().map(|r| r.entity)
    }

    /// Entities that joined `system`, in creation order
    pub fn entities_for(&self, system: SystemId) -> Vec<Entity> {
        self.records
            .iter()
            .filter(|r| r.systems.contains(&system))
            .map(|r| r.entity)
            .collect()
    }

    /// Attach a component. An entity holds at most one of each type.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), WorldError> {
        if !self.is_alive(entity) {
            return Err(WorldError::NoSuchEntity(entity));
        }
        let storage = T::storage_mut(self);
        if storage.contains(entity) {
            return Err(WorldError::DuplicateComponent {
                entity,
                component: T::NAME,
            });
        }
        storage.insert(entity, component);
        Ok(())
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(self).remove(entity)
    }

    /// Missing components are `None`; callers skip the entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::storage(self).get(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        T::storage(self).contains(entity)
    }
}
