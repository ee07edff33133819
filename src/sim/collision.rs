//! Axis-aligned collision detection and response
//!
//! Detection is a naive pairwise pass: every primary collider against every
//! solid one. That is O(primaries × solids), fine for a handful of entities.
//! Response is not done here; overlaps go out as `CollisionEvent`s and the
//! listener registered by `subscribe_bounce` reverses the ball.

use glam::Vec2;

use super::components::{Collider, Spatial, Velocity};
use super::entity::{Entity, SystemId};
use super::event::{CollisionEvent, EventBus, Message, MessageKind};
use super::world::World;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// True if the interiors intersect on both axes. Boxes that only share an
    /// edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Report every primary/solid overlap on the bus.
///
/// Pairs are visited primary-major in entity creation order. An entity never
/// collides with itself. Entities without a `Spatial` or `Collider` are
/// skipped. Returns the number of collisions reported.
pub fn detect_collisions(world: &mut World, bus: &EventBus) -> usize {
    let candidates = world.entities_for(SystemId::Collision);

    let mut primaries: Vec<(Entity, Aabb)> = Vec::new();
    let mut solids: Vec<(Entity, Aabb)> = Vec::new();
    for &entity in &candidates {
        let (Some(collider), Some(spatial)) = (
            world.get_component::<Collider>(entity),
            world.get_component::<Spatial>(entity),
        ) else {
            continue;
        };
        let aabb = spatial.aabb();
        if collider.primary {
            primaries.push((entity, aabb));
        }
        if collider.solid {
            solids.push((entity, aabb));
        }
    }

    let mut hits = Vec::new();
    for (primary, primary_box) in &primaries {
        for (solid, solid_box) in &solids {
            if primary != solid && primary_box.overlaps(solid_box) {
                hits.push(CollisionEvent {
                    entity: *primary,
                    other: *solid,
                });
            }
        }
    }

    for event in &hits {
        log::debug!("Collision {} -> {}", event.entity, event.other);
        bus.dispatch(&Message::Collision(*event), world);
    }
    hits.len()
}

/// Reverse the horizontal velocity of whatever entity a collision names.
/// Entities without a velocity are left alone.
pub fn subscribe_bounce(bus: &mut EventBus) {
    bus.subscribe(MessageKind::Collision, |message, world, _| {
        let Message::Collision(event) = message else {
            return;
        };
        if let Some(velocity) = world.get_component_mut::<Velocity>(event.entity) {
            velocity.0.x = -velocity.0.x;
        }
    });
}
