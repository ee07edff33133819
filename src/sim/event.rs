//! Event bus
//!
//! Systems talk to each other through messages instead of references:
//! collision detection fires a `CollisionEvent` without knowing that the
//! movement listener reverses the ball, and the ball-bounds system fires a
//! `ScoreEvent` without knowing about the scoreboard.
//!
//! Delivery is synchronous. `dispatch` runs every listener for the message's
//! kind, in subscription order, before it returns. Listeners get the bus
//! back so they can dispatch follow-up messages, which are delivered
//! recursively inside the same call.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::world::World;

/// Which side of the playfield a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1
    Left,
    /// Player 2
    Right,
}

/// A primary collider overlapped a solid one this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// The primary collider
    pub entity: Entity,
    /// The solid entity it overlapped
    pub other: Entity,
}

/// `scorer` is awarded one point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub scorer: Side,
}

/// Every message the bus can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Collision(CollisionEvent),
    Score(ScoreEvent),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Collision(_) => MessageKind::Collision,
            Message::Score(_) => MessageKind::Score,
        }
    }
}

impl From<CollisionEvent> for Message {
    fn from(event: CollisionEvent) -> Self {
        Message::Collision(event)
    }
}

impl From<ScoreEvent> for Message {
    fn from(event: ScoreEvent) -> Self {
        Message::Score(event)
    }
}

/// Subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Collision,
    Score,
}

/// Listener callback. May mutate components and dispatch further messages.
pub type Listener = Box<dyn Fn(&Message, &mut World, &EventBus) + Send + Sync>;

/// Synchronous publish/subscribe channel keyed by message kind
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<MessageKind, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every future message of `kind`
    pub fn subscribe<F>(&mut self, kind: MessageKind, listener: F)
    where
        F: Fn(&Message, &mut World, &EventBus) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// Deliver `message` to all of its listeners, in subscription order.
    /// Returns how many listeners received it.
    pub fn dispatch(&self, message: &Message, world: &mut World) -> usize {
        let Some(listeners) = self.listeners.get(&message.kind()) else {
            log::trace!("Dropped {:?}: no listeners", message);
            return 0;
        };

        log::trace!("Dispatching {:?} to {} listener(s)", message, listeners.len());
        for listener in listeners {
            listener(message, world, self);
        }
        listeners.len()
    }

    pub fn listener_count(&self, kind: MessageKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (*kind, listeners.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| *kind as u8);
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn score(scorer: Side) -> Message {
        ScoreEvent { scorer }.into()
    }

    #[test]
    fn test_listeners_fire_once_in_order() {
        let mut bus = EventBus::new();
        let mut world = World::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let log = Arc::clone(&log);
            bus.subscribe(MessageKind::Score, move |_, _, _| {
                log.lock().unwrap().push(name);
            });
        }

        let delivered = bus.dispatch(&score(Side::Left), &mut world);
        assert_eq!(delivered, 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_only_matching_kind_delivered() {
        let mut bus = EventBus::new();
        let mut world = World::new();
        let hits = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&hits);
        bus.subscribe(MessageKind::Collision, move |_, _, _| {
            *counter.lock().unwrap() += 1;
        });

        assert_eq!(bus.dispatch(&score(Side::Right), &mut world), 0);
        assert_eq!(*hits.lock().unwrap(), 0);
        assert_eq!(bus.listener_count(MessageKind::Collision), 1);
        assert_eq!(bus.listener_count(MessageKind::Score), 0);
    }

    #[test]
    fn test_recursive_dispatch_is_immediate() {
        let mut bus = EventBus::new();
        let mut world = World::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        // Every collision awards the left player; the score listener must
        // run before the collision dispatch returns.
        bus.subscribe(MessageKind::Collision, |_, world, bus| {
            bus.dispatch(&score(Side::Left), world);
        });
        let score_log = Arc::clone(&log);
        bus.subscribe(MessageKind::Score, move |message, _, _| {
            score_log.lock().unwrap().push(*message);
        });
        let after_log = Arc::clone(&log);
        bus.subscribe(MessageKind::Collision, move |message, _, _| {
            after_log.lock().unwrap().push(*message);
        });

        let a = world.create_entity(&[]);
        let collision = Message::from(CollisionEvent { entity: a, other: a });
        bus.dispatch(&collision, &mut world);

        assert_eq!(*log.lock().unwrap(), vec![score(Side::Left), collision]);
    }

    #[test]
    fn test_listener_mutates_world() {
        use crate::sim::components::Velocity;
        use glam::Vec2;

        let mut bus = EventBus::new();
        let mut world = World::new();
        let e = world.create_entity(&[]);
        world.add_component(e, Velocity(Vec2::ONE)).unwrap();

        bus.subscribe(MessageKind::Collision, |message, world, _| {
            if let Message::Collision(event) = message
                && let Some(velocity) = world.get_component_mut::<Velocity>(event.entity)
            {
                velocity.0 *= 2.0;
            }
        });
        bus.dispatch(&CollisionEvent { entity: e, other: e }.into(), &mut world);

        assert_eq!(world.get_component::<Velocity>(e), Some(&Velocity(Vec2::splat(2.0))));
    }
}
