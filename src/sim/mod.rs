//! Deterministic simulation module
//!
//! The entity/component registry, the event bus, the per-frame systems and
//! the scheduler that drives them. This module must stay deterministic:
//! - Host-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod score;
pub mod systems;
pub mod tick;
pub mod world;

pub use collision::{Aabb, detect_collisions};
pub use components::{Collider, Control, ControlScheme, ScoreLabel, Spatial, Velocity};
pub use entity::{Entity, SystemId};
pub use event::{CollisionEvent, EventBus, Message, MessageKind, ScoreEvent, Side};
pub use score::{ScoreBoard, ScoreSystem, SharedScoreBoard};
pub use systems::{BallBoundsSystem, ControlSystem, Frame, MovementSystem, System};
pub use tick::{Game, GameError, Handles, RenderItem, tick};
pub use world::{Component, World, WorldError};
