//! Per-frame update systems
//!
//! The scheduler calls `update` once per frame for each entity that joined
//! the system. An entity missing a component the system needs is skipped for
//! that frame; that is not an error.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::components::{Control, Spatial, Velocity};
use super::entity::{Entity, SystemId};
use super::event::{EventBus, Message, ScoreEvent, Side};
use super::world::World;
use crate::input::InputProvider;
use crate::settings::Settings;

/// Per-frame context handed to every system
pub struct Frame<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    pub input: &'a dyn InputProvider,
}

/// A system that runs once per frame over its member entities
pub trait System: Send {
    fn id(&self) -> SystemId;

    /// Register bus listeners. Called once, before the first frame.
    fn subscribe(&self, _bus: &mut EventBus) {}

    fn update(&mut self, entity: Entity, world: &mut World, bus: &EventBus, frame: &Frame<'_>);
}

/// Integrates velocity into position and reverses on collision
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn id(&self) -> SystemId {
        SystemId::Movement
    }

    fn subscribe(&self, bus: &mut EventBus) {
        collision::subscribe_bounce(bus);
    }

    fn update(&mut self, entity: Entity, world: &mut World, _bus: &EventBus, frame: &Frame<'_>) {
        let Some(&Velocity(velocity)) = world.get_component::<Velocity>(entity) else {
            return;
        };
        if let Some(spatial) = world.get_component_mut::<Spatial>(entity) {
            spatial.position += velocity * frame.dt;
        }
    }
}

/// Moves paddles up and down from their keyboard scheme
#[derive(Debug)]
pub struct ControlSystem {
    speed: f32,
    /// Field height when paddles are kept on screen
    clamp_height: Option<f32>,
}

impl ControlSystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            speed: settings.paddle_speed,
            clamp_height: settings.clamp_paddles.then_some(settings.field_height),
        }
    }
}

impl System for ControlSystem {
    fn id(&self) -> SystemId {
        SystemId::Control
    }

    fn update(&mut self, entity: Entity, world: &mut World, _bus: &EventBus, frame: &Frame<'_>) {
        let Some(control) = world.get_component::<Control>(entity).copied() else {
            return;
        };
        let Some(spatial) = world.get_component_mut::<Spatial>(entity) else {
            return;
        };

        let (up, down) = control.scheme().bindings();
        let step = self.speed * frame.dt;
        if frame.input.is_held(up) {
            spatial.position.y -= step;
        }
        if frame.input.is_held(down) {
            spatial.position.y += step;
        }

        if let Some(field_height) = self.clamp_height {
            let max_y = (field_height - spatial.height).max(0.0);
            spatial.position.y = spatial.position.y.clamp(0.0, max_y);
        }
    }
}

/// Scores when the ball leaves the left or right edge and reflects it off
/// the top and bottom.
///
/// Leaving the left edge awards the right player and vice versa. A scored
/// ball is re-served from the centre with each velocity axis drawn from
/// [0, max_speed).
#[derive(Debug)]
pub struct BallBoundsSystem {
    field: Vec2,
    center: Vec2,
    max_speed: f32,
    rng: Pcg32,
}

impl BallBoundsSystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            field: Vec2::new(settings.field_width, settings.field_height),
            center: settings.field_center(),
            max_speed: settings.max_ball_speed,
            rng: Pcg32::seed_from_u64(settings.seed),
        }
    }

    fn serve_velocity(&mut self) -> Vec2 {
        // Empty or unbounded ranges cannot be sampled
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.rng.random_range(0.0..self.max_speed),
            self.rng.random_range(0.0..self.max_speed),
        )
    }
}

impl System for BallBoundsSystem {
    fn id(&self) -> SystemId {
        SystemId::BallBounds
    }

    fn update(&mut self, entity: Entity, world: &mut World, bus: &EventBus, _frame: &Frame<'_>) {
        let (Some(&spatial), Some(&velocity)) = (
            world.get_component::<Spatial>(entity),
            world.get_component::<Velocity>(entity),
        ) else {
            return;
        };
        let mut spatial = spatial;
        let Velocity(mut velocity) = velocity;

        let max = self.field - spatial.size();
        let scorer = if spatial.position.x < 0.0 {
            Some(Side::Right)
        } else if spatial.position.x > max.x {
            Some(Side::Left)
        } else {
            None
        };

        if let Some(scorer) = scorer {
            log::info!("{:?} player scores", scorer);
            bus.dispatch(&Message::Score(ScoreEvent { scorer }), world);
            spatial.position = self.center - spatial.size() / 2.0;
            velocity = self.serve_velocity();
        }

        if spatial.position.y < 0.0 {
            spatial.position.y = 0.0;
            velocity.y = -velocity.y;
        }
        if spatial.position.y > max.y {
            spatial.position.y = max.y;
            velocity.y = -velocity.y;
        }

        if let Some(current) = world.get_component_mut::<Spatial>(entity) {
            *current = spatial;
        }
        if let Some(current) = world.get_component_mut::<Velocity>(entity) {
            *current = Velocity(velocity);
        }
    }
}
