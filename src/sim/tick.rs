//! Frame scheduler
//!
//! One `tick` per host frame:
//! 1. collision detection, whose events are delivered (and acted on)
//!    immediately
//! 2. movement, control, ball bounds and score, each over its member
//!    entities in creation order
//!
//! Collision response runs before movement, so a reversal triggered this
//! frame already shows up in this frame's movement.

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use super::collision::detect_collisions;
use super::components::{Collider, Control, ControlScheme, ScoreLabel, Spatial, Velocity};
use super::entity::{Entity, SystemId};
use super::event::EventBus;
use super::score::{ScoreSystem, SharedScoreBoard};
use super::systems::{BallBoundsSystem, ControlSystem, Frame, MovementSystem, System};
use super::world::{World, WorldError};
use crate::consts::*;
use crate::input::InputProvider;
use crate::settings::{Settings, SettingsError};

/// Why a table could not be set up
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Ids of the entities created by `Game::new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Handles {
    pub ball: Entity,
    pub scoreboard: Entity,
    pub left_paddle: Entity,
    pub right_paddle: Entity,
}

/// What the host needs to draw one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub entity: Entity,
    pub spatial: Spatial,
    pub label: Option<String>,
}

/// Owns the world, the bus and the systems, and drives them frame by frame
pub struct Game {
    world: World,
    bus: EventBus,
    systems: Vec<Box<dyn System>>,
    scoreboard: SharedScoreBoard,
    handles: Handles,
    frames: u64,
}

impl Game {
    /// Build the standard table: a ball, a scoreboard and two paddles
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;

        let mut bus = EventBus::new();
        let score = ScoreSystem::new(&settings);
        let scoreboard = score.board();

        let systems: Vec<Box<dyn System>> = vec![
            Box::new(MovementSystem),
            Box::new(ControlSystem::new(&settings)),
            Box::new(BallBoundsSystem::new(&settings)),
            Box::new(score),
        ];
        for system in &systems {
            system.subscribe(&mut bus);
        }

        let mut world = World::new();
        let handles = populate(&mut world, &settings)?;
        log::info!(
            "Table ready: {}x{} field, {} entities, {} systems",
            settings.field_width,
            settings.field_height,
            world.len(),
            systems.len()
        );

        Ok(Self {
            world,
            bus,
            systems,
            scoreboard,
            handles,
            frames: 0,
        })
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, input: &dyn InputProvider, dt: f32) {
        let frame = Frame { dt, input };

        detect_collisions(&mut self.world, &self.bus);

        for system in &mut self.systems {
            for entity in self.world.entities_for(system.id()) {
                system.update(entity, &mut self.world, &self.bus, &frame);
            }
        }

        self.frames += 1;
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Extra listeners run after the built-in ones
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Bus and world together, for dispatching from outside a frame
    pub fn bus_and_world_mut(&mut self) -> (&EventBus, &mut World) {
        (&self.bus, &mut self.world)
    }

    pub fn handles(&self) -> Handles {
        self.handles
    }

    /// Shared score counters (cloneable across threads)
    pub fn scoreboard(&self) -> SharedScoreBoard {
        SharedScoreBoard::clone(&self.scoreboard)
    }

    /// (left, right) points
    pub fn scores(&self) -> (u32, u32) {
        let board = self
            .scoreboard
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        (board.left, board.right)
    }

    /// Text currently shown on the scoreboard
    pub fn score_label(&self) -> Option<&str> {
        self.world
            .get_component::<ScoreLabel>(self.handles.scoreboard)
            .map(|label| label.text.as_str())
    }

    /// Frames simulated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Everything the host draws this frame, in creation order
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.world
            .entities_for(SystemId::Render)
            .into_iter()
            .filter_map(|entity| {
                let spatial = *self.world.get_component::<Spatial>(entity)?;
                let label = self
                    .world
                    .get_component::<ScoreLabel>(entity)
                    .map(|label| label.text.clone());
                Some(RenderItem {
                    entity,
                    spatial,
                    label,
                })
            })
            .collect()
    }
}

/// Advance `game` by one frame
pub fn tick(game: &mut Game, input: &dyn InputProvider, dt: f32) {
    game.tick(input, dt);
}

fn populate(world: &mut World, settings: &Settings) -> Result<Handles, WorldError> {
    let field = Vec2::new(settings.field_width, settings.field_height);

    let ball = world.create_entity(&[
        SystemId::Render,
        SystemId::Collision,
        SystemId::Movement,
        SystemId::BallBounds,
    ]);
    let ball_size = Vec2::splat(settings.ball_size);
    world.add_component(
        ball,
        Spatial::new((field - ball_size) / 2.0, ball_size.x, ball_size.y),
    )?;
    world.add_component(ball, Collider::BALL)?;
    world.add_component(ball, Velocity(settings.ball_start_velocity.into()))?;

    let scoreboard = world.create_entity(&[SystemId::Render, SystemId::Score]);
    world.add_component(
        scoreboard,
        Spatial::new(SCOREBOARD_POS.into(), SCOREBOARD_SIZE, SCOREBOARD_SIZE),
    )?;
    world.add_component(scoreboard, ScoreLabel::new(" "))?;

    let paddle_y = (settings.field_height - settings.paddle_height) / 2.0;
    let mut paddles = [ball; 2];
    for (i, scheme) in [ControlScheme::Primary, ControlScheme::Secondary]
        .into_iter()
        .enumerate()
    {
        let x = if i == 0 {
            0.0
        } else {
            settings.field_width - settings.paddle_width
        };
        let paddle =
            world.create_entity(&[SystemId::Render, SystemId::Collision, SystemId::Control]);
        world.add_component(
            paddle,
            Spatial::new(
                Vec2::new(x, paddle_y),
                settings.paddle_width,
                settings.paddle_height,
            ),
        )?;
        world.add_component(paddle, Control::new(scheme))?;
        world.add_component(paddle, Collider::WALL)?;
        log::debug!("Paddle {} bound to {}", paddle, scheme.as_str());
        paddles[i] = paddle;
    }

    Ok(Handles {
        ball,
        scoreboard,
        left_paddle: paddles[0],
        right_paddle: paddles[1],
    })
}
