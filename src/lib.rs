//! ECS Pong - two paddles, one ball, and an event bus
//!
//! Core modules:
//! - `sim`: Entity/component registry, event bus, per-frame systems and scheduler
//! - `input`: Input provider boundary (the host polls the keyboard)
//! - `settings`: Data-driven playfield and speed tuning
//!
//! Rendering, fonts, assets and windowing belong to the host. The simulation
//! only computes positions, velocities, scores and the scoreboard label.

pub mod input;
pub mod settings;
pub mod sim;

pub use input::{HeldInputs, InputId, InputProvider, NoInput};
pub use settings::{Settings, SettingsError};
pub use sim::{Game, GameError, tick};

/// Game configuration constants
pub mod consts {
    /// Default host frame timestep (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 16.0;
    pub const BALL_START_VELOCITY: (f32, f32) = (300.0, 100.0);
    /// Upper bound (exclusive) of each axis of a re-served ball's velocity
    pub const BALL_MAX_SPEED: f32 = 800.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 16.0;
    pub const PADDLE_HEIGHT: f32 = 128.0;
    pub const PADDLE_SPEED: f32 = 800.0;

    /// Scoreboard defaults
    pub const SCOREBOARD_POS: (f32, f32) = (100.0, 100.0);
    pub const SCOREBOARD_SIZE: f32 = 100.0;
    /// Horizontal advance per label character, used to centre the label
    pub const SCORE_GLYPH_WIDTH: f32 = 20.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_B0B5;
}
