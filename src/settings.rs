//! Game settings
//!
//! Playfield size, speeds and the RNG seed. Stored as JSON next to the
//! binary; every field falls back to its default when missing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Velocity of the first serve
    pub ball_start_velocity: (f32, f32),
    /// Re-served balls draw each axis from [0, max_ball_speed)
    pub max_ball_speed: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Keep paddles inside the playfield vertically
    pub clamp_paddles: bool,

    /// Seed for re-serve velocities
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_size: BALL_SIZE,
            ball_start_velocity: BALL_START_VELOCITY,
            max_ball_speed: BALL_MAX_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            clamp_paddles: false,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ball_size", self.ball_size),
            ("ball_start_velocity", self.ball_start_velocity.0),
            ("ball_start_velocity", self.ball_start_velocity.1),
            ("max_ball_speed", self.max_ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let non_negative = [
            ("ball_size", self.ball_size),
            ("max_ball_speed", self.max_ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if self.ball_size > self.field_width || self.ball_size > self.field_height {
            return Err(SettingsError::Invalid {
                field: "ball_size",
                reason: "ball does not fit in the playfield",
            });
        }

        Ok(())
    }

    /// Centre of the playfield
    pub fn field_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }
}
