//! Component data types
//!
//! Plain data only; behaviour lives in the systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::input::InputId;

/// Position (top-left corner) and size. Defines the entity's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spatial {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Spatial {
    /// Negative sizes are clamped to zero
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.position + self.size())
    }
}

/// Velocity in units per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Keyboard scheme bound to a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlScheme {
    /// W / S
    #[serde(rename = "primary-keys")]
    Primary,
    /// Arrow up / arrow down
    #[serde(rename = "secondary-keys")]
    Secondary,
}

impl ControlScheme {
    /// (up, down) inputs for this scheme
    pub fn bindings(&self) -> (InputId, InputId) {
        match self {
            ControlScheme::Primary => (InputId::W, InputId::S),
            ControlScheme::Secondary => (InputId::Up, InputId::Down),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Primary => "primary-keys",
            ControlScheme::Secondary => "secondary-keys",
        }
    }
}

/// Binds an entity to a control scheme. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    scheme: ControlScheme,
}

impl Control {
    pub fn new(scheme: ControlScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }
}

/// Collision participation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collider {
    /// Collisions of this entity are reported (the ball)
    pub primary: bool,
    /// Other entities can collide with this one
    pub solid: bool,
}

impl Collider {
    pub const BALL: Collider = Collider {
        primary: true,
        solid: true,
    };
    pub const WALL: Collider = Collider {
        primary: false,
        solid: true,
    };
}

/// Text shown by the host for this entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreLabel {
    pub text: String,
}

impl ScoreLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_clamps_size() {
        let spatial = Spatial::new(Vec2::ZERO, -4.0, 10.0);
        assert_eq!(spatial.width, 0.0);
        assert_eq!(spatial.height, 10.0);
    }

    #[test]
    fn test_spatial_aabb() {
        let spatial = Spatial::new(Vec2::new(10.0, 20.0), 16.0, 128.0);
        let aabb = spatial.aabb();
        assert_eq!(aabb.min, Vec2::new(10.0, 20.0));
        assert_eq!(aabb.max, Vec2::new(26.0, 148.0));
    }

    #[test]
    fn test_scheme_bindings() {
        assert_eq!(ControlScheme::Primary.bindings(), (InputId::W, InputId::S));
        assert_eq!(
            ControlScheme::Secondary.bindings(),
            (InputId::Up, InputId::Down)
        );
        let json = serde_json::to_string(&ControlScheme::Secondary).unwrap();
        assert_eq!(json, "\"secondary-keys\"");
    }
}
