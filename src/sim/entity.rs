//! Entity identifiers and system membership tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
///
/// Ids are handed out in increasing order and never reused, so a stale id
/// can only ever miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity(u32);

impl Entity {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Slot index for component storage
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Systems an entity can participate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemId {
    /// Drawn by the host
    Render,
    /// Takes part in AABB collision detection
    Collision,
    /// Position integrates velocity
    Movement,
    /// Scores and reflects off the playfield edges
    BallBounds,
    /// Moved by a keyboard scheme
    Control,
    /// Shows the scoreboard label
    Score,
}

impl SystemId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemId::Render => "RenderSystem",
            SystemId::Collision => "CollisionSystem",
            SystemId::Movement => "MovementSystem",
            SystemId::BallBounds => "BallBoundsSystem",
            SystemId::Control => "ControlSystem",
            SystemId::Score => "ScoreSystem",
        }
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
