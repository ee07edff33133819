//! Input provider boundary
//!
//! The host polls the keyboard; the simulation only asks whether a logical
//! input is currently held.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical inputs used by the control schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputId {
    W,
    S,
    Up,
    Down,
}

/// Resolves a logical input to its current held state
pub trait InputProvider {
    fn is_held(&self, input: InputId) -> bool;
}

/// Nothing is ever held
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputProvider for NoInput {
    fn is_held(&self, _input: InputId) -> bool {
        false
    }
}

/// A set of currently held inputs, filled in by the host each frame
#[derive(Debug, Clone, Default)]
pub struct HeldInputs {
    held: HashSet<InputId>,
}

impl HeldInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, input: InputId) {
        self.held.insert(input);
    }

    pub fn release(&mut self, input: InputId) {
        self.held.remove(&input);
    }
}

impl FromIterator<InputId> for HeldInputs {
    fn from_iter<I: IntoIterator<Item = InputId>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

impl InputProvider for HeldInputs {
    fn is_held(&self, input: InputId) -> bool {
        self.held.contains(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut inputs = HeldInputs::new();
        assert!(!inputs.is_held(InputId::W));

        inputs.press(InputId::W);
        assert!(inputs.is_held(InputId::W));
        assert!(!inputs.is_held(InputId::S));

        inputs.release(InputId::W);
        assert!(!inputs.is_held(InputId::W));
    }

    #[test]
    fn test_collect() {
        let inputs: HeldInputs = [InputId::Up, InputId::S].into_iter().collect();
        assert!(inputs.is_held(InputId::Up));
        assert!(inputs.is_held(InputId::S));
        assert!(!NoInput.is_held(InputId::Up));
    }
}
