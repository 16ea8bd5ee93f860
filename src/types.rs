//! Core value types shared between the agent and the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two things the bird can do on a tick.
///
/// An unrecognized action reaching the physics step is unrepresentable
/// rather than checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Let gravity act this tick.
    Stay,
    /// Flap, resetting vertical speed upward.
    Jump,
}

impl Action {
    /// Both actions, in a stable order.
    pub const ALL: [Action; 2] = [Action::Stay, Action::Jump];

    /// Stable textual label, used in persisted model keys.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Stay => "stay",
            Action::Jump => "jump",
        }
    }

    /// Parse a persisted label back into an action.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "stay" => Some(Action::Stay),
            "jump" => Some(Action::Jump),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw per-tick readout from the simulation.
///
/// `deviation` is signed: positive means the bird sits above the ideal
/// passage point of the targeted tube, negative below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Vertical speed in pixels per tick (negative is upward).
    pub vertical_speed: f64,
    /// Horizontal distance to the targeted tube, in whole pixels.
    pub tube_distance: i32,
    /// Signed vertical distance to the ideal passage point, in whole pixels.
    pub deviation: i32,
}

/// Discretized state key for the value table.
///
/// A proper value type with structural equality and a stable ordering,
/// replacing the stringly-keyed lookup a quick implementation would use.
/// Two observations that differ below the encoder's rounding granularity
/// map to the same `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameState {
    /// Vertical speed scaled by 100 and rounded.
    pub speed: i32,
    /// Horizontal distance to the targeted tube.
    pub tube_distance: i32,
    /// Signed vertical distance to the ideal passage point.
    pub deviation: i32,
}

impl GameState {
    pub fn new(speed: i32, tube_distance: i32, deviation: i32) -> Self {
        Self {
            speed,
            tube_distance,
            deviation,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.speed, self.tube_distance, self.deviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_labels_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_label(action.label()), Some(action));
        }
        assert_eq!(Action::from_label("flap"), None);
    }

    #[test]
    fn game_state_structural_equality() {
        let a = GameState::new(-120, 14, 3);
        let b = GameState::new(-120, 14, 3);
        assert_eq!(a, b);
        assert_ne!(a, GameState::new(-120, 14, 4));
    }

    #[test]
    fn game_state_display_is_key_shaped() {
        assert_eq!(GameState::new(-120, 14, 3).to_string(), "-120,14,3");
    }
}
