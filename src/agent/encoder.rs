//! Discretization of raw simulation readouts into value-table keys.

use crate::types::{GameState, Observation};

/// Scale applied to vertical speed before rounding.
///
/// The rounding boundary is the discretization contract: speeds closer
/// together than 1/100 px/tick land in the same bucket.
const SPEED_SCALE: f64 = 100.0;

/// Map raw simulation variables to a discrete state key.
///
/// Pure and deterministic for identical floating-point inputs. The two
/// integer inputs are already discrete and pass through untouched.
pub fn encode(vertical_speed: f64, tube_distance: i32, deviation: i32) -> GameState {
    GameState {
        speed: (vertical_speed * SPEED_SCALE).round() as i32,
        tube_distance,
        deviation,
    }
}

/// Encode a full observation.
pub fn encode_observation(observation: &Observation) -> GameState {
    encode(
        observation.vertical_speed,
        observation.tube_distance,
        observation.deviation,
    )
}
