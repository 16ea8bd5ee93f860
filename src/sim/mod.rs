//! Headless 32×32 simulation of the flappy game.

pub mod world;

pub use world::{TickOutcome, World};
