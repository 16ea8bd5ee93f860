//! Training and evaluation pipeline.
//!
//! The pipeline is the simulation driver the learning core expects: it
//! pumps ticks between the world and the agent, classifies boundary
//! events, and fans results out to observers.

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{EpisodeOutcome, TrainingConfig, TrainingPipeline, TrainingResult};
