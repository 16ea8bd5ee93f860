//! Training pipeline driving the agent against the simulated world.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::QAgent,
    ports::Observer,
    sim::{TickOutcome, World},
};

/// Default base reward for a cleared tube.
pub const DEFAULT_PASS_REWARD: f64 = 5.0;

/// Default base reward magnitude for a crash.
///
/// Larger than the pass reward; failures carry the stronger shaping
/// signal.
pub const DEFAULT_CRASH_REWARD: f64 = 100.0;

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// The bird cleared the targeted tube.
    Passed,
    /// The bird collided with a tube or the ground.
    Crashed,
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes (boundary events) to run
    pub episodes: usize,

    /// Random seed; the agent and world RNGs are derived from it
    pub seed: Option<u64>,

    /// Base reward for a cleared tube
    pub pass_reward: f64,

    /// Base reward magnitude for a crash
    pub crash_reward: f64,

    /// When false, episode boundaries trim the buffer without updating
    /// the value table (frozen evaluation)
    pub learning: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            seed: None,
            pass_reward: DEFAULT_PASS_REWARD,
            crash_reward: DEFAULT_CRASH_REWARD,
            learning: true,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub episodes: usize,

    /// Episodes that ended with a cleared tube
    pub passes: usize,

    /// Episodes that ended in a crash
    pub crashes: usize,

    /// Fraction of episodes that ended with a cleared tube
    pub pass_rate: f64,

    /// Longest run of consecutive cleared tubes
    pub best_streak: u64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(episodes: usize, passes: usize, crashes: usize, best_streak: u64) -> Self {
        let pass_rate = if episodes > 0 {
            passes as f64 / episodes as f64
        } else {
            0.0
        };
        Self {
            episodes,
            passes,
            crashes,
            pass_rate,
            best_streak,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives ticks between an agent and a world for a fixed number of
/// episodes.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of episodes.
    ///
    /// An episode spans the ticks between two boundary events: either
    /// the bird clears the targeted tube (the flight continues into the
    /// next episode) or it crashes (the world resets). The buffer tail
    /// the agent carries across pass boundaries is what lets credit flow
    /// over them.
    pub fn run(&mut self, agent: &mut QAgent, world: &mut World) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut passes = 0;
        let mut crashes = 0;
        let mut streak: u64 = 0;
        let mut best_streak: u64 = 0;

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let outcome = self.run_episode(agent, world);
            match outcome {
                EpisodeOutcome::Passed => {
                    passes += 1;
                    streak += 1;
                    best_streak = best_streak.max(streak);
                }
                EpisodeOutcome::Crashed => {
                    crashes += 1;
                    streak = 0;
                    world.reset();
                }
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, streak)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            passes,
            crashes,
            best_streak,
        ))
    }

    fn run_episode(&mut self, agent: &mut QAgent, world: &mut World) -> EpisodeOutcome {
        loop {
            let observation = world.observation();
            let action = agent.on_tick(&observation);
            match world.step(action) {
                TickOutcome::Running => {}
                TickOutcome::Passed => {
                    self.boundary(agent, self.config.pass_reward, true);
                    return EpisodeOutcome::Passed;
                }
                TickOutcome::Crashed => {
                    self.boundary(agent, self.config.crash_reward, false);
                    return EpisodeOutcome::Crashed;
                }
            }
        }
    }

    fn boundary(&self, agent: &mut QAgent, base_reward: f64, successful: bool) {
        if self.config.learning {
            agent.on_episode_boundary(base_reward, successful);
        } else {
            agent.discard_episode();
        }
    }
}
