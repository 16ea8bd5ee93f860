//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default learning rate α.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default discount factor γ applied to the best achievable future value.
pub const DEFAULT_DISCOUNT: f64 = 0.8;

/// Default probability of ignoring the table and acting randomly.
///
/// Hand-tuned, like the other probability defaults here; nobody should
/// read these as optimal values.
pub const DEFAULT_EXPLORATION_RATE: f64 = 1.0 / 9000.0;

/// Default probability of jumping inside the random exploration branch.
pub const DEFAULT_EXPLORATION_JUMP_PROB: f64 = 0.25;

/// Default probability of jumping when both estimates tie exactly.
///
/// Biased heavily toward staying so an untrained agent does not flap
/// itself into the ceiling before it has learned anything.
pub const DEFAULT_TIE_BREAK_JUMP_PROB: f64 = 1.0 / 25.0;

/// Default number of buffer entries that survive an episode boundary.
pub const DEFAULT_REPLAY_TAIL: usize = 5;

/// Default tolerance band (in pixels) around the ideal passage point
/// inside which an action is never blamed for a crash.
pub const DEFAULT_DEVIATION_TOLERANCE: i32 = 1;

/// Default reward handed to a step that was defensible despite a crash.
pub const DEFAULT_BLAMELESS_REWARD: f64 = 0.5;

/// Configuration for creating a learning agent.
///
/// Every tunable the learning loop consumes is a named field here rather
/// than an inline literal.
///
/// # Examples
///
/// ```
/// use flap32::app::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_learning_rate(0.2)
///     .with_replay_tail(8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α scaling each temporal-difference correction.
    pub learning_rate: f64,
    /// Discount factor γ on the best achievable future value.
    pub discount: f64,
    /// Probability of taking the random exploration branch on a tick.
    pub exploration_rate: f64,
    /// Probability of jumping inside the exploration branch.
    pub exploration_jump_prob: f64,
    /// Probability of jumping on an exact value tie.
    pub tie_break_jump_prob: f64,
    /// Buffer entries retained across an episode boundary.
    pub replay_tail: usize,
    /// Deviation band inside which a pre-crash action is not blamed.
    pub deviation_tolerance: i32,
    /// Reward given to defensible steps of a failed episode.
    pub blameless_reward: f64,
}

impl AgentConfig {
    /// Create a configuration with the observed training defaults.
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount: DEFAULT_DISCOUNT,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            exploration_jump_prob: DEFAULT_EXPLORATION_JUMP_PROB,
            tie_break_jump_prob: DEFAULT_TIE_BREAK_JUMP_PROB,
            replay_tail: DEFAULT_REPLAY_TAIL,
            deviation_tolerance: DEFAULT_DEVIATION_TOLERANCE,
            blameless_reward: DEFAULT_BLAMELESS_REWARD,
        }
    }

    /// Set the learning rate α.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor γ.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the exploration probability.
    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    /// Set the jump probability inside the exploration branch.
    pub fn with_exploration_jump_prob(mut self, prob: f64) -> Self {
        self.exploration_jump_prob = prob;
        self
    }

    /// Set the jump probability on exact ties.
    pub fn with_tie_break_jump_prob(mut self, prob: f64) -> Self {
        self.tie_break_jump_prob = prob;
        self
    }

    /// Set the number of buffer entries surviving an episode boundary.
    pub fn with_replay_tail(mut self, replay_tail: usize) -> Self {
        self.replay_tail = replay_tail;
        self
    }

    /// Set the no-blame deviation tolerance.
    pub fn with_deviation_tolerance(mut self, tolerance: i32) -> Self {
        self.deviation_tolerance = tolerance;
        self
    }

    /// Set the reward for defensible steps of failed episodes.
    pub fn with_blameless_reward(mut self, reward: f64) -> Self {
        self.blameless_reward = reward;
        self
    }

    /// Check that every probability and rate is in range.
    pub fn validate(&self) -> Result<()> {
        let unit_interval = [
            ("learning_rate", self.learning_rate),
            ("discount", self.discount),
            ("exploration_rate", self.exploration_rate),
            ("exploration_jump_prob", self.exploration_jump_prob),
            ("tie_break_jump_prob", self.tie_break_jump_prob),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.deviation_tolerance < 0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "deviation_tolerance must be non-negative, got {}",
                    self.deviation_tolerance
                ),
            });
        }
        if !self.blameless_reward.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("blameless_reward must be finite, got {}", self.blameless_reward),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
