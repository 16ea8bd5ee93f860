//! The tabular Q-learning agent and its episodic credit-assignment loop.
//!
//! The agent is deliberately independent of how pixels reach a screen: it
//! consumes one [`crate::types::Observation`] per simulation tick and
//! emits an [`crate::types::Action`]. Learning happens only at episode
//! boundaries, when the recorded (state, action) trail is walked backward
//! and each step receives a temporal-difference correction.
//!
//! ## Usage Example
//!
//! ```
//! use flap32::{agent::QAgent, app::AgentConfig, types::Observation};
//!
//! let mut agent = QAgent::new(AgentConfig::new()).unwrap().with_seed(7);
//! let action = agent.on_tick(&Observation {
//!     vertical_speed: -0.4,
//!     tube_distance: 12,
//!     deviation: 2,
//! });
//! agent.on_episode_boundary(5.0, true);
//! let _ = action;
//! ```

pub mod agent;
pub mod encoder;
pub mod episode;
pub mod policy;
pub mod q_table;
pub mod serialization;

pub use agent::QAgent;
pub use episode::EpisodeBuffer;
pub use policy::Policy;
pub use q_table::QTable;
pub use serialization::{SavedModel, TrainingMetadata};
