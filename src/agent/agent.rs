//! The learning agent aggregate.

use rand::rngs::StdRng;

use crate::{
    Result,
    agent::{
        encoder,
        episode::EpisodeBuffer,
        policy::Policy,
        q_table::QTable,
        serialization::{SavedModel, TrainingMetadata},
    },
    app::AgentConfig,
    types::{Action, Observation},
    utils::build_rng,
};

/// Tabular Q-learning agent.
///
/// Owns the value table, the episode buffer, the policy, and a seedable
/// RNG; there is no ambient global state. The simulation driver holds
/// the agent and calls [`QAgent::on_tick`] once per tick of an active
/// episode and [`QAgent::on_episode_boundary`] once per boundary event.
#[derive(Debug, Clone)]
pub struct QAgent {
    config: AgentConfig,
    policy: Policy,
    table: QTable,
    buffer: EpisodeBuffer,
    rng: StdRng,
    rng_seed: Option<u64>,
    episodes_completed: usize,
}

impl QAgent {
    /// Create a fresh agent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] when a tunable is
    /// out of range.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: Policy::from_config(&config),
            config,
            table: QTable::new(),
            buffer: EpisodeBuffer::new(),
            rng: build_rng(None),
            rng_seed: None,
            episodes_completed: 0,
        })
    }

    /// Reseed the RNG for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Reseed the RNG in place.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
    }

    /// One active-episode tick: discretize the observation, select an
    /// action, and record the pair for later credit assignment.
    pub fn on_tick(&mut self, observation: &Observation) -> Action {
        let state = encoder::encode_observation(observation);
        let action = self.policy.select(&self.table, &state, &mut self.rng);
        self.buffer.record(state, action);
        action
    }

    /// Episode boundary: walk the recorded trail backward applying the
    /// temporal-difference update, then keep only the carry-over tail.
    ///
    /// `successful` distinguishes a cleared tube from a collision; the
    /// caller supplies the matching base reward magnitude.
    pub fn on_episode_boundary(&mut self, base_reward: f64, successful: bool) {
        self.buffer
            .assign_credit(&mut self.table, base_reward, successful, &self.config);
        self.episodes_completed += 1;
    }

    /// Episode boundary without learning: trim the buffer exactly as
    /// [`QAgent::on_episode_boundary`] would, but leave the table alone.
    /// Used when evaluating a frozen policy.
    pub fn discard_episode(&mut self) {
        self.buffer.trim(self.config.replay_tail);
        self.episodes_completed += 1;
    }

    /// The learned value table.
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Number of stored estimates.
    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// The agent's configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Boundary events seen so far (learned or discarded).
    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    /// Export the learned table as a persistable document.
    pub fn export_model(&self, mut metadata: TrainingMetadata) -> SavedModel {
        if metadata.seed.is_none() {
            metadata.seed = self.rng_seed;
        }
        SavedModel::from_table(&self.table, metadata)
    }

    /// Replace the table with one rebuilt from a document.
    ///
    /// The document is parsed completely before anything is replaced, so
    /// a malformed payload leaves the current table untouched.
    pub fn import_model(&mut self, model: &SavedModel) -> Result<()> {
        let table = model.to_table()?;
        self.table = table;
        Ok(())
    }

    /// Build an agent directly from a document.
    pub fn from_model(model: &SavedModel, config: AgentConfig) -> Result<Self> {
        let mut agent = Self::new(config)?;
        agent.import_model(model)?;
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameState;

    fn observation(deviation: i32) -> Observation {
        Observation {
            vertical_speed: 0.0,
            tube_distance: 10,
            deviation,
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = AgentConfig::new().with_discount(2.0);
        assert!(QAgent::new(config).is_err());
    }

    #[test]
    fn on_tick_records_and_boundary_learns() {
        let mut agent = QAgent::new(AgentConfig::new()).unwrap().with_seed(9);
        for i in 0..8 {
            agent.on_tick(&observation(i));
        }
        assert!(agent.table().is_empty());

        agent.on_episode_boundary(5.0, true);
        assert!(agent.table_size() > 0);
        assert_eq!(agent.episodes_completed(), 1);
    }

    #[test]
    fn discard_episode_trims_without_learning() {
        let mut agent = QAgent::new(AgentConfig::new()).unwrap().with_seed(9);
        for i in 0..8 {
            agent.on_tick(&observation(i));
        }
        agent.discard_episode();
        assert!(agent.table().is_empty());
        assert_eq!(agent.episodes_completed(), 1);
    }

    #[test]
    fn failed_import_leaves_table_untouched() {
        let mut agent = QAgent::new(AgentConfig::new()).unwrap().with_seed(9);
        for i in 0..4 {
            agent.on_tick(&observation(i));
        }
        agent.on_episode_boundary(5.0, true);
        let size_before = agent.table_size();
        let sample = agent
            .table()
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect::<Vec<_>>();

        let bad = SavedModel::from_json(r#"{"version": 99, "entries": {}}"#).unwrap();
        assert!(agent.import_model(&bad).is_err());

        assert_eq!(agent.table_size(), size_before);
        for ((state, action), estimate) in sample {
            assert_eq!(agent.table().get(&state, action), estimate);
        }
    }

    #[test]
    fn export_import_round_trip() {
        let mut agent = QAgent::new(AgentConfig::new()).unwrap().with_seed(13);
        for i in -3..4 {
            agent.on_tick(&observation(i));
        }
        agent.on_episode_boundary(100.0, false);

        let model = agent.export_model(TrainingMetadata::default());
        let restored = QAgent::from_model(&model, AgentConfig::new()).unwrap();

        assert_eq!(restored.table_size(), agent.table_size());
        let probe = GameState::new(0, 10, 1);
        assert_eq!(
            restored.table().get(&probe, Action::Stay),
            agent.table().get(&probe, Action::Stay)
        );
    }
}
