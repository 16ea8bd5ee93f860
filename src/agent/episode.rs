//! Episode buffer and retroactive credit assignment.
//!
//! Reward is not assigned at the instant an action is taken: whether a
//! jump was right is only knowable once the episode resolves. Each tick
//! records its (state, action) pair, and at the boundary the trail is
//! walked backward applying one temporal-difference correction per step.

use crate::{
    agent::q_table::QTable,
    app::AgentConfig,
    types::{Action, GameState},
};

/// Ordered (state, action) trail for the in-progress episode.
///
/// After credit assignment the buffer is not cleared entirely: the most
/// recent `replay_tail` entries survive into the next episode, because
/// the physical consequences of those actions persist across the
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct EpisodeBuffer {
    steps: Vec<(GameState, Action)>,
    episode_len: usize,
}

impl EpisodeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            episode_len: 0,
        }
    }

    /// Record one tick's (state, action) pair.
    pub fn record(&mut self, state: GameState, action: Action) {
        self.steps.push((state, action));
        self.episode_len += 1;
    }

    /// Total entries held, including the carried-over tail.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Ticks recorded since the last boundary.
    pub fn episode_len(&self) -> usize {
        self.episode_len
    }

    /// Walk the trail backward applying temporal-difference updates,
    /// then trim to the carry-over tail.
    ///
    /// The most recent entry is reserved as the "future state" for the
    /// first step of the walk and never itself receives an update here.
    /// Updates land in the table as the walk proceeds, so an entry later
    /// in time feeds its freshly corrected value into the next (earlier)
    /// step's bootstrap target. A buffer with fewer than 2 entries walks
    /// zero steps.
    pub fn assign_credit(
        &mut self,
        table: &mut QTable,
        base_reward: f64,
        successful: bool,
        config: &AgentConfig,
    ) {
        let window = config.replay_tail.max(self.episode_len);

        if self.steps.len() >= 2 {
            let mut index = self.steps.len() - 2;
            for _ in 0..window {
                let (state, action) = self.steps[index];
                let (future_state, _) = self.steps[index + 1];

                let reward = shaped_reward(&state, action, base_reward, successful, config);
                let optimal_future = table.best_value(&future_state);
                let current = table.get(&state, action);
                let delta =
                    config.learning_rate * (reward + config.discount * optimal_future - current);
                table.add(state, action, delta);

                if index == 0 {
                    break;
                }
                index -= 1;
            }
        }

        self.trim(config.replay_tail);
    }

    /// Drop everything but the final `tail` entries and reset the
    /// per-episode counter, without touching the table.
    pub fn trim(&mut self, tail: usize) {
        if self.steps.len() > tail {
            let drop = self.steps.len() - tail;
            self.steps.drain(..drop);
        }
        self.episode_len = 0;
    }
}

/// Per-step reward, shaped on failures.
///
/// States closer to the ideal passage point earn more credit. When the
/// episode ended in a crash, an action that pushed the bird further from
/// the line it already strayed past gets its reward negated; an action
/// that was defensible given the position gets a small fixed positive
/// nudge instead, since a later or different action caused the crash.
fn shaped_reward(
    state: &GameState,
    action: Action,
    base_reward: f64,
    successful: bool,
    config: &AgentConfig,
) -> f64 {
    let reward = base_reward - (state.deviation as f64).abs();
    if successful {
        return reward;
    }

    let tolerance = config.deviation_tolerance;
    let jumped_while_high = state.deviation > tolerance && action == Action::Jump;
    let stayed_while_low = state.deviation < -tolerance && action == Action::Stay;
    if jumped_while_high || stayed_while_low {
        -reward
    } else {
        config.blameless_reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(deviation: i32) -> GameState {
        GameState::new(0, 10, deviation)
    }

    #[test]
    fn empty_and_single_entry_buffers_do_not_mutate() {
        let config = AgentConfig::new();
        let mut table = QTable::new();

        let mut buffer = EpisodeBuffer::new();
        buffer.assign_credit(&mut table, 5.0, true, &config);
        assert!(table.is_empty());

        buffer.record(state(0), Action::Stay);
        buffer.assign_credit(&mut table, 5.0, true, &config);
        assert!(table.is_empty());
    }

    #[test]
    fn most_recent_entry_is_only_a_future_anchor() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        let s1 = state(1);
        let s2 = state(2);
        let s3 = state(3);
        buffer.record(s1, Action::Stay);
        buffer.record(s2, Action::Jump);
        buffer.record(s3, Action::Stay);

        buffer.assign_credit(&mut table, 5.0, true, &config);

        // s3 anchors s2's bootstrap target but receives no update itself.
        assert_eq!(table.get(&s3, Action::Stay), 0.0);
        assert_eq!(table.get(&s3, Action::Jump), 0.0);
        assert_ne!(table.get(&s2, Action::Jump), 0.0);
        assert_ne!(table.get(&s1, Action::Stay), 0.0);
    }

    #[test]
    fn td_deltas_match_the_update_rule() {
        let config = AgentConfig::new(); // alpha 0.1, gamma 0.8
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        let s1 = state(1);
        let s2 = state(2);
        let s3 = state(3);
        buffer.record(s1, Action::Stay);
        buffer.record(s2, Action::Jump);
        buffer.record(s3, Action::Stay);

        buffer.assign_credit(&mut table, 5.0, true, &config);

        // (s2, Jump) updates first: reward 5 - |2| = 3, future value of
        // the untouched s3 is 0, prior estimate 0.
        let q2 = 0.1 * 3.0;
        assert!((table.get(&s2, Action::Jump) - q2).abs() < 1e-12);

        // (s1, Stay) then bootstraps from s2's freshly updated value.
        let q1 = 0.1 * ((5.0 - 1.0) + 0.8 * q2);
        assert!((table.get(&s1, Action::Stay) - q1).abs() < 1e-12);
    }

    #[test]
    fn failure_negates_reward_for_blameworthy_actions() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        // Two pixels above the line and jumped anyway.
        let high = state(2);
        buffer.record(high, Action::Jump);
        buffer.record(state(4), Action::Stay);

        buffer.assign_credit(&mut table, 100.0, false, &config);

        // reward = -(100 - 2) = -98, delta = 0.1 * -98.
        assert!((table.get(&high, Action::Jump) + 9.8).abs() < 1e-12);
    }

    #[test]
    fn failure_rewards_defensible_actions_with_a_nudge() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        // Inside the tolerance band; the crash was someone else's fault.
        let centered = state(1);
        buffer.record(centered, Action::Jump);
        buffer.record(state(5), Action::Stay);

        buffer.assign_credit(&mut table, 100.0, false, &config);

        assert!((table.get(&centered, Action::Jump) - 0.1 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn failure_negates_staying_while_below_the_line() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        let low = state(-3);
        buffer.record(low, Action::Stay);
        buffer.record(state(-5), Action::Stay);

        buffer.assign_credit(&mut table, 100.0, false, &config);

        // reward = -(100 - 3) = -97.
        assert!((table.get(&low, Action::Stay) + 9.7).abs() < 1e-12);
    }

    #[test]
    fn buffer_trims_to_the_replay_tail() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        for i in 0..12 {
            buffer.record(state(i), Action::Stay);
        }
        buffer.assign_credit(&mut table, 5.0, true, &config);

        assert_eq!(buffer.len(), config.replay_tail);
        assert_eq!(buffer.episode_len(), 0);
    }

    #[test]
    fn short_episodes_keep_their_full_tail() {
        let config = AgentConfig::new();
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        buffer.record(state(0), Action::Stay);
        buffer.record(state(1), Action::Jump);
        buffer.assign_credit(&mut table, 5.0, true, &config);

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn carried_tail_seeds_the_next_episode_walk() {
        let config = AgentConfig::new().with_replay_tail(3);
        let mut table = QTable::new();
        let mut buffer = EpisodeBuffer::new();

        for i in 0..6 {
            buffer.record(state(i), Action::Stay);
        }
        buffer.assign_credit(&mut table, 5.0, true, &config);
        assert_eq!(buffer.len(), 3);

        // One new tick, then a boundary: the window covers the carried
        // tail too, because momentum carries across the boundary.
        buffer.record(state(10), Action::Jump);
        let before = table.get(&state(4), Action::Stay);
        buffer.assign_credit(&mut table, 5.0, true, &config);
        assert_ne!(table.get(&state(4), Action::Stay), before);
    }
}
