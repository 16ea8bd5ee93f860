//! Action selection: exploration override, greedy comparison, biased ties.

use rand::Rng;

use crate::{
    agent::q_table::QTable,
    app::AgentConfig,
    types::{Action, GameState},
};

/// The action selector.
///
/// Selection never mutates the value table; the only side effect is
/// drawing from the injected random source, which keeps tests
/// deterministic under a seeded RNG.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    exploration_rate: f64,
    exploration_jump_prob: f64,
    tie_break_jump_prob: f64,
}

impl Policy {
    /// Build a policy from the agent configuration.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            exploration_rate: config.exploration_rate,
            exploration_jump_prob: config.exploration_jump_prob,
            tie_break_jump_prob: config.tie_break_jump_prob,
        }
    }

    /// Select an action for a state.
    ///
    /// 1. With `exploration_rate` probability the table is ignored
    ///    entirely and the action is drawn at random, jump-biased at
    ///    `exploration_jump_prob`. This keeps visitation of the full
    ///    state-action space non-zero over long training horizons.
    /// 2. Otherwise the strictly greater estimate wins.
    /// 3. Exact ties (including the untrained all-zero case) break
    ///    randomly with a small jump probability, so a fresh agent does
    ///    not flap every tick.
    pub fn select<R: Rng + ?Sized>(
        &self,
        table: &QTable,
        state: &GameState,
        rng: &mut R,
    ) -> Action {
        if rng.random::<f64>() < self.exploration_rate {
            return if rng.random::<f64>() < self.exploration_jump_prob {
                Action::Jump
            } else {
                Action::Stay
            };
        }

        let jump = table.get(state, Action::Jump);
        let stay = table.get(state, Action::Stay);
        if jump > stay {
            Action::Jump
        } else if stay > jump {
            Action::Stay
        } else if rng.random::<f64>() < self.tie_break_jump_prob {
            Action::Jump
        } else {
            Action::Stay
        }
    }
}
