//! Q-learning agent
//!
//! The agent owns its value table and random sources; nothing is shared
//! between instances, so independent agents can be trained side by side.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{config::QLearningConfig, q_table::QTable};
use crate::{
    Error, Result,
    adapters::MsgPackRepository,
    ports::{Learner, QTableRepository, Transition},
};

/// Build the exploration and tie-break streams.
///
/// The tie-break stream is seeded with `seed + 1` so the two sequences are
/// independent yet both reproducible from one seed.
fn build_rngs(seed: Option<u64>) -> (StdRng, StdRng) {
    match seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (
            StdRng::from_rng(&mut rand::rng()),
            StdRng::from_rng(&mut rand::rng()),
        ),
    }
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// Explores ε-greedily and breaks ties between equally valued actions
/// uniformly at random, so an all-zero table does not bias it towards the
/// lowest action index.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    learning_rate: f32,
    discount_factor: f32,
    epsilon: f32,
    exploration_rng: StdRng,
    tie_break_rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with a zero-initialised `n_states x n_actions` table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an empty state or action
    /// space or for hyperparameters outside their ranges.
    pub fn new(n_states: usize, n_actions: usize, config: QLearningConfig) -> Result<Self> {
        if n_states == 0 || n_actions == 0 {
            return Err(Error::config(format!(
                "Q-table needs at least one state and one action (got {n_states}x{n_actions})"
            )));
        }
        config.validate()?;
        let q_table = QTable::try_new(n_states, n_actions)?;

        let (exploration_rng, tie_break_rng) = build_rngs(config.seed);
        Ok(Self {
            q_table,
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            epsilon: config.epsilon,
            exploration_rng,
            tie_break_rng,
        })
    }

    /// ε-greedy action selection.
    ///
    /// With `greedy` unset, a uniformly random action is returned with
    /// probability ε; otherwise (and always when `greedy` is set) the
    /// best-valued action is returned.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not a row of the table.
    pub fn select_action(&mut self, state: usize, greedy: bool) -> usize {
        if !greedy && self.exploration_rng.random::<f32>() < self.epsilon {
            self.exploration_rng
                .random_range(0..self.q_table.n_actions())
        } else {
            self.greedy_action(state)
        }
    }

    /// Best-valued action for `state`, ties broken uniformly at random.
    pub fn greedy_action(&mut self, state: usize) -> usize {
        let candidates = self.q_table.best_actions(state);
        // A NaN row has no maximum; fall back to the first action.
        candidates
            .choose(&mut self.tie_break_rng)
            .copied()
            .unwrap_or(0)
    }

    /// One-step Q-learning update. Returns the TD error.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)], with the bootstrap
    /// term dropped when `done`.
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: f32,
        next_state: usize,
        done: bool,
    ) -> f32 {
        let target = if done {
            reward
        } else {
            reward + self.discount_factor * self.q_table.max_q(next_state)
        };
        self.q_table
            .move_toward(state, action, target, self.learning_rate)
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Set the exploration rate, clamped to `[0, 1]`.
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f32 {
        self.discount_factor
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Replace the value table with one of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `table` has a different shape; the
    /// current table is kept in that case.
    pub fn replace_table(&mut self, table: QTable) -> Result<()> {
        if table.shape() != self.q_table.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.q_table.shape(),
                found: table.shape(),
            });
        }
        self.q_table = table;
        Ok(())
    }

    /// Reseed both random streams.
    pub fn reseed(&mut self, seed: u64) {
        let (exploration_rng, tie_break_rng) = build_rngs(Some(seed));
        self.exploration_rng = exploration_rng;
        self.tie_break_rng = tie_break_rng;
    }

    /// Save the value table as MessagePack.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(&MsgPackRepository, path.as_ref())
    }

    /// Load a MessagePack value table saved by [`QLearningAgent::save`].
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_with(&MsgPackRepository, path.as_ref())
    }

    pub fn save_with<R: QTableRepository>(&self, repo: &R, path: &Path) -> Result<()> {
        repo.save(&self.q_table, path)
    }

    pub fn load_with<R: QTableRepository>(&mut self, repo: &R, path: &Path) -> Result<()> {
        let table = repo.load(path)?;
        self.replace_table(table)
    }
}

impl Learner for QLearningAgent {
    fn select_action(&mut self, state: usize, greedy: bool) -> usize {
        QLearningAgent::select_action(self, state, greedy)
    }

    fn learn(&mut self, transition: &Transition) -> Result<()> {
        self.update(
            transition.state,
            transition.action,
            transition.reward,
            transition.next_state,
            transition.done,
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn exploration_rate(&self) -> Option<f32> {
        Some(self.epsilon)
    }

    fn set_exploration_rate(&mut self, epsilon: f32) {
        self.set_epsilon(epsilon);
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.reseed(seed);
    }
}
