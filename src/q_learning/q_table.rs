//! Dense Q-table

use crate::{Error, Result};

/// Q-values for every `(state, action)` pair, stored row-major as `f32`.
///
/// The shape is fixed at construction; state and action ids index the table
/// directly, so out-of-range ids panic like any slice index.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    n_states: usize,
    n_actions: usize,
    values: Vec<f32>,
}

impl QTable {
    /// Zero-initialised table
    ///
    /// # Panics
    ///
    /// Panics if `n_states * n_actions` overflows `usize`; use
    /// [`QTable::try_new`] for sizes that come from user input.
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        match Self::try_new(n_states, n_actions) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    }

    /// Zero-initialised table, rejecting shapes whose size overflows.
    pub fn try_new(n_states: usize, n_actions: usize) -> Result<Self> {
        let len = table_len(n_states, n_actions)?;
        Ok(Self {
            n_states,
            n_actions,
            values: vec![0.0; len],
        })
    }

    /// Build a table from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentTable`] when `values` does not hold exactly
    /// `n_states * n_actions` entries.
    pub fn from_values(n_states: usize, n_actions: usize, values: Vec<f32>) -> Result<Self> {
        let expected = table_len(n_states, n_actions)?;
        if values.len() != expected {
            return Err(Error::InconsistentTable {
                n_states,
                n_actions,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            n_states,
            n_actions,
            values,
        })
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// `(n_states, n_actions)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_states, self.n_actions)
    }

    /// Row-major view of all values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, state: usize, action: usize) -> f32 {
        self.row(state)[action]
    }

    pub fn set(&mut self, state: usize, action: usize, value: f32) {
        let idx = self.index(state, action);
        self.values[idx] = value;
    }

    /// All action values for `state`
    pub fn row(&self, state: usize) -> &[f32] {
        let start = state * self.n_actions;
        &self.values[start..start + self.n_actions]
    }

    /// Largest action value for `state`
    pub fn max_q(&self, state: usize) -> f32 {
        self.row(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Every action whose value equals the row maximum, in index order
    pub fn best_actions(&self, state: usize) -> Vec<usize> {
        let max = self.max_q(state);
        self.row(state)
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q == max)
            .map(|(action, _)| action)
            .collect()
    }

    /// Move `Q(state, action)` a fraction `learning_rate` of the way towards
    /// `target`. Returns the TD error `target - Q(state, action)` measured
    /// before the update.
    pub fn move_toward(
        &mut self,
        state: usize,
        action: usize,
        target: f32,
        learning_rate: f32,
    ) -> f32 {
        let idx = self.index(state, action);
        let td_error = target - self.values[idx];
        self.values[idx] += learning_rate * td_error;
        td_error
    }

    fn index(&self, state: usize, action: usize) -> usize {
        assert!(
            action < self.n_actions,
            "action {action} out of range for {} actions",
            self.n_actions
        );
        state * self.n_actions + action
    }
}

fn table_len(n_states: usize, n_actions: usize) -> Result<usize> {
    n_states.checked_mul(n_actions).ok_or_else(|| {
        Error::config(format!(
            "Q-table of {n_states}x{n_actions} entries does not fit in memory"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let table = QTable::new(5, 4);
        assert_eq!(table.shape(), (5, 4));
        assert!(table.values().iter().all(|&q| q == 0.0));
    }

    #[test]
    fn test_qtable_set_get() {
        let mut table = QTable::new(3, 4);
        table.set(2, 3, 1.5);
        assert_eq!(table.get(2, 3), 1.5);
        assert_eq!(table.row(2), &[0.0, 0.0, 0.0, 1.5]);
        assert_eq!(table.values()[2 * 4 + 3], 1.5);
    }

    #[test]
    fn test_max_q_and_best_actions() {
        let mut table = QTable::new(1, 4);
        table.set(0, 0, 0.5);
        table.set(0, 1, 1.5);
        table.set(0, 2, 0.8);
        table.set(0, 3, 1.5);

        assert_eq!(table.max_q(0), 1.5);
        assert_eq!(table.best_actions(0), vec![1, 3]);
    }

    #[test]
    fn test_all_zero_row_ties_everywhere() {
        let table = QTable::new(2, 4);
        assert_eq!(table.best_actions(1), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_toward() {
        let mut table = QTable::new(1, 2);
        table.set(0, 1, 2.0);
        let td_error = table.move_toward(0, 1, 4.0, 0.25);
        assert_eq!(td_error, 2.0);
        assert_eq!(table.get(0, 1), 2.5);
    }

    #[test]
    fn test_from_values_checks_length() {
        assert!(QTable::from_values(2, 2, vec![0.0; 4]).is_ok());
        assert!(matches!(
            QTable::from_values(2, 2, vec![0.0; 3]),
            Err(Error::InconsistentTable {
                expected: 4,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_shape_is_rejected() {
        assert!(matches!(
            QTable::try_new(usize::MAX, 4),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            QTable::from_values(usize::MAX, 2, Vec::new()),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_action_out_of_range_panics() {
        let table = QTable::new(2, 4);
        table.get(0, 4);
    }
}
