//! On-disk representation of a Q-table.

use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::{Error, Result};

/// Versioned, shape-tagged dump of a value table.
///
/// `values` is the row-major `n_states x n_actions` array of `f32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub n_states: usize,
    pub n_actions: usize,
    pub values: Vec<f32>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        Self {
            version: Self::VERSION,
            n_states: table.n_states(),
            n_actions: table.n_actions(),
            values: table.values().to_vec(),
        }
    }

    /// Rebuild the table, checking the version and that the values fill the
    /// declared shape.
    pub fn into_table(self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        QTable::from_values(self.n_states, self.n_actions, self.values)
    }
}
