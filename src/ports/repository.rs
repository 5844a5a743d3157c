//! Repository port for value-table persistence.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
///
/// This trait abstracts the storage mechanism so the agent does not depend on a
/// particular file format.
///
/// # Examples
///
/// ```no_run
/// use gridq::ports::QTableRepository;
/// use gridq::q_learning::QTable;
/// use std::path::Path;
///
/// fn checkpoint<R: QTableRepository>(repo: &R, table: &QTable) -> gridq::Result<()> {
///     repo.save(table, Path::new("checkpoint.msgpack"))
/// }
/// ```
pub trait QTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be read, the format is invalid, or
    /// the stored values do not match the stored shape.
    fn load(&self, path: &Path) -> Result<QTable>;
}
