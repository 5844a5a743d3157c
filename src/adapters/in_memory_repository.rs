//! In-memory table repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    error::Error,
    ports::QTableRepository,
    q_learning::{QTable, SavedQTable},
};

/// In-memory repository for testing.
///
/// Encodes tables exactly as the file adapter does but keeps the bytes in a
/// shared map keyed by path. Clones share the same storage.
///
/// ```
/// use gridq::adapters::InMemoryRepository;
/// use gridq::ports::QTableRepository;
/// use gridq::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&QTable::new(4, 4), Path::new("table"))?;
/// assert!(repo.contains(Path::new("table")));
/// assert_eq!(repo.load(Path::new("table"))?.shape(), (4, 4));
/// # Ok::<(), gridq::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables currently stored
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl QTableRepository for InMemoryRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(&SavedQTable::from_table(table)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table for in-memory storage".to_string(),
                message: e.to_string(),
            }
        })?;
        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let key = key(path);
        let bytes = self
            .storage()
            .get(&key)
            .cloned()
            .ok_or(Error::TableNotFound { key })?;

        let saved: SavedQTable =
            rmp_serde::from_slice(&bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        saved.into_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        repo.save(&QTable::new(2, 4), Path::new("a")).unwrap();
        assert_eq!(clone.count(), 1);
        clone.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_missing_key() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.load(Path::new("nope")),
            Err(Error::TableNotFound { .. })
        ));
    }
}
