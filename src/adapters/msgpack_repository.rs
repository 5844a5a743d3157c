//! MessagePack implementation of the Q-table repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::info;

use crate::{
    Result,
    error::Error,
    ports::QTableRepository,
    q_learning::{QTable, SavedQTable},
};

/// MessagePack-based table repository.
///
/// Stores a [`SavedQTable`] document: version, shape and the row-major `f32`
/// values. Floats are written as MessagePack `float32`, so a save/load round
/// trip is bit-exact.
///
/// # Examples
///
/// ```no_run
/// use gridq::adapters::MsgPackRepository;
/// use gridq::ports::QTableRepository;
/// use gridq::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// repo.save(&QTable::new(25, 4), Path::new("q_table.msgpack"))?;
/// let loaded = repo.load(Path::new("q_table.msgpack"))?;
/// # Ok::<(), gridq::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, &SavedQTable::from_table(table)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        let (n_states, n_actions) = table.shape();
        info!(path = %path.display(), n_states, n_actions, "saved Q-table");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedQTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        let table = saved.into_table()?;

        let (n_states, n_actions) = table.shape();
        info!(path = %path.display(), n_states, n_actions, "loaded Q-table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("q_table.msgpack");

        let mut table = QTable::new(9, 4);
        table.set(4, 2, 3.25);

        let repo = MsgPackRepository::new();
        repo.save(&table, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = MsgPackRepository::new().load(&temp_dir.path().join("missing.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"not a table").unwrap();

        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = MsgPackRepository::new().save(
            &QTable::new(1, 4),
            &temp_dir.path().join("no_such_dir").join("q.msgpack"),
        );
        assert!(result.is_err());
    }
}
