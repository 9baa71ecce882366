//! ReDB snapshot backend
//!
//! The header is kept as JSON in its own table so `header()` never touches
//! the encoded graph.

use crate::codec;
use crate::error::{StorageError, StorageResult};
use crate::traits::SnapshotStore;
use crate::version::{SnapshotHeader, CURRENT_VERSION};
use plwordnet_core::Wordnet;
use redb::{Database, ReadableTable, TableDefinition, TableError};
use std::path::{Path, PathBuf};

type BytesTable = TableDefinition<'static, &'static str, &'static [u8]>;

// Table definitions
const META: BytesTable = TableDefinition::new("meta");
const GRAPH: BytesTable = TableDefinition::new("graph");

const HEADER_KEY: &str = "header";
const WORDNET_KEY: &str = "wordnet";

/// ReDB snapshot backend
///
/// The database file is created by the first `save`; reads against a
/// missing file report `NotFound` without touching the disk.
pub struct RedbSnapshot {
    path: PathBuf,
}

impl RedbSnapshot {
    /// Use the ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    fn existing(&self) -> StorageResult<Database> {
        if !self.path.is_file() {
            return Err(StorageError::NotFound(self.location()));
        }
        Ok(Database::open(&self.path)?)
    }

    fn get(&self, table: BytesTable, key: &str) -> StorageResult<Vec<u8>> {
        let db = self.existing()?;
        let read_txn = db.begin_read()?;
        let table = match read_txn.open_table(table) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StorageError::NotFound(self.location()))
            }
            Err(e) => return Err(e.into()),
        };
        let value = table.get(key)?;
        let bytes = match value {
            Some(value) => value.value().to_vec(),
            None => return Err(StorageError::NotFound(self.location())),
        };
        Ok(bytes)
    }
}

impl SnapshotStore for RedbSnapshot {
    fn save(&self, wordnet: &Wordnet) -> StorageResult<SnapshotHeader> {
        let (header, bytes) = codec::encode(wordnet)?;
        let meta = serde_json::to_vec(&header)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(&self.path)?;
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(GRAPH)?;
            table.insert(WORDNET_KEY, bytes.as_slice())?;
        }
        {
            let mut table = write_txn.open_table(META)?;
            table.insert(HEADER_KEY, meta.as_slice())?;
        }
        write_txn.commit()?;

        tracing::info!(
            "Saved snapshot ({} bytes) to {}",
            bytes.len(),
            self.path.display()
        );
        Ok(header)
    }

    fn load(&self) -> StorageResult<Wordnet> {
        let bytes = self.get(GRAPH, WORDNET_KEY)?;
        let (_, wordnet) = codec::read_snapshot(bytes.as_slice())?;
        Ok(wordnet)
    }

    fn header(&self) -> StorageResult<SnapshotHeader> {
        let meta = self.get(META, HEADER_KEY)?;
        let header: SnapshotHeader = serde_json::from_slice(&meta)?;
        if header.format_version != CURRENT_VERSION {
            return Err(StorageError::VersionMismatch {
                found: header.format_version,
                expected: CURRENT_VERSION,
            });
        }
        Ok(header)
    }

    fn exists(&self) -> bool {
        self.get(META, HEADER_KEY).is_ok()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use plwordnet_core::{PathOptions, SynsetId};
    use tempfile::tempdir;

    #[test]
    fn test_redb_snapshot() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("wordnet.redb");

        let store = RedbSnapshot::open(&db_path).unwrap();
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StorageError::NotFound(_))));

        let wn = testing::wordnet();
        let saved = store.save(&wn).unwrap();
        assert!(store.exists());
        assert_eq!(store.header().unwrap(), saved);

        let restored = store.load().unwrap();
        assert_eq!(restored, wn);
        assert_eq!(
            restored.hypernym_paths(SynsetId(100), PathOptions::new()),
            wn.hypernym_paths(SynsetId(100), PathOptions::new())
        );
    }

    #[test]
    fn test_open_missing_creates_nothing() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("wordnet.redb");

        let store = RedbSnapshot::open(&db_path).unwrap();
        assert!(!store.exists());
        assert!(matches!(store.header(), Err(StorageError::NotFound(_))));
        assert!(!db_path.exists());
        assert!(!dir.path().join("nested").exists());

        store.save(&testing::wordnet()).unwrap();
        assert!(db_path.is_file());
        assert!(store.exists());
    }

    #[test]
    fn test_reopen_keeps_snapshot() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("wordnet.redb");
        let wn = testing::wordnet();

        {
            let store = RedbSnapshot::open(&db_path).unwrap();
            store.save(&wn).unwrap();
        }

        let store = RedbSnapshot::open(&db_path).unwrap();
        assert_eq!(store.header().unwrap().stats.lexical_units, 4);
        assert_eq!(store.load().unwrap(), wn);
    }
}
