//! Single-file snapshot backend

use crate::codec;
use crate::error::{StorageError, StorageResult};
use crate::traits::SnapshotStore;
use crate::version::SnapshotHeader;
use plwordnet_core::Wordnet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Snapshot stored as one binary file
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> StorageResult<BufReader<File>> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.location()));
        }
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

impl SnapshotStore for FileSnapshot {
    fn save(&self, wordnet: &Wordnet) -> StorageResult<SnapshotHeader> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target and rename, so a failed save keeps the old snapshot.
        let partial = self.path.with_extension("partial");
        let written = File::create(&partial)
            .map_err(StorageError::from)
            .and_then(|file| codec::write_snapshot(BufWriter::new(file), wordnet))
            .and_then(|header| {
                fs::rename(&partial, &self.path)?;
                Ok(header)
            });
        let header = match written {
            Ok(header) => header,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(e);
            }
        };

        tracing::info!("Saved snapshot to {}", self.path.display());
        Ok(header)
    }

    fn load(&self) -> StorageResult<Wordnet> {
        let (header, wordnet) = codec::read_snapshot(self.open()?)?;
        tracing::debug!(
            "Restored snapshot written {} by version {}",
            header.created_at,
            header.crate_version
        );
        Ok(wordnet)
    }

    fn header(&self) -> StorageResult<SnapshotHeader> {
        codec::read_header(self.open()?)
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::version::CURRENT_VERSION;
    use plwordnet_core::{PathOptions, RelationQuery, SynsetId};
    use tempfile::tempdir;

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSnapshot::new(dir.path().join("nested").join("wordnet.snap"));
        assert!(!store.exists());

        let wn = testing::wordnet();
        let saved = store.save(&wn).unwrap();
        assert!(store.exists());
        assert_eq!(saved.format_version, CURRENT_VERSION);
        assert_eq!(store.header().unwrap(), saved);

        let restored = store.load().unwrap();
        let query = RelationQuery::new().subject(SynsetId(100));
        let before: Vec<u32> = wn
            .synset_relations_where(&query)
            .unwrap()
            .iter()
            .map(|(_, _, o)| o.id.0)
            .collect();
        let after: Vec<u32> = restored
            .synset_relations_where(&query)
            .unwrap()
            .iter()
            .map(|(_, _, o)| o.id.0)
            .collect();
        assert_eq!(before, after);

        let options = PathOptions::new().full_search(true);
        assert_eq!(
            wn.hypernym_paths(SynsetId(100), options),
            restored.hypernym_paths(SynsetId(100), options)
        );
        assert_eq!(restored.find("kot.1").units()[0].to_string(), "kot.1");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileSnapshot::new(dir.path().join("absent.snap"));
        assert!(matches!(store.load(), Err(StorageError::NotFound(_))));
        assert!(matches!(store.header(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_replaces_previous() {
        let dir = tempdir().unwrap();
        let store = FileSnapshot::new(dir.path().join("wordnet.snap"));
        let wn = testing::wordnet();
        store.save(&wn).unwrap();
        store.save(&wn).unwrap();
        assert_eq!(store.load().unwrap(), wn);
        assert!(!dir.path().join("wordnet.partial").exists());
    }

    #[test]
    fn test_failed_save_removes_partial() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target makes the final rename fail.
        let target = dir.path().join("wordnet.snap");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let store = FileSnapshot::new(&target);
        assert!(store.save(&testing::wordnet()).is_err());
        assert!(!dir.path().join("wordnet.partial").exists());
        assert!(target.join("keep").exists());
    }
}
