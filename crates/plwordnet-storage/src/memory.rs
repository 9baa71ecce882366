//! In-memory snapshot backend for testing

use crate::codec;
use crate::error::{StorageError, StorageResult};
use crate::traits::SnapshotStore;
use crate::version::SnapshotHeader;
use plwordnet_core::Wordnet;
use std::sync::RwLock;

/// In-memory snapshot backend
///
/// Holds the encoded bytes, so a load goes through the same decoding as the
/// persistent backends.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, decode: impl FnOnce(&[u8]) -> StorageResult<T>) -> StorageResult<T> {
        let bytes = self
            .bytes
            .read()
            .map_err(|e| StorageError::Backend(format!("Lock error: {}", e)))?;
        match bytes.as_deref() {
            Some(bytes) => decode(bytes),
            None => Err(StorageError::NotFound(self.location())),
        }
    }
}

impl SnapshotStore for MemorySnapshot {
    fn save(&self, wordnet: &Wordnet) -> StorageResult<SnapshotHeader> {
        let (header, encoded) = codec::encode(wordnet)?;
        let mut bytes = self
            .bytes
            .write()
            .map_err(|e| StorageError::Backend(format!("Lock error: {}", e)))?;
        *bytes = Some(encoded);
        Ok(header)
    }

    fn load(&self) -> StorageResult<Wordnet> {
        self.read(|bytes| codec::read_snapshot(bytes).map(|(_, wordnet)| wordnet))
    }

    fn header(&self) -> StorageResult<SnapshotHeader> {
        self.read(|bytes| codec::read_header(bytes))
    }

    fn exists(&self) -> bool {
        self.bytes.read().map(|b| b.is_some()).unwrap_or(false)
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
