//! Snapshot store trait definition

use crate::error::StorageResult;
use crate::version::SnapshotHeader;
use plwordnet_core::Wordnet;

/// Trait for snapshot backend implementations
pub trait SnapshotStore: Send + Sync {
    /// Persist `wordnet`, replacing any previous snapshot
    fn save(&self, wordnet: &Wordnet) -> StorageResult<SnapshotHeader>;

    /// Restore the stored graph
    fn load(&self) -> StorageResult<Wordnet>;

    /// Read the snapshot metadata without restoring the graph
    fn header(&self) -> StorageResult<SnapshotHeader>;

    /// Whether a snapshot has been saved
    fn exists(&self) -> bool;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}
