//! plWordNet Storage - snapshot backends for the loaded graph
//!
//! Loading the XML dump is slow; a snapshot stores the fully linked graph so
//! later runs can skip ingestion. Every backend writes the same versioned
//! encoding (see [`codec`]).

#![allow(clippy::result_large_err)]

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;
pub mod version;

#[cfg(feature = "redb")]
pub mod redb;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{StorageError, StorageResult};
pub use file::FileSnapshot;
pub use memory::MemorySnapshot;
pub use traits::SnapshotStore;
pub use version::{SnapshotHeader, CURRENT_VERSION, MAGIC};

#[cfg(feature = "redb")]
pub use redb::RedbSnapshot;
