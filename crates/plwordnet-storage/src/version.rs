//! Snapshot format versioning
//!
//! The encoded graph layout follows the core types, so any change to them
//! that alters the encoding must bump [`CURRENT_VERSION`]. Older snapshots
//! are rejected rather than migrated; re-import from the XML dump instead.

use chrono::{DateTime, Utc};
use plwordnet_core::{LoadStats, Wordnet};
use serde::{Deserialize, Serialize};

/// Leading bytes of every snapshot
pub const MAGIC: &[u8; 8] = b"PLWNSNAP";

/// Current snapshot format version
pub const CURRENT_VERSION: u32 = 1;

/// Metadata stored ahead of the encoded graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub format_version: u32,

    /// Version of the crate that wrote the snapshot
    pub crate_version: String,

    pub created_at: DateTime<Utc>,

    /// Load statistics of the stored graph
    pub stats: LoadStats,
}

impl SnapshotHeader {
    pub fn for_wordnet(wordnet: &Wordnet) -> Self {
        Self {
            format_version: CURRENT_VERSION,
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
            stats: wordnet.stats().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_header_for_wordnet() {
        let wn = testing::wordnet();
        let header = SnapshotHeader::for_wordnet(&wn);
        assert_eq!(header.format_version, CURRENT_VERSION);
        assert_eq!(header.crate_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(header.stats.synsets, 3);
        assert_eq!(&header.stats, wn.stats());
    }
}
