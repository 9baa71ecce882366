//! Snapshot encoding
//!
//! Layout: the 8 magic bytes, the format version as a little-endian `u32`,
//! then the bincode-encoded [`SnapshotHeader`] followed by the bincode-encoded
//! [`Wordnet`]. The magic and version are read first so a foreign or stale
//! file is rejected before any decoding happens.

use crate::error::{StorageError, StorageResult};
use crate::version::{SnapshotHeader, CURRENT_VERSION, MAGIC};
use plwordnet_core::Wordnet;
use std::io::{ErrorKind, Read, Write};

/// Encode `wordnet` into `writer`
pub fn write_snapshot<W: Write>(
    mut writer: W,
    wordnet: &Wordnet,
) -> StorageResult<SnapshotHeader> {
    let header = SnapshotHeader::for_wordnet(wordnet);
    writer.write_all(MAGIC)?;
    writer.write_all(&CURRENT_VERSION.to_le_bytes())?;
    bincode::serialize_into(&mut writer, &header)?;
    bincode::serialize_into(&mut writer, wordnet)?;
    writer.flush()?;
    Ok(header)
}

/// Encode `wordnet` into a fresh buffer
pub fn encode(wordnet: &Wordnet) -> StorageResult<(SnapshotHeader, Vec<u8>)> {
    let mut bytes = Vec::new();
    let header = write_snapshot(&mut bytes, wordnet)?;
    Ok((header, bytes))
}

/// Read only the header
pub fn read_header<R: Read>(mut reader: R) -> StorageResult<SnapshotHeader> {
    read_preamble(&mut reader)?;
    Ok(bincode::deserialize_from(&mut reader)?)
}

/// Read the header and the graph
pub fn read_snapshot<R: Read>(mut reader: R) -> StorageResult<(SnapshotHeader, Wordnet)> {
    read_preamble(&mut reader)?;
    let header: SnapshotHeader = bincode::deserialize_from(&mut reader)?;
    let wordnet: Wordnet = bincode::deserialize_from(&mut reader)?;
    Ok((header, wordnet))
}

fn read_preamble<R: Read>(reader: &mut R) -> StorageResult<()> {
    let mut magic = [0u8; 8];
    read_exact(reader, &mut magic)?;
    if &magic != MAGIC {
        return Err(StorageError::InvalidSnapshot(
            "missing snapshot signature".to_string(),
        ));
    }

    let mut version = [0u8; 4];
    read_exact(reader, &mut version)?;
    let found = u32::from_le_bytes(version);
    if found != CURRENT_VERSION {
        return Err(StorageError::VersionMismatch {
            found,
            expected: CURRENT_VERSION,
        });
    }
    Ok(())
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> StorageResult<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            StorageError::InvalidSnapshot("truncated snapshot".to_string())
        }
        _ => StorageError::Io(e),
    })
}
