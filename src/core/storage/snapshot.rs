//! Snapshot encoding and file I/O.
//!
//! A snapshot is a compact JSON array of `{"ID": <int>, "Data": <json>}`
//! objects. Payload bytes are embedded verbatim, so dumping a store that
//! was loaded from a snapshot reproduces that snapshot byte for byte.

use crate::core::error::{FolkError, Result};
use crate::core::types::{DocId, SnapshotRecord, SnapshotRecordRef};
use serde_json::value::RawValue;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a selection of zero documents serializes to
pub const EMPTY_SELECTION: &str = "null";

/// Encode documents as a snapshot array, in iteration order
pub fn encode<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = (DocId, &'a RawValue)>,
{
    let records: Vec<SnapshotRecordRef<'a>> = records
        .into_iter()
        .map(|(id, data)| SnapshotRecordRef { id, data })
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode a snapshot array
///
/// A bare `null` is read as an empty snapshot. Anything that is not an
/// array of `{ID, Data}` objects with integer ids is rejected.
pub fn decode(bytes: &[u8]) -> Result<Vec<SnapshotRecord>> {
    let records: Option<Vec<SnapshotRecord>> = serde_json::from_slice(bytes)
        .map_err(|e| FolkError::MalformedSnapshot(e.to_string()))?;
    Ok(records.unwrap_or_default())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write `bytes` to `path` through a synced temporary file and a rename,
/// so a crash mid-dump never leaves a truncated snapshot behind
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });

    if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    Ok(())
}
