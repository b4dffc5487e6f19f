//! JSONL persistence for the attendance store
//!
//! File layout: an optional `{"next_id": N}` header line followed by one
//! participant object per line. The whole file is rewritten atomically
//! after every committed change.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{AttendanceStore, StoreError, StoreResult};
use crate::types::Participant;
use crate::utils::atomic::{atomic_write_with, remove_stale_temp};

#[derive(Debug, Serialize, Deserialize)]
struct StoreHeader {
    next_id: u64,
}

/// Load a store from `path`; a missing file is an empty store
pub fn load(path: &Path) -> StoreResult<AttendanceStore> {
    if remove_stale_temp(path)? {
        warn!(path = %path.display(), "Removed temp file from an interrupted write");
    }

    if !path.exists() {
        debug!(path = %path.display(), "No data file yet, starting empty");
        return Ok(AttendanceStore::new());
    }

    let content = fs::read_to_string(path)?;
    let mut participants = Vec::new();
    let mut next_id = None;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let corrupted = |e: serde_json::Error| {
            StoreError::Corrupted(format!("line {}: {}", index + 1, e))
        };

        // Participant records carry an id, the header does not
        let value: Value = serde_json::from_str(line).map_err(corrupted)?;
        if value.get("id").is_some() {
            participants.push(serde_json::from_value::<Participant>(value).map_err(corrupted)?);
        } else {
            let header = serde_json::from_value::<StoreHeader>(value).map_err(corrupted)?;
            next_id = Some(header.next_id);
        }
    }

    let store = AttendanceStore::from_participants(participants, next_id)?;
    debug!(path = %path.display(), participants = store.len(), "Loaded roster");
    Ok(store)
}

/// Atomically replace the file at `path` with the contents of `store`
pub fn save(path: &Path, store: &AttendanceStore) -> StoreResult<()> {
    let mut content = serde_json::to_string(&StoreHeader {
        next_id: store.next_id(),
    })?;
    content.push('\n');

    for participant in store.iter() {
        content.push_str(&serde_json::to_string(participant)?);
        content.push('\n');
    }

    atomic_write_with(path, |file| file.write_all(content.as_bytes()))?;
    debug!(path = %path.display(), participants = store.len(), "Persisted roster");
    Ok(())
}
