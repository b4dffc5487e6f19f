//! Attendance store - the participant table
//!
//! Holds every participant keyed by id, with a case-insensitive name index
//! so that at most one record exists per name. The store itself is plain
//! data; locking and commit/rollback belong to [`crate::roster::Roster`],
//! and file persistence lives in [`persist`].

pub mod persist;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::types::{AttendanceStatus, Participant};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data file corrupted: {0}")]
    Corrupted(String),
}

/// Case-insensitive natural key for a participant name
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceStore {
    participants: BTreeMap<u64, Participant>,
    by_name: HashMap<String, u64>,
    next_id: u64,
}

impl Default for AttendanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self {
            participants: BTreeMap::new(),
            by_name: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from loaded records, rejecting duplicate ids or names
    pub fn from_participants(
        participants: Vec<Participant>,
        next_id: Option<u64>,
    ) -> StoreResult<Self> {
        let mut store = Self::new();

        for participant in participants {
            if store.participants.contains_key(&participant.id) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate participant id {}",
                    participant.id
                )));
            }
            let key = name_key(&participant.name);
            if store.by_name.contains_key(&key) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate participant name '{}'",
                    participant.name
                )));
            }
            store.next_id = store.next_id.max(participant.id + 1);
            store.by_name.insert(key, participant.id);
            store.participants.insert(participant.id, participant);
        }

        if let Some(next_id) = next_id {
            store.next_id = store.next_id.max(next_id);
        }

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Id the next created participant will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        self.by_name
            .get(&name_key(name))
            .and_then(|id| self.participants.get(id))
    }

    /// All participants in id order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Create a record for a previously unseen name
    pub fn create(&mut self, name: &str, status: AttendanceStatus, at: DateTime<Utc>) -> Participant {
        let participant = Participant::new(self.next_id, name.trim().to_string(), status, at);
        self.next_id += 1;
        self.put(participant.clone());
        participant
    }

    /// Insert or replace a record by id
    pub fn put(&mut self, participant: Participant) {
        if let Some(previous) = self.participants.get(&participant.id) {
            let old_key = name_key(&previous.name);
            if old_key != name_key(&participant.name) {
                self.by_name.remove(&old_key);
            }
        }
        self.by_name
            .insert(name_key(&participant.name), participant.id);
        self.participants.insert(participant.id, participant);
    }

    pub fn remove(&mut self, id: u64) -> Option<Participant> {
        let removed = self.participants.remove(&id)?;
        self.by_name.remove(&name_key(&removed.name));
        Some(removed)
    }

    /// Remove every record; ids keep counting up
    pub fn clear(&mut self) -> usize {
        let removed = self.participants.len();
        self.participants.clear();
        self.by_name.clear();
        removed
    }

    /// Confirmed participants, optionally ignoring one id
    pub fn confirmed_count(&self, excluding: Option<u64>) -> usize {
        self.iter()
            .filter(|p| p.is_confirmed() && Some(p.id) != excluding)
            .count()
    }

    pub fn waitlisted_count(&self) -> usize {
        self.iter().filter(|p| p.is_waitlisted()).count()
    }

    pub fn max_waitlist_position(&self) -> u32 {
        self.iter()
            .filter(|p| p.is_waitlisted())
            .filter_map(|p| p.waitlist_position)
            .max()
            .unwrap_or(0)
    }

    /// Timestamp for a new RSVP, strictly later than every stored one
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.iter().map(|p| p.rsvp_timestamp).max() {
            Some(latest) if latest >= now => latest + Duration::microseconds(1),
            _ => now,
        }
    }
}
