//! Roster - the attendance and waitlist engine
//!
//! `Roster` owns the [`AttendanceStore`] behind one mutex. Every mutating
//! operation runs as a single transaction: the store is copied, the
//! operation is applied to the copy, invariants are verified, the copy is
//! persisted, and only then does it replace the committed store. Any error
//! along the way leaves the committed roster untouched. Reads take the
//! same lock once, so a response never mixes states.

mod admin;
mod checkin;
pub mod invariants;
pub mod ordering;
mod query;
mod rsvp;
mod waitlist;

use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::config::RosterConfig;
use crate::store::{persist, AttendanceStore};
use crate::types::{
    AttendanceStatus, CategorizedRoster, CheckInStats, Deletion, ExportRow, Participant, Reset,
    RosterError, RosterOutcome, RosterResult,
};

pub use checkin::ensure_can_check_in;
pub use rsvp::{normalize_name, MAX_NAME_LEN};

/// Default number of confirmed places
pub const DEFAULT_CAPACITY: usize = 22;

/// Attendance roster with a fixed capacity and FIFO waitlist
pub struct Roster {
    capacity: usize,
    data_file: Option<PathBuf>,
    store: Mutex<AttendanceStore>,
}

impl Roster {
    /// Create an in-memory roster
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            data_file: None,
            store: Mutex::new(AttendanceStore::new()),
        }
    }

    /// Open a roster backed by a JSONL file, loading existing records
    pub fn with_file_path<P: AsRef<Path>>(file_path: P, capacity: usize) -> RosterResult<Self> {
        let path = file_path.as_ref().to_path_buf();
        let store = persist::load(&path)?;
        let roster = Self {
            capacity,
            data_file: Some(path),
            store: Mutex::new(store),
        };
        roster.settle_after_load()?;
        Ok(roster)
    }

    /// Open a roster as described by the configuration
    pub fn open(config: &RosterConfig) -> RosterResult<Self> {
        match &config.data_file {
            Some(path) => Self::with_file_path(path, config.capacity),
            None => Ok(Self::new(config.capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Repair waitlist numbering and fill slots freed by a raised capacity.
    ///
    /// The file is only rewritten when this changes something.
    fn settle_after_load(&self) -> RosterResult<()> {
        let mut committed = self.store.lock();
        let mut staged = committed.clone();

        waitlist::recalculate_waitlist_positions(&mut staged);
        let mut promoted = 0;
        while staged.confirmed_count(None) < self.capacity
            && waitlist::promote_from_waitlist(&mut staged).is_some()
        {
            promoted += 1;
        }

        self.verify(&staged)?;
        if staged != *committed {
            self.persist(&staged)?;
            *committed = staged;
        }

        if promoted > 0 {
            warn!(
                promoted,
                capacity = self.capacity,
                "Promoted waitlisted participants into free capacity on load"
            );
        }
        info!(
            participants = committed.len(),
            capacity = self.capacity,
            "Roster ready"
        );
        Ok(())
    }

    /// Run `op` against a staged copy of the store and commit it atomically
    fn transaction<T, F>(&self, op: F) -> RosterResult<T>
    where
        F: FnOnce(&mut AttendanceStore) -> RosterResult<T>,
    {
        let mut committed = self.store.lock();
        let mut staged = committed.clone();

        let value = op(&mut staged)?;
        self.verify(&staged)?;
        self.persist(&staged)?;

        *committed = staged;
        Ok(value)
    }

    fn verify(&self, staged: &AttendanceStore) -> RosterResult<()> {
        let broken = invariants::violations(staged, self.capacity);
        if broken.is_empty() {
            return Ok(());
        }
        let detail = broken.join("; ");
        error!(violations = %detail, "Rolled back transaction that broke roster invariants");
        Err(RosterError::InvariantViolation(detail))
    }

    fn persist(&self, staged: &AttendanceStore) -> RosterResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        persist::save(path, staged).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to persist roster, change rolled back");
            RosterError::from(e)
        })
    }

    /// Run a read against the committed store
    fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&AttendanceStore) -> T,
    {
        let store = self.store.lock();
        f(&*store)
    }
}

// RosterManager operations
impl Roster {
    pub fn rsvp(&self, name: &str, status: AttendanceStatus) -> RosterResult<RosterOutcome> {
        match status {
            AttendanceStatus::In => self.rsvp_in(name),
            AttendanceStatus::Out => self.rsvp_out(name),
        }
    }

    pub fn rsvp_in(&self, name: &str) -> RosterResult<RosterOutcome> {
        self.transaction(|store| rsvp::rsvp_in(store, self.capacity, name, Utc::now()))
    }

    pub fn rsvp_out(&self, name: &str) -> RosterResult<RosterOutcome> {
        self.transaction(|store| rsvp::rsvp_out(store, name, Utc::now()))
    }

    /// Promote the head of the waitlist if a confirmed slot is free
    pub fn promote_from_waitlist(&self) -> RosterResult<Option<Participant>> {
        self.transaction(|store| {
            if store.confirmed_count(None) >= self.capacity {
                return Ok(None);
            }
            Ok(waitlist::promote_from_waitlist(store))
        })
    }

    /// Renumber the waitlist from timestamp order, returning its length
    pub fn recalculate_waitlist_positions(&self) -> RosterResult<usize> {
        self.transaction(|store| Ok(waitlist::recalculate_waitlist_positions(store)))
    }

    pub fn set_payment(&self, id: u64, paid: bool) -> RosterResult<RosterOutcome> {
        self.transaction(|store| admin::set_payment(store, id, paid))
    }

    pub fn delete_participant(&self, id: u64) -> RosterResult<Deletion> {
        self.transaction(|store| admin::delete_participant(store, id))
    }

    pub fn reset_all(&self) -> RosterResult<Reset> {
        self.transaction(|store| Ok(admin::reset_all(store)))
    }
}

// CheckInGate operations
impl Roster {
    pub fn check_in(&self, id: u64) -> RosterResult<RosterOutcome> {
        self.transaction(|store| checkin::check_in(store, id))
    }

    pub fn undo_check_in(&self, id: u64) -> RosterResult<RosterOutcome> {
        self.transaction(|store| checkin::undo_check_in(store, id))
    }

    pub fn stats(&self) -> CheckInStats {
        self.read(checkin::stats)
    }
}

// Queries
impl Roster {
    pub fn get_participant(&self, id: u64) -> RosterResult<Participant> {
        self.read(|store| store.get(id).cloned())
            .ok_or(RosterError::NotFound { id })
    }

    pub fn find_by_name(&self, name: &str) -> Option<Participant> {
        self.read(|store| store.find_by_name(name).cloned())
    }

    pub fn list_categorized(&self) -> CategorizedRoster {
        self.read(|store| query::list_categorized(store, self.capacity))
    }

    pub fn export_snapshot(&self) -> Vec<ExportRow> {
        self.read(query::export_snapshot)
    }

    /// Every participant in id order
    pub fn participants(&self) -> Vec<Participant> {
        self.read(|store| store.iter().cloned().collect())
    }

    /// Invariant violations in the committed state; empty when healthy
    pub fn check_invariants(&self) -> Vec<String> {
        self.read(|store| invariants::violations(store, self.capacity))
    }
}
