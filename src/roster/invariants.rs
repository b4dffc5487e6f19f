//! Roster invariant checks
//!
//! Run against every staged store before it is committed. A non-empty
//! result aborts the transaction.

use std::collections::HashSet;

use super::ordering::by_rsvp_order;
use crate::store::{name_key, AttendanceStore};
use crate::types::{AttendanceStatus, Participant};

/// Describe every invariant the store currently breaks
pub fn violations(store: &AttendanceStore, capacity: usize) -> Vec<String> {
    let mut found = Vec::new();

    // Capacity
    let confirmed = store.confirmed_count(None);
    if confirmed > capacity {
        found.push(format!(
            "{} confirmed participants exceed capacity {}",
            confirmed, capacity
        ));
    }

    // Dense waitlist in RSVP order
    let mut waitlisted: Vec<&Participant> = store.iter().filter(|p| p.is_waitlisted()).collect();
    waitlisted.sort_by(|a, b| by_rsvp_order(a, b));
    for (index, participant) in waitlisted.iter().enumerate() {
        let expected = index as u32 + 1;
        if participant.waitlist_position != Some(expected) {
            found.push(format!(
                "'{}' holds waitlist position {:?}, expected {}",
                participant.name, participant.waitlist_position, expected
            ));
        }
    }

    for participant in store.iter() {
        // OUT participants never hold a position
        if participant.attendance_status == AttendanceStatus::Out
            && participant.waitlist_position.is_some()
        {
            found.push(format!("'{}' is OUT but holds a waitlist position", participant.name));
        }

        // Check-in requires confirmed and paid
        if participant.checked_in && !(participant.is_confirmed() && participant.paid) {
            found.push(format!(
                "'{}' is checked in without being confirmed and paid",
                participant.name
            ));
        }
    }

    // Unique names
    let mut names = HashSet::new();
    for participant in store.iter() {
        if !names.insert(name_key(&participant.name)) {
            found.push(format!("name '{}' appears more than once", participant.name));
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_valid_store_has_no_violations() {
        let mut store = AttendanceStore::new();
        store.create("Alice", AttendanceStatus::In, at(0));
        let bob = store.create("Bob", AttendanceStatus::In, at(1));
        store.put(bob.waitlisted_at(1));
        store.create("Carol", AttendanceStatus::Out, at(2));

        assert!(violations(&store, 1).is_empty());
    }

    #[test]
    fn test_detects_over_capacity() {
        let mut store = AttendanceStore::new();
        store.create("Alice", AttendanceStatus::In, at(0));
        store.create("Bob", AttendanceStatus::In, at(1));

        let found = violations(&store, 1);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("exceed capacity"));
    }

    #[test]
    fn test_detects_gap_and_misorder() {
        let mut store = AttendanceStore::new();
        let a = store.create("Alice", AttendanceStatus::In, at(0));
        let b = store.create("Bob", AttendanceStatus::In, at(1));
        store.put(a.waitlisted_at(2));
        store.put(b.waitlisted_at(1));

        assert_eq!(violations(&store, 5).len(), 2);
    }

    #[test]
    fn test_detects_unpaid_check_in() {
        let mut store = AttendanceStore::new();
        let a = store.create("Alice", AttendanceStatus::In, at(0));
        store.put(a.with_check_in(true));

        let found = violations(&store, 5);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("checked in"));
    }
}
