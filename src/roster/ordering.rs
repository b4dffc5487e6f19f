//! Explicit orderings over participants
//!
//! Every list the roster hands out is sorted with one of these comparators,
//! so ordering never depends on how a storage engine sorts nulls or ties.
//! All of them fall back to the id, making every order total.

use std::cmp::Ordering;

use crate::types::{AttendanceStatus, Participant};

/// RSVP order: earliest timestamp first, then lowest id
pub fn by_rsvp_order(a: &Participant, b: &Participant) -> Ordering {
    a.rsvp_timestamp
        .cmp(&b.rsvp_timestamp)
        .then_with(|| a.id.cmp(&b.id))
}

/// Waitlist order: lowest position first, then RSVP order
pub fn by_waitlist_position(a: &Participant, b: &Participant) -> Ordering {
    positions_nulls_first(a.waitlist_position, b.waitlist_position)
        .then_with(|| by_rsvp_order(a, b))
}

/// Name order: case-insensitive, then exact name, then id
pub fn by_name(a: &Participant, b: &Participant) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Export order: IN before OUT, then position with confirmed (no position)
/// first, then RSVP order
pub fn by_export_order(a: &Participant, b: &Participant) -> Ordering {
    status_rank(a.attendance_status)
        .cmp(&status_rank(b.attendance_status))
        .then_with(|| positions_nulls_first(a.waitlist_position, b.waitlist_position))
        .then_with(|| by_rsvp_order(a, b))
}

fn status_rank(status: AttendanceStatus) -> u8 {
    match status {
        AttendanceStatus::In => 0,
        AttendanceStatus::Out => 1,
    }
}

fn positions_nulls_first(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}
