//! Read-only views over the roster

use super::ordering::{by_export_order, by_name, by_rsvp_order, by_waitlist_position};
use crate::store::AttendanceStore;
use crate::types::{AttendanceStatus, CategorizedRoster, ExportRow, Participant};

pub fn list_categorized(store: &AttendanceStore, capacity: usize) -> CategorizedRoster {
    let mut confirmed: Vec<Participant> = store.iter().filter(|p| p.is_confirmed()).cloned().collect();
    let mut waitlist: Vec<Participant> = store.iter().filter(|p| p.is_waitlisted()).cloned().collect();
    let mut out: Vec<Participant> = store
        .iter()
        .filter(|p| p.attendance_status == AttendanceStatus::Out)
        .cloned()
        .collect();

    confirmed.sort_by(by_rsvp_order);
    waitlist.sort_by(by_waitlist_position);
    out.sort_by(by_name);

    CategorizedRoster {
        total_confirmed: confirmed.len(),
        total_waitlist: waitlist.len(),
        spots_available: capacity.saturating_sub(confirmed.len()),
        confirmed,
        waitlist,
        out,
    }
}

pub fn export_snapshot(store: &AttendanceStore) -> Vec<ExportRow> {
    let mut all: Vec<&Participant> = store.iter().collect();
    all.sort_by(|a, b| by_export_order(a, b));
    all.into_iter().map(ExportRow::from).collect()
}
