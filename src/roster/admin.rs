//! Payment updates and admin removals

use tracing::{info, warn};

use super::waitlist;
use crate::store::AttendanceStore;
use crate::types::{AttendanceStatus, Deletion, Reset, RosterError, RosterOutcome, RosterResult};

/// Set the paid flag; only IN participants (confirmed or waitlisted) qualify
pub fn set_payment(store: &mut AttendanceStore, id: u64, paid: bool) -> RosterResult<RosterOutcome> {
    let participant = store.get(id).cloned().ok_or(RosterError::NotFound { id })?;

    if participant.attendance_status != AttendanceStatus::In {
        warn!(id, name = %participant.name, "Payment update rejected for OUT participant");
        return Err(RosterError::transition(
            "Can only mark payment for players who are IN",
        ));
    }

    let updated = participant.with_payment(paid);
    store.put(updated.clone());

    let label = if paid { "paid" } else { "unpaid" };
    info!(id, name = %updated.name, paid, "Payment updated");
    let message = format!("{} marked as {}", updated.name, label);
    Ok(RosterOutcome::new(updated, message))
}

/// Remove a participant, promoting or renumbering as a withdrawal would
pub fn delete_participant(store: &mut AttendanceStore, id: u64) -> RosterResult<Deletion> {
    let removed = store.remove(id).ok_or(RosterError::NotFound { id })?;
    info!(id, name = %removed.name, "Deleted participant");

    let promoted = if removed.is_confirmed() {
        waitlist::promote_from_waitlist(store)
    } else {
        if removed.is_waitlisted() {
            waitlist::recalculate_waitlist_positions(store);
        }
        None
    };

    let message = match &promoted {
        Some(p) => format!("Deleted {}. {} promoted from waitlist!", removed.name, p.name),
        None => format!("Deleted {}", removed.name),
    };
    Ok(Deletion {
        removed,
        promoted,
        message,
    })
}

pub fn reset_all(store: &mut AttendanceStore) -> Reset {
    let removed = store.clear();
    info!(removed, "Reset all participant data");
    Reset {
        removed,
        message: "All player data has been reset".to_string(),
    }
}
