//! Game-day check-in gate

use tracing::{debug, info, warn};

use crate::store::AttendanceStore;
use crate::types::{AttendanceStatus, CheckInStats, Participant, RosterError, RosterOutcome, RosterResult};

/// Check-in is allowed only for confirmed participants who have paid
pub fn ensure_can_check_in(participant: &Participant) -> RosterResult<()> {
    if participant.attendance_status != AttendanceStatus::In {
        return Err(RosterError::transition(format!(
            "Player is not RSVP'd IN (current status: {})",
            participant.attendance_status
        )));
    }
    if let Some(position) = participant.waitlist_position {
        return Err(RosterError::transition(format!(
            "Player is on waitlist at position {}. Cannot check in from waitlist.",
            position
        )));
    }
    if !participant.paid {
        return Err(RosterError::transition(
            "Player must pay before checking in. Payment required!",
        ));
    }
    Ok(())
}

pub fn check_in(store: &mut AttendanceStore, id: u64) -> RosterResult<RosterOutcome> {
    let participant = store.get(id).cloned().ok_or(RosterError::NotFound { id })?;

    if let Err(e) = ensure_can_check_in(&participant) {
        warn!(id, name = %participant.name, reason = %e, "Check-in rejected");
        return Err(e);
    }

    if participant.checked_in {
        debug!(id, name = %participant.name, "Already checked in");
        return Ok(RosterOutcome::new(participant, "Player is already checked in"));
    }

    let checked = participant.with_check_in(true);
    store.put(checked.clone());
    info!(id, name = %checked.name, "Checked in");
    let message = format!("Successfully checked in {}!", checked.name);
    Ok(RosterOutcome::new(checked, message))
}

/// Undo is permitted for any existing participant
pub fn undo_check_in(store: &mut AttendanceStore, id: u64) -> RosterResult<RosterOutcome> {
    let participant = store.get(id).cloned().ok_or(RosterError::NotFound { id })?;

    if !participant.checked_in {
        debug!(id, name = %participant.name, "Undo check-in on participant not checked in");
        return Ok(RosterOutcome::new(participant, "Player was not checked in"));
    }

    let unchecked = participant.with_check_in(false);
    store.put(unchecked.clone());
    info!(id, name = %unchecked.name, "Check-in undone");
    let message = format!("Check-in undone for {}", unchecked.name);
    Ok(RosterOutcome::new(unchecked, message))
}

pub fn stats(store: &AttendanceStore) -> CheckInStats {
    let total_confirmed = store.confirmed_count(None);
    let total_paid = store.iter().filter(|p| p.is_confirmed() && p.paid).count();
    // Counted over everyone, not just confirmed, as a cross-check
    let total_checked_in = store.iter().filter(|p| p.checked_in).count();

    CheckInStats {
        total_confirmed,
        total_paid,
        total_checked_in,
        awaiting_payment: total_confirmed.saturating_sub(total_paid),
        awaiting_check_in: total_paid.saturating_sub(total_checked_in),
    }
}
