//! RSVP transitions with capacity admission

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::waitlist;
use crate::store::AttendanceStore;
use crate::types::{AttendanceStatus, RosterError, RosterOutcome, RosterResult};

/// Longest accepted participant name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Trim and validate a participant name
pub fn normalize_name(name: &str) -> RosterResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::InvalidName("name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(RosterError::InvalidName(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(trimmed)
}

/// RSVP a participant IN, confirming or waitlisting them
pub fn rsvp_in(
    store: &mut AttendanceStore,
    capacity: usize,
    name: &str,
    now: DateTime<Utc>,
) -> RosterResult<RosterOutcome> {
    let name = normalize_name(name)?;
    let at = store.next_timestamp(now);

    let joined = match store.find_by_name(name).cloned() {
        Some(existing) if existing.attendance_status == AttendanceStatus::In => {
            let message = match existing.waitlist_position {
                None => "Already confirmed IN".to_string(),
                Some(position) => format!("Already on waitlist at position {}", position),
            };
            debug!(id = existing.id, name = %existing.name, "RSVP IN repeated, no change");
            return Ok(RosterOutcome::new(existing, message));
        }
        Some(existing) => existing.joined(at),
        None => store.create(name, AttendanceStatus::In, at),
    };

    let confirmed = store.confirmed_count(Some(joined.id));
    if confirmed < capacity {
        let participant = joined.confirmed();
        store.put(participant.clone());
        info!(
            id = participant.id,
            name = %participant.name,
            filled = confirmed + 1,
            capacity,
            "Confirmed IN"
        );
        let message = format!("Confirmed IN! ({}/{} spots filled)", confirmed + 1, capacity);
        return Ok(RosterOutcome::new(participant, message));
    }

    let tail = store.max_waitlist_position() + 1;
    store.put(joined.waitlisted_at(tail));
    waitlist::recalculate_waitlist_positions(store);

    let participant = store
        .get(joined.id)
        .cloned()
        .ok_or(RosterError::NotFound { id: joined.id })?;
    let position = participant.waitlist_position.unwrap_or(tail);
    info!(id = participant.id, name = %participant.name, position, "Added to waitlist");
    Ok(RosterOutcome::new(
        participant,
        format!("Added to waitlist at position {}", position),
    ))
}

/// RSVP a participant OUT, promoting from the waitlist if a confirmed
/// slot opened up
pub fn rsvp_out(
    store: &mut AttendanceStore,
    name: &str,
    now: DateTime<Utc>,
) -> RosterResult<RosterOutcome> {
    let name = normalize_name(name)?;

    let Some(existing) = store.find_by_name(name).cloned() else {
        let at = store.next_timestamp(now);
        let participant = store.create(name, AttendanceStatus::Out, at);
        info!(id = participant.id, name = %participant.name, "Recorded new participant as OUT");
        return Ok(RosterOutcome::new(participant, "Marked as OUT"));
    };

    let was_confirmed = existing.is_confirmed();
    let was_waitlisted = existing.is_waitlisted();

    let participant = existing.withdrawn();
    store.put(participant.clone());
    info!(id = participant.id, name = %participant.name, was_confirmed, was_waitlisted, "Marked OUT");

    let promoted = if was_confirmed {
        waitlist::promote_from_waitlist(store)
    } else {
        if was_waitlisted {
            waitlist::recalculate_waitlist_positions(store);
        }
        None
    };

    let message = match &promoted {
        Some(p) => format!("Marked as OUT. {} promoted from waitlist!", p.name),
        None => "Marked as OUT".to_string(),
    };
    Ok(RosterOutcome::new(participant, message).with_promoted(promoted))
}
