//! Promotion and waitlist renumbering

use tracing::{debug, info};

use super::ordering::{by_rsvp_order, by_waitlist_position};
use crate::store::AttendanceStore;
use crate::types::Participant;

/// Confirm the participant holding the lowest waitlist position, then
/// renumber the rest. Callers must have a free slot.
pub fn promote_from_waitlist(store: &mut AttendanceStore) -> Option<Participant> {
    let next = store
        .iter()
        .filter(|p| p.is_waitlisted())
        .min_by(|a, b| by_waitlist_position(a, b))?
        .clone();

    let promoted = next.confirmed();
    store.put(promoted.clone());
    recalculate_waitlist_positions(store);

    info!(
        id = promoted.id,
        name = %promoted.name,
        from_position = next.waitlist_position.unwrap_or_default(),
        "Promoted from waitlist"
    );
    Some(promoted)
}

/// Reassign positions 1..K to waitlisted participants in RSVP order.
///
/// Positions are always derived from timestamps, never patched. Returns K.
pub fn recalculate_waitlist_positions(store: &mut AttendanceStore) -> usize {
    let mut waitlisted: Vec<Participant> = store
        .iter()
        .filter(|p| p.is_waitlisted())
        .cloned()
        .collect();
    waitlisted.sort_by(by_rsvp_order);

    let total = waitlisted.len();
    let mut moved = 0;
    for (index, participant) in waitlisted.into_iter().enumerate() {
        let position = index as u32 + 1;
        if participant.waitlist_position != Some(position) {
            store.put(participant.waitlisted_at(position));
            moved += 1;
        }
    }

    if moved > 0 {
        debug!(waitlisted = total, moved, "Renumbered waitlist");
    }
    total
}
