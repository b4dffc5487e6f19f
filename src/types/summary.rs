//! Read-side views of the roster

use serde::Serialize;

use super::Participant;

/// Participants split into confirmed, waitlist and out, from one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedRoster {
    /// Ascending by RSVP time
    pub confirmed: Vec<Participant>,
    /// Ascending by waitlist position
    pub waitlist: Vec<Participant>,
    /// Ascending by name
    pub out: Vec<Participant>,
    pub total_confirmed: usize,
    pub total_waitlist: usize,
    pub spots_available: usize,
}

/// Game-day check-in counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInStats {
    pub total_confirmed: usize,
    pub total_paid: usize,
    pub total_checked_in: usize,
    pub awaiting_payment: usize,
    pub awaiting_check_in: usize,
}

/// One row of the export snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub id: u64,
    pub name: String,
    pub rsvp_status: String,
    pub display_status: String,
    /// `%Y-%m-%d %H:%M:%S`, UTC
    pub rsvp_timestamp: String,
    pub waitlist_position: Option<u32>,
    pub paid: bool,
    pub checked_in: bool,
}

impl From<&Participant> for ExportRow {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            rsvp_status: p.attendance_status.to_string(),
            display_status: p.display_status(),
            rsvp_timestamp: p.rsvp_timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            waitlist_position: p.waitlist_position,
            paid: p.paid,
            checked_in: p.checked_in,
        }
    }
}
