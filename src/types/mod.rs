//! Data types for the RSVP roster
//!
//! This module contains the participant record, the views built from the
//! roster, and the error type shared by every operation.

mod error;
mod outcome;
mod participant;
mod summary;

pub use error::{ErrorKind, RosterError, RosterResult};
pub use outcome::{Deletion, Reset, RosterOutcome};
pub use participant::{AttendanceStatus, Participant, ParticipantView};
pub use summary::{CategorizedRoster, CheckInStats, ExportRow};
