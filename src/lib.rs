//! RSVP Roster
//!
//! Attendance tracking for a fixed-capacity recurring event. Participants
//! RSVP IN or OUT; the first `capacity` IN declarations are confirmed and
//! later ones queue on a FIFO waitlist. When a confirmed participant
//! withdraws or is deleted, the head of the waitlist is promoted and the
//! rest renumbered. On game day, confirmed participants who have paid may
//! check in.
//!
//! # Modules
//!
//! - `types`: Participant record, result views, error type
//! - `store`: Participant table and JSONL persistence
//! - `roster`: RSVP state machine, waitlist, check-in gate
//! - `api`: Axum HTTP transport
//! - `config`: Environment configuration
//! - `utils`: Atomic file writes
//!
//! # Concurrency
//!
//! Every mutating [`Roster`] operation runs under one lock as a single
//! stage-verify-persist-commit transaction, so concurrent RSVPs can never
//! confirm more than `capacity` participants.
//!
//! # Example
//!
//! ```
//! use rsvp_roster::Roster;
//!
//! let roster = Roster::new(2);
//! roster.rsvp_in("Alice").unwrap();
//! roster.rsvp_in("Bob").unwrap();
//! let carol = roster.rsvp_in("Carol").unwrap();
//! assert_eq!(carol.participant.waitlist_position, Some(1));
//!
//! let out = roster.rsvp_out("alice").unwrap();
//! assert_eq!(out.promoted.unwrap().name, "Carol");
//! ```

pub mod api;
pub mod config;
pub mod roster;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::RosterConfig;
pub use roster::Roster;
pub use types::{
    AttendanceStatus, CategorizedRoster, CheckInStats, ErrorKind, ExportRow, Participant,
    ParticipantView, RosterError, RosterOutcome, RosterResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
