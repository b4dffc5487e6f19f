//! Participant record and its field transitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared intent to attend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::In => "IN",
            AttendanceStatus::Out => "OUT",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person who has RSVP'd at least once.
///
/// `waitlist_position == None` on an IN participant means *confirmed*.
/// Transitions never mutate in place: each returns the full next state so
/// the roster can stage, verify and only then commit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u64,
    pub name: String,
    #[serde(rename = "rsvp_status")]
    pub attendance_status: AttendanceStatus,
    pub rsvp_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub waitlist_position: Option<u32>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub checked_in: bool,
}

impl Participant {
    /// Fresh record as created by the first RSVP for an unseen name
    pub fn new(id: u64, name: String, status: AttendanceStatus, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            attendance_status: status,
            rsvp_timestamp: at,
            waitlist_position: None,
            paid: false,
            checked_in: false,
        }
    }

    /// IN and within capacity
    pub fn is_confirmed(&self) -> bool {
        self.attendance_status == AttendanceStatus::In && self.waitlist_position.is_none()
    }

    /// IN but holding a waitlist position
    pub fn is_waitlisted(&self) -> bool {
        self.attendance_status == AttendanceStatus::In && self.waitlist_position.is_some()
    }

    /// Label used by exports: `CONFIRMED`, `WAITLIST #n` or `OUT`
    pub fn display_status(&self) -> String {
        match (self.attendance_status, self.waitlist_position) {
            (AttendanceStatus::Out, _) => "OUT".to_string(),
            (AttendanceStatus::In, None) => "CONFIRMED".to_string(),
            (AttendanceStatus::In, Some(position)) => format!("WAITLIST #{}", position),
        }
    }

    /// RSVP IN: restamps and clears payment and check-in.
    ///
    /// Admission is decided by the roster afterwards, so the result is
    /// provisionally confirmed.
    pub fn joined(&self, at: DateTime<Utc>) -> Self {
        Self {
            attendance_status: AttendanceStatus::In,
            rsvp_timestamp: at,
            waitlist_position: None,
            paid: false,
            checked_in: false,
            ..self.clone()
        }
    }

    /// RSVP OUT: leaves the roster, keeps the record and its timestamp
    pub fn withdrawn(&self) -> Self {
        Self {
            attendance_status: AttendanceStatus::Out,
            waitlist_position: None,
            paid: false,
            checked_in: false,
            ..self.clone()
        }
    }

    pub fn confirmed(&self) -> Self {
        Self {
            waitlist_position: None,
            ..self.clone()
        }
    }

    pub fn waitlisted_at(&self, position: u32) -> Self {
        Self {
            waitlist_position: Some(position),
            ..self.clone()
        }
    }

    /// Clearing payment also clears check-in
    pub fn with_payment(&self, paid: bool) -> Self {
        Self {
            paid,
            checked_in: self.checked_in && paid,
            ..self.clone()
        }
    }

    pub fn with_check_in(&self, checked_in: bool) -> Self {
        Self {
            checked_in,
            ..self.clone()
        }
    }
}

/// Participant plus derived status flags, as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    #[serde(flatten)]
    pub participant: Participant,
    pub is_confirmed: bool,
    pub is_waitlisted: bool,
}

impl From<Participant> for ParticipantView {
    fn from(participant: Participant) -> Self {
        Self {
            is_confirmed: participant.is_confirmed(),
            is_waitlisted: participant.is_waitlisted(),
            participant,
        }
    }
}
