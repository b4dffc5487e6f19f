//! Results returned by roster operations

use super::Participant;

/// Result of an operation on a single participant
#[derive(Debug, Clone)]
pub struct RosterOutcome {
    pub participant: Participant,
    pub message: String,
    /// Participant moved off the waitlist as a side effect, if any
    pub promoted: Option<Participant>,
}

impl RosterOutcome {
    pub fn new(participant: Participant, message: impl Into<String>) -> Self {
        Self {
            participant,
            message: message.into(),
            promoted: None,
        }
    }

    pub fn with_promoted(mut self, promoted: Option<Participant>) -> Self {
        self.promoted = promoted;
        self
    }
}

/// Result of an explicit participant deletion
#[derive(Debug, Clone)]
pub struct Deletion {
    pub removed: Participant,
    pub promoted: Option<Participant>,
    pub message: String,
}

/// Result of a full reset
#[derive(Debug, Clone)]
pub struct Reset {
    pub removed: usize,
    pub message: String,
}
