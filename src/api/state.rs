//! Shared application state

use std::sync::Arc;

use crate::roster::Roster;

/// State shared by every request handler
pub struct AppState {
    /// The roster
    pub roster: Arc<Roster>,

    /// Origins allowed by CORS; empty allows any
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(roster: Arc<Roster>) -> Self {
        Self {
            roster,
            allowed_origins: Vec::new(),
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}
