//! API module for HTTP endpoints
//!
//! Thin axum transport over [`crate::roster::Roster`]. Handlers hold no
//! roster logic; they translate requests and map error kinds to statuses.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
