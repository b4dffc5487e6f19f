//! Utility functions and helpers

pub mod atomic;

pub use atomic::{atomic_write_with, remove_stale_temp};
