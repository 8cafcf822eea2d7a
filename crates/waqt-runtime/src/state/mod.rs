//! State file management for tracking the background UI server.
//!
//! # Safety guarantees
//! - Atomic writes via temp file + rename
//! - Reads never fail: a missing or corrupt record reads as "no record"
//! - Deletes are idempotent

mod store;

pub use store::StateStore;
