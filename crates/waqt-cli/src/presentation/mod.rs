//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no lifecycle decisions.

pub mod status;

pub use status::{format_uptime, render_status, status_json};
