//! Domain types for the managed UI server.

mod server_state;

pub use server_state::{ManagedProcessState, ServerStatus};
