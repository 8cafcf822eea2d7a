//! Paths command handler.
//!
//! Displays the resolved data directory, state file and log file in
//! `key = value` format.

use crate::{CliContext, CliError};

/// Execute the paths command.
pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    println!("{}", ctx.paths());
    Ok(())
}
