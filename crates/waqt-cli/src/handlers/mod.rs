//! Command handlers.
//!
//! Each handler takes the composed [`CliContext`] and returns a [`CliError`]
//! that `main` maps to an exit code.

pub mod paths;
pub mod ui;

use crate::{CliContext, CliError, Commands, UiCommand};

/// Route a parsed command to its handler.
pub async fn dispatch(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Paths => paths::execute(ctx),
        Commands::Ui { command } => match command {
            UiCommand::Start { host, port } => ui::start(ctx, &host, port).await,
            UiCommand::Stop { force } => ui::stop(ctx, force).await,
            UiCommand::Status { json } => ui::status(ctx, json),
            UiCommand::Restart { host, port, force } => ui::restart(ctx, &host, port, force).await,
            UiCommand::Serve { host, port } => ui::serve(host, port).await,
        },
    }
}
