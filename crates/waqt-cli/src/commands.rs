//! Top-level commands.

use clap::Subcommand;

use crate::ui_commands::UiCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the background web UI server
    Ui {
        #[command(subcommand)]
        command: UiCommand,
    },

    /// Show resolved paths for the data directory, state file and log
    Paths,
}
