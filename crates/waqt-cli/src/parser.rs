//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;
use waqt_core::DATA_DIR_ENV;

use crate::commands::Commands;

/// Command-line interface for the waqt time tracker.
#[derive(Parser)]
#[command(name = "waqt")]
#[command(about = "Track your working time")]
#[command(version)]
pub struct Cli {
    /// Override the data directory (state file and logs)
    #[arg(long = "data-dir", global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// True when this invocation is the spawned foreground server.
    pub const fn is_serving(&self) -> bool {
        matches!(
            self.command,
            Some(Commands::Ui {
                command: crate::UiCommand::Serve { .. }
            })
        )
    }
}
