//! CLI entry point.
//!
//! Parses arguments, composes the context via bootstrap, and maps handler
//! errors to exit codes.

use clap::{CommandFactory, Parser};
use waqt_cli::{Cli, CliConfig, bootstrap, handlers, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::with_defaults(cli.data_dir)?;
    let ctx = bootstrap(config);

    if let Err(e) = handlers::dispatch(&ctx, command).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
