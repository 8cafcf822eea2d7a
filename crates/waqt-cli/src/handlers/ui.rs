//! `waqt ui` handlers.

use chrono::Utc;
use tracing::debug;
use waqt_axum::ServerConfig;
use waqt_runtime::{StartOutcome, StopOutcome};

use crate::presentation::{render_status, status_json};
use crate::{CliContext, CliError};

/// Launch the background server.
pub async fn start(ctx: &CliContext, host: &str, port: u16) -> Result<(), CliError> {
    let outcome = ctx.manager().start(host, port).await?;
    print_started(&outcome);
    Ok(())
}

/// Stop the background server.
pub async fn stop(ctx: &CliContext, force: bool) -> Result<(), CliError> {
    let outcome = ctx.manager().stop(force).await?;
    print_stopped(&outcome);
    Ok(())
}

/// Report server status. Never fails on a stopped or stale server.
pub fn status(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let status = ctx.manager().status();
    let log_path = ctx.paths().ui_log_file();
    let now = Utc::now();

    if json {
        let value = status_json(&status, &log_path, now)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render_status(&status, &log_path, now));
    }
    Ok(())
}

/// Stop (when running) and start again.
pub async fn restart(ctx: &CliContext, host: &str, port: u16, force: bool) -> Result<(), CliError> {
    let outcome = ctx.manager().restart(host, port, force).await?;
    print_started(&outcome);
    Ok(())
}

/// Run the web server in the foreground. This is what `start` spawns.
pub async fn serve(host: String, port: u16) -> Result<(), CliError> {
    debug!(host, port, "Serving web UI in the foreground");
    waqt_axum::start_server(ServerConfig::new(host, port))
        .await
        .map_err(CliError::Server)
}

fn print_started(outcome: &StartOutcome) {
    println!("UI server started (PID {})", outcome.pid);
    println!("  URL: http://{}:{}", outcome.host, outcome.port);
    println!("  Log: {}", outcome.log_path.display());
    if let Some(warning) = &outcome.warning {
        eprintln!("Warning: {warning}");
    }
}

fn print_stopped(outcome: &StopOutcome) {
    if outcome.forced {
        println!("UI server killed (PID {})", outcome.pid);
    } else {
        println!("UI server stopped (PID {})", outcome.pid);
    }
}
