//! Tracing subscriber setup.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::Cli;

/// How this invocation logs to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub default_level: &'static str,
    /// Colour escapes; off whenever stderr is not a terminal.
    pub ansi: bool,
}

impl LogSettings {
    /// `warn` normally, `debug` with `--verbose`, `info` for the foreground
    /// server so its log file shows startup and shutdown.
    ///
    /// The server's stderr is the `ui.log` file, so it never gets colour.
    pub const fn for_cli(cli: &Cli, stderr_is_terminal: bool) -> Self {
        let serving = cli.is_serving();
        let default_level = if cli.verbose {
            "debug"
        } else if serving {
            "info"
        } else {
            "warn"
        };

        Self {
            default_level,
            ansi: stderr_is_terminal && !serving,
        }
    }

    /// Install the global subscriber.
    pub fn init(self) {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_level));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(self.ansi) // No ANSI colors in log files
            .init();
    }
}

/// Install logging for `cli`, checking whether stderr is a terminal.
pub fn init_tracing(cli: &Cli) {
    LogSettings::for_cli(cli, std::io::stderr().is_terminal()).init();
}
