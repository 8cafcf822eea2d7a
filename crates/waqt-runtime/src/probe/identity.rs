//! What makes a process recognisable as our UI server.

use std::path::{Path, PathBuf};

/// Identity of the launched UI server, checked by the rich inspector.
///
/// - `executable`: the binary the launcher runs; compared by canonical path
/// - `args`: argument sequence that must appear contiguously in the command line
/// - `token`: substring matched against the name or arguments, used only
///   when no executable is configured or the process executable cannot be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    token: String,
    executable: Option<PathBuf>,
    args: Vec<String>,
}

impl ServerIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            executable: None,
            args: Vec::new(),
        }
    }

    /// Require the process to run this binary. Stored canonicalized when the
    /// path resolves.
    #[must_use]
    pub fn with_executable(mut self, executable: impl AsRef<Path>) -> Self {
        let path = executable.as_ref();
        self.executable = Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));
        self
    }

    /// Require these arguments, in order and adjacent, somewhere in the command line.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether `cmd` contains the required argument sequence.
    pub fn args_match<S: AsRef<str>>(&self, cmd: &[S]) -> bool {
        if self.args.is_empty() {
            return true;
        }
        cmd.windows(self.args.len()).any(|window| {
            window
                .iter()
                .zip(&self.args)
                .all(|(actual, expected)| actual.as_ref() == expected)
        })
    }

    /// Whether the process executable at `actual` is the configured one.
    ///
    /// `None` when no executable is configured.
    pub fn executable_matches(&self, actual: &Path) -> Option<bool> {
        let expected = self.executable.as_deref()?;
        let actual = actual.canonicalize().unwrap_or_else(|_| actual.to_path_buf());
        Some(actual == expected)
    }

    /// Fallback substring check on the process name or any argument.
    pub fn token_matches<S: AsRef<str>>(&self, name: &str, cmd: &[S]) -> bool {
        !self.token.is_empty()
            && (name.contains(&self.token) || cmd.iter().any(|arg| arg.as_ref().contains(&self.token)))
    }
}
