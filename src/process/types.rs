use std::fmt;
use std::process::ExitStatus;

/// The two output streams of a child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a run whose child exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Stdout lines in arrival order; empty unless capture was requested
    pub captured: Vec<String>,

    /// Exit code reported by the child
    pub exit_code: i32,
}

/// Exit code of a finished child.
///
/// A child killed by a signal has no code of its own; it is reported the way
/// shells do, as `128 + signal`.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    signal_code(status)
}

#[cfg(unix)]
fn signal_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .signal()
        .map(|signal| 128 + signal)
        .unwrap_or(crate::error::RUNNER_FAILURE_CODE)
}

#[cfg(not(unix))]
fn signal_code(_status: &ExitStatus) -> i32 {
    crate::error::RUNNER_FAILURE_CODE
}
