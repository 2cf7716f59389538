use std::path::PathBuf;

use crate::process::ProcessError;

/// Errors that end the session. Per-line failures are
/// [`CommandError`](crate::core::commands::CommandError)s and never get
/// this far.
#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    Script { path: PathBuf, source: std::io::Error },
    InputClosed,
    ProcessError(ProcessError),
    FlagError(String),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Script { path, source } => {
                write!(f, "Error opening file {}: {}", path.display(), source)
            }
            ShellError::InputClosed => write!(f, "Error: end of input"),
            ShellError::ProcessError(e) => write!(f, "Process error: {}", e),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
