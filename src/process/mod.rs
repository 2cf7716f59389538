use std::fmt;
use std::io;

pub mod executor;
pub mod signal;

pub use executor::{Launch, ProcessExecutor};
pub use signal::Foreground;

#[derive(Debug)]
pub enum ProcessError {
    Fork(io::Error),
    Wait(io::Error),
    Flush(io::Error),
    NoSuchChild(i32),
    InvalidArgument(String),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "Fork failed: {}", e),
            ProcessError::Wait(e) => write!(f, "Wait failed: {}", e),
            ProcessError::Flush(e) => write!(f, "Flushing stdout failed: {}", e),
            ProcessError::NoSuchChild(pid) => write!(f, "child {} not found", pid),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

impl From<ctrlc::Error> for ProcessError {
    fn from(err: ctrlc::Error) -> Self {
        ProcessError::SignalError(err.to_string())
    }
}

/// Block until `pid` changes state; `-1` waits for any child.
///
/// Returns the reaped pid and its raw wait status.
pub fn wait_pid(pid: i32) -> Result<(i32, i32), ProcessError> {
    let mut status: libc::c_int = 0;
    loop {
        let reaped = unsafe { libc::waitpid(pid, &mut status, 0) };
        if reaped >= 0 {
            return Ok((reaped, status));
        }
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EINTR) => continue,
            Some(libc::ECHILD) => return Err(ProcessError::NoSuchChild(pid)),
            _ => return Err(ProcessError::Wait(err)),
        }
    }
}
