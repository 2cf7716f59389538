use std::io::Write;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::process::ProcessError;
use crate::shell::PROMPT;

const NO_PID: i32 = -1;

/// The one piece of state shared with the interrupt path: the pid of the
/// child the shell is blocked on, and a count of interrupts seen so far.
#[derive(Debug)]
pub struct Foreground {
    pid: AtomicI32,
    interrupts: AtomicUsize,
}

impl Default for Foreground {
    fn default() -> Self {
        Self::new()
    }
}

impl Foreground {
    pub fn new() -> Self {
        Self {
            pid: AtomicI32::new(NO_PID),
            interrupts: AtomicUsize::new(0),
        }
    }

    pub fn track(&self, pid: i32) {
        self.pid.store(pid, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.pid.store(NO_PID, Ordering::SeqCst);
    }

    pub fn current(&self) -> Option<i32> {
        let pid = self.pid.load(Ordering::SeqCst);
        (pid > 0).then_some(pid)
    }

    pub fn interrupts(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    /// Count an interrupt and SIGKILL the tracked child, if any.
    pub fn interrupt(&self) -> Option<i32> {
        self.interrupts.fetch_add(1, Ordering::SeqCst);
        let pid = self.current()?;
        kill(pid);
        Some(pid)
    }
}

pub(crate) fn kill(pid: i32) {
    unsafe {
        libc::kill(pid, libc::SIGKILL);
    }
}

/// Route SIGINT to `foreground`. The handler runs on ctrlc's own thread,
/// so it never touches anything but the atomics and stdout.
pub fn setup_signal_handlers(foreground: Arc<Foreground>, echo: bool) -> Result<(), ProcessError> {
    ctrlc::set_handler(move || {
        let killed = foreground.interrupt();
        let mut out = std::io::stdout().lock();
        if echo {
            let _ = write!(out, "Ctrl-C");
        }
        // a killed child returns control to the loop, which prompts again
        let _ = match killed {
            Some(_) => writeln!(out),
            None => write!(out, "\n{}", PROMPT),
        };
        let _ = out.flush();
    })?;
    Ok(())
}
