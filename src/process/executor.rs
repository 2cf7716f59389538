use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::Arc;

use super::{signal, wait_pid, Foreground, ProcessError};
use crate::core::env::VarStore;
use crate::core::line::{Extracted, RedirectPlan};

/// Child exit code when a redirection file cannot be opened.
pub const REDIRECT_FAILURE: i32 = 1;
/// Child exit code when the program cannot be found.
pub const NOT_FOUND_FAILURE: i32 = 127;
/// Child exit code for any other exec failure.
pub const EXEC_FAILURE: i32 = 126;

const OUTPUT_MODE: libc::c_uint = 0o600;

/// What the parent got back from a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Waited for; raw wait status.
    Foreground { pid: i32, status: i32 },
    Background { pid: i32 },
}

/// argv for `execvp`: owned C strings plus the NULL-terminated pointer array.
struct CStringVec {
    _strings: Vec<CString>,
    ptrs: Vec<*const libc::c_char>,
}

impl CStringVec {
    fn from_args(args: &[String]) -> Result<Self, ProcessError> {
        let strings = args
            .iter()
            .map(|arg| {
                CString::new(arg.as_str())
                    .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut ptrs: Vec<*const libc::c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(std::ptr::null());
        Ok(Self {
            _strings: strings,
            ptrs,
        })
    }

    fn program(&self) -> *const libc::c_char {
        self.ptrs[0]
    }

    fn as_ptr(&self) -> *const *const libc::c_char {
        self.ptrs.as_ptr()
    }
}

/// Everything the child needs, converted before `fork` so the child only
/// makes async-signal-safe calls.
struct ChildSetup {
    argv: CStringVec,
    input: Option<CString>,
    output: Option<CString>,
    background: bool,
}

impl ChildSetup {
    fn new(extracted: &Extracted) -> Result<Self, ProcessError> {
        let RedirectPlan {
            input,
            output,
            background,
        } = &extracted.plan;
        Ok(Self {
            argv: CStringVec::from_args(&extracted.argv)?,
            input: input.as_deref().map(path_to_cstring).transpose()?,
            output: output.as_deref().map(path_to_cstring).transpose()?,
            background: *background,
        })
    }

    /// Runs in the forked child. Never returns.
    unsafe fn exec(&self) -> ! {
        if self.background {
            libc::setpgid(0, 0);
        }
        if let Some(path) = &self.input {
            redirect(libc::open(path.as_ptr(), libc::O_RDONLY), libc::STDIN_FILENO);
        }
        if let Some(path) = &self.output {
            redirect(
                libc::open(path.as_ptr(), libc::O_RDWR | libc::O_CREAT, OUTPUT_MODE),
                libc::STDOUT_FILENO,
            );
        }

        libc::execvp(self.argv.program(), self.argv.as_ptr());

        let code = match io::Error::last_os_error().raw_os_error() {
            Some(libc::ENOENT) | Some(libc::ENOTDIR) => NOT_FOUND_FAILURE,
            _ => EXEC_FAILURE,
        };
        die(code)
    }
}

unsafe fn redirect(fd: libc::c_int, target: libc::c_int) {
    if fd == -1 {
        die(REDIRECT_FAILURE);
    }
    if libc::dup2(fd, target) == -1 {
        die(REDIRECT_FAILURE);
    }
    libc::close(fd);
}

/// Print `Error: <strerror(errno)>` to stderr and `_exit`.
unsafe fn die(code: i32) -> ! {
    let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
    let reason = CStr::from_ptr(libc::strerror(errno)).to_bytes();
    for chunk in [b"Error: ".as_slice(), reason, b"\n".as_slice()] {
        libc::write(libc::STDERR_FILENO, chunk.as_ptr().cast(), chunk.len());
    }
    libc::_exit(code)
}

fn path_to_cstring(path: &Path) -> Result<CString, ProcessError> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| ProcessError::InvalidArgument(path.to_string_lossy().into_owned()))
}

/// Forks and execs external commands, recording `$?` and `$!`.
#[derive(Clone)]
pub struct ProcessExecutor {
    foreground: Arc<Foreground>,
}

impl ProcessExecutor {
    pub fn new(foreground: Arc<Foreground>) -> Self {
        Self { foreground }
    }

    pub fn launch(&self, extracted: &Extracted, vars: &mut VarStore) -> Result<Launch, ProcessError> {
        let setup = ChildSetup::new(extracted)?;
        io::stdout().flush().map_err(ProcessError::Flush)?;

        let seen = self.foreground.interrupts();
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => unsafe { setup.exec() },
            pid if setup.background => {
                vars.set("!", &pid.to_string());
                Ok(Launch::Background { pid })
            }
            pid => self.supervise(pid, seen, vars),
        }
    }

    /// Publish `pid` as the foreground child and wait for it. `seen` is
    /// the interrupt count sampled before `fork`; if it moved, the
    /// interrupt arrived before the pid was visible and the child is
    /// killed here.
    fn supervise(&self, pid: i32, seen: usize, vars: &mut VarStore) -> Result<Launch, ProcessError> {
        self.foreground.track(pid);
        if self.foreground.interrupts() != seen {
            signal::kill(pid);
        }
        let waited = wait_pid(pid);
        self.foreground.clear();

        let (_, status) = waited?;
        vars.set("?", &status.to_string());
        Ok(Launch::Foreground { pid, status })
    }
}
