mod executor;

use crate::{
    core::{commands::CommandExecutor, state::Session, trace::Diagnostics},
    error::ShellError,
    flags::Flags,
    input::{Interactive, LineReader, ScriptReader},
    process::signal,
};

use executor::CommandHandler;

pub const PROMPT: &str = ">> ";

pub struct Shell {
    pub(crate) session: Session,
    pub(crate) executor: CommandExecutor,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let diag = Diagnostics::new(flags.debug_level());
        let mut session = Session::new(flags.is_set("echo"), diag);
        session.set_positional(flags.script_args());

        signal::setup_signal_handlers(session.foreground.clone(), session.echo)?;
        let executor = CommandExecutor::new(session.foreground.clone());

        diag.trace(format_args!("debug level: {}", flags.debug_level()));

        Ok(Shell {
            session,
            executor,
            flags,
        })
    }

    /// Run the `-f` script, then interactive input. Returns the code the
    /// process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if let Some(path) = self.flags.get_value("file").cloned() {
            let mut script = ScriptReader::open(&path)?;
            self.session
                .diag
                .trace(format_args!("running {}", script.path().display()));
            if let Some(code) = self.feed(&mut script)? {
                return Ok(code);
            }
        }

        let mut input = Interactive::open()?;
        match self.feed(&mut input)? {
            Some(code) => Ok(code),
            None => Err(ShellError::InputClosed),
        }
    }

    /// Dispatch every line from `reader`. `Some(code)` when a line asked
    /// to exit, `None` once the reader runs dry.
    fn feed(&mut self, reader: &mut dyn LineReader) -> Result<Option<i32>, ShellError> {
        while let Some(line) = reader.read_line()? {
            if let Some(code) = self.handle_line(&line) {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }
}
