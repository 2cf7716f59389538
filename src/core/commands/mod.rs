use std::collections::BTreeMap;
use std::sync::Arc;

mod chdir;
mod exit;
mod export;
mod set;
mod show;
mod wait;

pub use chdir::ChdirCommand;
pub use exit::ExitCommand;
pub use export::{ExportCommand, UnexportCommand};
pub use set::{SetCommand, UnsetCommand};
pub use show::ShowCommand;
pub use wait::WaitCommand;

use crate::core::env::EnvError;
use crate::core::line::{extract, resolve, tokenize};
use crate::core::state::Session;
use crate::process::{Foreground, Launch, ProcessError, ProcessExecutor};

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    InvalidArguments(String),
    IoError(std::io::Error),
    EnvError(EnvError),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(name) => write!(f, "{} not found", name),
            CommandError::InvalidArguments(usage) => {
                write!(f, "Incorrect number of arguments. Usage: {}", usage)
            }
            CommandError::IoError(err) => write!(f, "Error: {}", err),
            CommandError::EnvError(err) => write!(f, "{}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        match err {
            EnvError::VarNotFound(name) => CommandError::NotFound(name),
            other => CommandError::EnvError(other),
        }
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// What the read loop does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

pub trait Command {
    /// Exact number of arguments after the command name, if fixed.
    fn arity(&self) -> Option<usize>;

    fn usage(&self) -> &'static str;

    /// Whether `$name` arguments are substituted before `execute`.
    fn resolves_args(&self) -> bool {
        true
    }

    /// Whether `-x` echoes this command.
    fn echoes(&self) -> bool {
        true
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Show(ShowCommand),
    Set(SetCommand),
    Unset(UnsetCommand),
    Export(ExportCommand),
    Unexport(UnexportCommand),
    Chdir(ChdirCommand),
    Exit(ExitCommand),
    Wait(WaitCommand),
}

impl CommandType {
    fn inner(&self) -> &dyn Command {
        match self {
            CommandType::Show(cmd) => cmd,
            CommandType::Set(cmd) => cmd,
            CommandType::Unset(cmd) => cmd,
            CommandType::Export(cmd) => cmd,
            CommandType::Unexport(cmd) => cmd,
            CommandType::Chdir(cmd) => cmd,
            CommandType::Exit(cmd) => cmd,
            CommandType::Wait(cmd) => cmd,
        }
    }
}

/// Per-line driver: tokenize, resolve, then run a built-in or launch an
/// external program.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
    process_executor: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new(foreground: Arc<Foreground>) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("show".to_string(), CommandType::Show(ShowCommand));
        commands.insert("set".to_string(), CommandType::Set(SetCommand));
        commands.insert("unset".to_string(), CommandType::Unset(UnsetCommand));
        commands.insert("export".to_string(), CommandType::Export(ExportCommand));
        commands.insert("unexport".to_string(), CommandType::Unexport(UnexportCommand));
        commands.insert("chdir".to_string(), CommandType::Chdir(ChdirCommand));
        commands.insert("exit".to_string(), CommandType::Exit(ExitCommand));
        commands.insert("wait".to_string(), CommandType::Wait(WaitCommand));

        Self {
            commands,
            process_executor: ProcessExecutor::new(foreground),
        }
    }

    /// Run one input line. The line's tokens are dropped on return,
    /// whichever path it takes.
    pub fn execute_line(&self, session: &mut Session, line: &str) -> Result<Flow, CommandError> {
        if line.trim_end_matches(['\n', '\r']).is_empty() {
            return Ok(Flow::Continue);
        }

        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        session.diag.trace(format_args!("args: {:?}", tokens));

        match self.commands.get(tokens[0].as_str()) {
            Some(cmd) => self.run_builtin(cmd.inner(), session, tokens),
            None => self.run_external(session, tokens),
        }
    }

    fn run_builtin(
        &self,
        cmd: &dyn Command,
        session: &mut Session,
        mut tokens: Vec<String>,
    ) -> Result<Flow, CommandError> {
        session.diag.trace(format_args!("built-in: {}", tokens[0]));
        if let Some(arity) = cmd.arity() {
            if tokens.len() != arity + 1 {
                return Err(CommandError::InvalidArguments(cmd.usage().to_string()));
            }
        }

        if cmd.resolves_args() {
            substitute(session, &mut tokens);
        }
        if session.echo && cmd.echoes() {
            println!("{}", tokens.join(" "));
        }

        cmd.execute(session, &tokens[1..])
    }

    fn run_external(&self, session: &mut Session, mut tokens: Vec<String>) -> Result<Flow, CommandError> {
        substitute(session, &mut tokens);
        let extracted = extract(tokens);
        session
            .diag
            .trace(format_args!("launch: {:?} {:?}", extracted.argv, extracted.plan));

        match self.process_executor.launch(&extracted, &mut session.vars)? {
            Launch::Foreground { pid, status } => session
                .diag
                .trace(format_args!("child {} is done. Status: {}", pid, status)),
            Launch::Background { pid } => {
                session.diag.trace(format_args!("child {} in background", pid))
            }
        }
        Ok(Flow::Continue)
    }
}

fn substitute(session: &Session, tokens: &mut [String]) {
    for missing in resolve(tokens, &session.vars) {
        session.diag.trace(format_args!("{} not found", missing));
    }
}

/// Leading integer of `text`, or 0 when there is none.
pub(crate) fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| (sign * n) as i32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trace::Diagnostics;

    fn setup_test_env() -> (CommandExecutor, Session) {
        let session = Session::new(false, Diagnostics::silent());
        let executor = CommandExecutor::new(session.foreground.clone());
        (executor, session)
    }

    #[test]
    fn test_builtin_command_detection() {
        let (executor, _) = setup_test_env();
        for name in ["show", "set", "unset", "export", "unexport", "chdir", "exit", "wait"] {
            assert!(executor.commands.contains_key(name));
        }
        assert!(!executor.commands.contains_key("cd"));
        assert!(!executor.commands.contains_key(""));
    }

    #[test]
    fn test_blank_and_comment_lines_do_nothing() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        let before = session.vars.slots().to_vec();

        assert_eq!(executor.execute_line(&mut session, "\n")?, Flow::Continue);
        assert_eq!(executor.execute_line(&mut session, "")?, Flow::Continue);
        assert_eq!(executor.execute_line(&mut session, "   \t\n")?, Flow::Continue);
        assert_eq!(executor.execute_line(&mut session, "# set a b\n")?, Flow::Continue);
        assert_eq!(session.vars.slots(), before.as_slice());
        Ok(())
    }

    #[test]
    fn test_set_then_lookup() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        executor.execute_line(&mut session, "set greeting hello\n")?;
        assert_eq!(session.vars.local("greeting"), Some("hello"));
        Ok(())
    }

    #[test]
    fn test_builtin_arguments_are_resolved() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        executor.execute_line(&mut session, "set name target\n")?;
        executor.execute_line(&mut session, "set $name value\n")?;
        assert_eq!(session.vars.local("target"), Some("value"));
        Ok(())
    }

    #[test]
    fn test_wrong_arity_is_usage_error() {
        let (executor, mut session) = setup_test_env();
        for line in ["set a\n", "set a b c\n", "unset\n", "export X\n", "chdir\n", "exit\n", "wait 1 2\n"] {
            assert!(
                matches!(
                    executor.execute_line(&mut session, line),
                    Err(CommandError::InvalidArguments(_))
                ),
                "{:?} should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_unset_missing_is_not_found() {
        let (executor, mut session) = setup_test_env();
        let result = executor.execute_line(&mut session, "unset nothing_here\n");
        assert!(matches!(result, Err(CommandError::NotFound(name)) if name == "nothing_here"));
    }

    #[test]
    fn test_exit_returns_code() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        assert_eq!(executor.execute_line(&mut session, "exit 3\n")?, Flow::Exit(3));

        session.vars.set("code", "7");
        assert_eq!(executor.execute_line(&mut session, "exit $code\n")?, Flow::Exit(7));
        Ok(())
    }

    #[test]
    fn test_external_sets_status() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        executor.execute_line(&mut session, "false\n")?;
        assert_eq!(session.vars.local("?"), Some("256"));

        executor.execute_line(&mut session, "true # ignored\n")?;
        assert_eq!(session.vars.local("?"), Some("0"));
        Ok(())
    }

    #[test]
    fn test_external_program_from_variable() -> Result<(), CommandError> {
        let (executor, mut session) = setup_test_env();
        session.vars.set("prog", "false");
        executor.execute_line(&mut session, "$prog\n")?;
        assert_eq!(session.vars.local("?"), Some("256"));
        Ok(())
    }

    #[test]
    fn test_parse_int_is_lenient() {
        assert_eq!(parse_int("3"), 3);
        assert_eq!(parse_int("-1"), -1);
        assert_eq!(parse_int("+12"), 12);
        assert_eq!(parse_int("42abc"), 42);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::NotFound("$x".to_string()),
            CommandError::InvalidArguments("set <name> <value>".to_string()),
            CommandError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "io error")),
            CommandError::EnvError(EnvError::InvalidName("A=B".to_string())),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
