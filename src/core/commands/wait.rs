use super::{parse_int, Command, CommandError, Flow};
use crate::core::state::Session;
use crate::process::wait_pid;

/// `wait <pid>`: block until that child exits; `-1` means any child.
#[derive(Clone, Default)]
pub struct WaitCommand;

impl Command for WaitCommand {
    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn usage(&self) -> &'static str {
        "wait <pid>"
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        let (pid, status) = wait_pid(parse_int(&args[0]))?;
        session
            .diag
            .trace(format_args!("child {} is done. Status: {}", pid, status));
        Ok(Flow::Continue)
    }
}
