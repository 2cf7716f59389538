use super::{parse_int, Command, CommandError, Flow};
use crate::core::state::Session;

/// `exit <code>`: hands the code back to the read loop, which tears the
/// session down before the process exits.
#[derive(Clone, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn usage(&self) -> &'static str {
        "exit <code>"
    }

    fn execute(&self, _session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        Ok(Flow::Exit(parse_int(&args[0])))
    }
}
