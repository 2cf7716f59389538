use super::{Command, CommandError, Flow};
use crate::core::state::Session;

#[derive(Clone, Default)]
pub struct SetCommand;

impl Command for SetCommand {
    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn usage(&self) -> &'static str {
        "set <name> <value>"
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        session.vars.set(&args[0], &args[1]);
        Ok(Flow::Continue)
    }
}

#[derive(Clone, Default)]
pub struct UnsetCommand;

impl Command for UnsetCommand {
    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn usage(&self) -> &'static str {
        "unset <name>"
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        session.vars.unset(&args[0])?;
        Ok(Flow::Continue)
    }
}
