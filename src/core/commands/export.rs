use super::{Command, CommandError, Flow};
use crate::core::state::Session;

/// `export <name> <value>`: writes straight to the process environment;
/// the session-local tier is left alone.
#[derive(Clone, Default)]
pub struct ExportCommand;

impl Command for ExportCommand {
    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn usage(&self) -> &'static str {
        "export <name> <value>"
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        session.vars.export(&args[0], &args[1])?;
        Ok(Flow::Continue)
    }
}

#[derive(Clone, Default)]
pub struct UnexportCommand;

impl Command for UnexportCommand {
    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn usage(&self) -> &'static str {
        "unexport <name>"
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        session.vars.unexport(&args[0])?;
        Ok(Flow::Continue)
    }
}
