use super::{Command, CommandError, Flow};
use crate::core::state::Session;
use std::env;

#[derive(Clone, Default)]
pub struct ChdirCommand;

impl Command for ChdirCommand {
    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn usage(&self) -> &'static str {
        "chdir <path>"
    }

    fn execute(&self, _session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        env::set_current_dir(&args[0])?;
        Ok(Flow::Continue)
    }
}
