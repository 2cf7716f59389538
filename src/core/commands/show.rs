use super::{Command, CommandError, Flow};
use crate::core::env::VarStore;
use crate::core::line::SIGIL;
use crate::core::state::Session;

/// `show <token>...`: prints literals as written and `$name` tokens as
/// their values. Reads the raw tokens and never mutates state.
#[derive(Clone, Default)]
pub struct ShowCommand;

impl ShowCommand {
    pub fn render(vars: &VarStore, args: &[String]) -> String {
        args.iter()
            .map(|arg| match arg.strip_prefix(SIGIL) {
                Some(name) => match vars.lookup(name) {
                    Some(value) => value.into_owned(),
                    None => format!("{} not found", arg),
                },
                None => arg.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Command for ShowCommand {
    fn arity(&self) -> Option<usize> {
        None
    }

    fn usage(&self) -> &'static str {
        "show <token>..."
    }

    fn resolves_args(&self) -> bool {
        false
    }

    fn echoes(&self) -> bool {
        false
    }

    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        println!("{}", Self::render(&session.vars, args));
        Ok(Flow::Continue)
    }
}
