use crate::core::commands::Flow;

pub(crate) trait CommandHandler {
    /// Run one line; `Some(code)` when the session should end.
    fn handle_line(&mut self, line: &str) -> Option<i32>;
}

impl CommandHandler for super::Shell {
    fn handle_line(&mut self, line: &str) -> Option<i32> {
        match self.executor.execute_line(&mut self.session, line) {
            Ok(Flow::Continue) => None,
            Ok(Flow::Exit(code)) => Some(code),
            Err(e) => {
                self.session.diag.error(e);
                None
            }
        }
    }
}
