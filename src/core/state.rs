use std::sync::Arc;

use super::env::VarStore;
use super::trace::Diagnostics;
use crate::process::Foreground;

/// Per-session state threaded through the dispatcher and every built-in.
pub struct Session {
    pub vars: VarStore,
    /// `-x`: echo built-ins before running them.
    pub echo: bool,
    pub diag: Diagnostics,
    pub foreground: Arc<Foreground>,
}

impl Session {
    pub fn new(echo: bool, diag: Diagnostics) -> Self {
        Self {
            vars: VarStore::with_builtins(std::process::id()),
            echo,
            diag,
            foreground: Arc::new(Foreground::new()),
        }
    }

    /// Bind script arguments to `$1`, `$2`, ...
    pub fn set_positional(&mut self, args: &[String]) {
        for (idx, arg) in args.iter().enumerate() {
            self.vars.set(&(idx + 1).to_string(), arg);
        }
    }
}
