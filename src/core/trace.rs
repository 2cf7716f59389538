use std::fmt::Display;

use crate::highlight::Highlighter;

pub const DEFAULT_LEVEL: i32 = 1;

/// Debug trace output on stderr, silenced at level 0.
///
/// User-facing errors do not go through here; they are always shown.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    level: i32,
    highlighter: Highlighter,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl Diagnostics {
    pub fn new(level: i32) -> Self {
        Self {
            level,
            highlighter: Highlighter::new(),
        }
    }

    pub fn silent() -> Self {
        Self {
            level: 0,
            highlighter: Highlighter::plain(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.level != 0
    }

    pub fn trace(&self, message: impl Display) {
        if self.enabled() {
            eprintln!("{}", self.highlighter.hint(&message.to_string()));
        }
    }

    pub fn error(&self, message: impl Display) {
        eprintln!("{}", self.highlighter.error(&message.to_string()));
    }
}
