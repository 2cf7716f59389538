use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};

use super::LineReader;
use crate::error::ShellError;
use crate::shell::PROMPT;

const HISTORY_FILE: &str = ".xssh_history";

/// Interactive input: a rustyline editor on a terminal, plain stdin
/// otherwise. Both print [`PROMPT`] before every line.
pub enum Interactive {
    Editor {
        editor: DefaultEditor,
        history: Option<PathBuf>,
    },
    Piped(io::StdinLock<'static>),
}

impl Interactive {
    pub fn open() -> Result<Self, ShellError> {
        if !io::stdin().is_terminal() {
            return Ok(Interactive::Piped(io::stdin().lock()));
        }

        let mut editor = DefaultEditor::new()?;
        editor.set_auto_add_history(true);

        let history = dirs::home_dir().map(|home| home.join(HISTORY_FILE));
        if let Some(path) = &history {
            // missing on first run
            let _ = editor.load_history(path);
        }
        Ok(Interactive::Editor { editor, history })
    }
}

impl LineReader for Interactive {
    fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        match self {
            Interactive::Editor { editor, .. } => match editor.readline(PROMPT) {
                Ok(line) => Ok(Some(line)),
                Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
                Err(ReadlineError::Eof) => Ok(None),
                Err(e) => Err(e.into()),
            },
            Interactive::Piped(stdin) => {
                let mut out = io::stdout();
                write!(out, "{}", PROMPT)?;
                out.flush()?;

                super::read_raw_line(stdin)
            }
        }
    }
}

impl Drop for Interactive {
    fn drop(&mut self) {
        if let Interactive::Editor {
            editor,
            history: Some(path),
        } = self
        {
            if let Err(e) = editor.save_history(path.as_path()) {
                eprintln!("Warning: Couldn't save history: {}", e);
            }
        }
    }
}
