mod editor;
mod script;

pub use editor::Interactive;
pub use script::ScriptReader;

use std::io::BufRead;

use crate::error::ShellError;

/// A source of command lines for the dispatcher.
pub trait LineReader {
    /// Next line, or `None` once the source is exhausted.
    fn read_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// One raw line from `reader`, terminator kept. Bytes that are not UTF-8
/// are replaced rather than failing the read.
pub(crate) fn read_raw_line(reader: &mut impl BufRead) -> Result<Option<String>, ShellError> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf)? {
        0 => Ok(None),
        _ => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
    }
}
