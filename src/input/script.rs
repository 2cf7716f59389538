use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::LineReader;
use crate::error::ShellError;

/// Reads a command file line by line, terminators included.
pub struct ScriptReader<R = BufReader<File>> {
    path: PathBuf,
    reader: R,
}

impl ScriptReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ShellError::Script {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            reader: BufReader::new(file),
        })
    }
}

impl<R: BufRead> ScriptReader<R> {
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: BufRead> LineReader for ScriptReader<R> {
    fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        super::read_raw_line(&mut self.reader)
    }
}
