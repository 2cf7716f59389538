mod vars;

pub use vars::{VarStore, Variable, MAX_VAR_LEN};

#[derive(Debug)]
pub enum EnvError {
    VarNotFound(String),
    InvalidName(String),
    InvalidValue(String),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::VarNotFound(var) => write!(f, "{} not found", var),
            EnvError::InvalidName(name) => {
                write!(f, "invalid environment variable name: '{}'", name)
            }
            EnvError::InvalidValue(name) => {
                write!(f, "invalid value for environment variable {}", name)
            }
        }
    }
}

impl std::error::Error for EnvError {}
