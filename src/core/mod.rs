pub mod commands;
pub mod env;
pub mod line;
pub mod state;
pub mod trace;
