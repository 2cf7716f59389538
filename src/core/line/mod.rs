mod redirect;
mod resolver;
mod tokenizer;

pub use redirect::{extract, Extracted, RedirectPlan};
pub use resolver::{resolve, SIGIL};
pub use tokenizer::{tokenize, MAX_ARGS};
