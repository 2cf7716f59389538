use crate::core::env::VarStore;

pub const SIGIL: char = '$';

/// Replace every `$name` token with the value found in `vars`.
///
/// Unresolved tokens stay as written; their text is returned so the
/// caller can report them.
pub fn resolve(tokens: &mut [String], vars: &VarStore) -> Vec<String> {
    let mut missing = Vec::new();
    for token in tokens.iter_mut() {
        let Some(name) = token.strip_prefix(SIGIL) else {
            continue;
        };
        match vars.lookup(name) {
            Some(value) => *token = value.into_owned(),
            None => missing.push(token.clone()),
        }
    }
    missing
}
