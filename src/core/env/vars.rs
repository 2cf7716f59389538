use super::EnvError;
use std::borrow::Cow;
use std::env;

/// Longest name or value payload kept in the session-local tier.
pub const MAX_VAR_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: String,
}

impl Variable {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: bounded(name),
            value: bounded(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn is_cleared(&self) -> bool {
        self.name.is_empty()
    }

    fn clear(&mut self) {
        self.name.clear();
        self.value.clear();
    }
}

fn bounded(text: &str) -> String {
    match text.char_indices().nth(MAX_VAR_LEN) {
        Some((cut, _)) => text[..cut].to_owned(),
        None => text.to_owned(),
    }
}

/// Two-tier variable store: session-local entries first, then the
/// process environment.
///
/// Local entries are never removed. `unset` blanks a slot in place so it
/// stops matching lookups but keeps its position for the rest of the
/// session.
#[derive(Clone, Debug, Default)]
pub struct VarStore {
    locals: Vec<Variable>,
}

impl VarStore {
    pub fn new() -> Self {
        Self { locals: Vec::new() }
    }

    /// Store seeded with `$` (shell pid), `?` and `!` (both `-1`).
    pub fn with_builtins(shell_pid: u32) -> Self {
        let mut store = Self::new();
        store.set("$", &shell_pid.to_string());
        store.set("?", "-1");
        store.set("!", "-1");
        store
    }

    pub fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.local(name) {
            return Some(Cow::Borrowed(value));
        }
        if !is_valid_env_name(name) {
            return None;
        }
        env::var(name).ok().map(Cow::Owned)
    }

    pub fn local(&self, name: &str) -> Option<&str> {
        self.find(name).map(|idx| self.locals[idx].value())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.find(name) {
            Some(idx) => self.locals[idx].value = bounded(value),
            None => self.locals.push(Variable::new(name, value)),
        }
    }

    pub fn unset(&mut self, name: &str) -> Result<(), EnvError> {
        let idx = self
            .find(name)
            .ok_or_else(|| EnvError::VarNotFound(name.to_string()))?;
        self.locals[idx].clear();
        Ok(())
    }

    pub fn export(&self, name: &str, value: &str) -> Result<(), EnvError> {
        if !is_valid_env_name(name) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue(name.to_string()));
        }
        env::set_var(name, value);
        Ok(())
    }

    pub fn unexport(&self, name: &str) -> Result<(), EnvError> {
        if !is_valid_env_name(name) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        env::remove_var(name);
        Ok(())
    }

    /// Allocated local slots, including cleared ones.
    pub fn slots(&self) -> &[Variable] {
        &self.locals
    }

    /// Slot holding `name`, compared in its stored (bounded) form.
    fn find(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        let name = bounded(name);
        self.locals
            .iter()
            .position(|var| !var.is_cleared() && var.name == name)
    }
}

fn is_valid_env_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_seeded() {
        let store = VarStore::with_builtins(4242);
        assert_eq!(store.local("$"), Some("4242"));
        assert_eq!(store.local("?"), Some("-1"));
        assert_eq!(store.local("!"), Some("-1"));
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = VarStore::new();
        store.set("greeting", "hello");
        store.set("other", "x");
        store.set("greeting", "bye");
        assert_eq!(store.local("greeting"), Some("bye"));
        assert_eq!(store.slots().len(), 2);
        assert_eq!(store.slots()[0].name(), "greeting");
    }

    #[test]
    fn test_values_are_truncated() {
        let mut store = VarStore::new();
        let long = "v".repeat(MAX_VAR_LEN + 40);
        store.set("long", &long);
        assert_eq!(store.local("long").map(str::len), Some(MAX_VAR_LEN));

        store.set("long", "short");
        assert_eq!(store.local("long"), Some("short"));
    }

    #[test]
    fn test_long_name_keeps_one_slot() {
        let mut store = VarStore::new();
        let name = "n".repeat(MAX_VAR_LEN + 5);
        store.set(&name, "a");
        store.set(&name, "b");

        assert_eq!(store.slots().len(), 1);
        assert_eq!(store.slots()[0].name().len(), MAX_VAR_LEN);
        assert_eq!(store.lookup(&name).as_deref(), Some("b"));
        assert_eq!(store.lookup(&"n".repeat(MAX_VAR_LEN)).as_deref(), Some("b"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut store = VarStore::new();
        let long = "é".repeat(MAX_VAR_LEN + 1);
        store.set("wide", &long);
        let kept = store.local("wide").unwrap_or_default();
        assert_eq!(kept.chars().count(), MAX_VAR_LEN);
    }

    #[test]
    fn test_unset_keeps_slot() -> Result<(), EnvError> {
        let mut store = VarStore::new();
        store.set("a", "1");
        store.set("b", "2");
        store.unset("a")?;

        assert_eq!(store.local("a"), None);
        assert_eq!(store.slots().len(), 2);
        assert_eq!(store.slots()[0].name(), "");
        assert_eq!(store.slots()[0].value(), "");
        assert_eq!(store.local("b"), Some("2"));
        Ok(())
    }

    #[test]
    fn test_unset_missing() {
        let mut store = VarStore::new();
        assert!(matches!(
            store.unset("missing"),
            Err(EnvError::VarNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_set_after_unset_appends() -> Result<(), EnvError> {
        let mut store = VarStore::new();
        store.set("a", "1");
        store.unset("a")?;
        store.set("a", "2");
        assert_eq!(store.local("a"), Some("2"));
        assert_eq!(store.slots().len(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_name_never_matches_cleared_slot() -> Result<(), EnvError> {
        let mut store = VarStore::new();
        store.set("a", "1");
        store.unset("a")?;
        assert_eq!(store.lookup(""), None);
        Ok(())
    }

    #[test]
    fn test_local_shadows_environment() {
        env::set_var("XSSH_VARS_SHADOW", "from-env");
        let mut store = VarStore::new();
        assert_eq!(store.lookup("XSSH_VARS_SHADOW").as_deref(), Some("from-env"));

        store.set("XSSH_VARS_SHADOW", "local");
        assert_eq!(store.lookup("XSSH_VARS_SHADOW").as_deref(), Some("local"));
        assert_eq!(env::var("XSSH_VARS_SHADOW").as_deref(), Ok("from-env"));
    }

    #[test]
    fn test_export_and_unexport() -> Result<(), EnvError> {
        let store = VarStore::new();
        store.export("XSSH_VARS_EXPORT", "value with spaces")?;
        assert_eq!(env::var("XSSH_VARS_EXPORT").as_deref(), Ok("value with spaces"));
        assert_eq!(store.local("XSSH_VARS_EXPORT"), None);

        store.unexport("XSSH_VARS_EXPORT")?;
        assert!(env::var("XSSH_VARS_EXPORT").is_err());
        Ok(())
    }

    #[test]
    fn test_export_rejects_bad_names() {
        let store = VarStore::new();
        assert!(matches!(store.export("", "x"), Err(EnvError::InvalidName(_))));
        assert!(matches!(store.export("A=B", "x"), Err(EnvError::InvalidName(_))));
        assert!(matches!(
            store.export("XSSH_VARS_NUL", "a\0b"),
            Err(EnvError::InvalidValue(_))
        ));
        assert!(matches!(store.unexport(""), Err(EnvError::InvalidName(_))));
    }
}
