use crate::core::commands::parse_int;
use crate::core::trace::DEFAULT_LEVEL;
use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
    script_args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &str, long: &str, description: &str, takes_value: bool) -> Self {
        Flag {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            takes_value,
            value: None,
        }
    }

    fn matches(&self, arg: &str) -> bool {
        arg == self.short || arg == self.long
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "echo".to_string(),
            Flag::new("-x", "--echo", "Echo each built-in command before running it", false),
        );
        flags.insert(
            "debug".to_string(),
            Flag::new("-d", "--debug", "<level> Debug level, 0 for no messages", true),
        );
        flags.insert(
            "file".to_string(),
            Flag::new("-f", "--file", "<file> <args> Read commands from a file first", true),
        );
        flags.insert(
            "help".to_string(),
            Flag::new("-h", "--help", "Print this help message", false),
        );
        flags.insert(
            "version".to_string(),
            Flag::new("-v", "--version", "Show version information", false),
        );

        Flags {
            flags,
            script_args: Vec::new(),
        }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            let (name, flag) = self
                .flags
                .iter_mut()
                .find(|(_, flag)| flag.matches(arg))
                .ok_or_else(|| ShellError::FlagError(format!("unknown option {}", arg)))?;

            if !flag.takes_value {
                flag.value = Some("true".to_string());
                i += 1;
                continue;
            }

            let value = args.get(i + 1).ok_or_else(|| {
                ShellError::FlagError(format!("Flag {} requires a value", arg))
            })?;
            flag.value = Some(value.clone());
            i += 2;

            if name == "file" {
                while let Some(next) = args.get(i).filter(|a| !a.starts_with('-')) {
                    self.script_args.push(next.clone());
                    i += 1;
                }
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn debug_level(&self) -> i32 {
        self.get_value("debug")
            .map(|level| parse_int(level))
            .unwrap_or(DEFAULT_LEVEL)
    }

    /// Arguments following `-f <file>`, bound to `$1`, `$2`, ...
    pub fn script_args(&self) -> &[String] {
        &self.script_args
    }

    pub fn print_help(&self) {
        println!("Usage: xssh [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<10} {}", flag.short, flag.long, flag.description);
        }
    }
}
