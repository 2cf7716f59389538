use std::path::PathBuf;

const BACKGROUND: &str = "&";
const REDIRECT_IN: &str = "<";
const REDIRECT_OUT: &str = ">";

/// Where the child's stdin/stdout come from and whether the parent waits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectPlan {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub background: bool,
}

/// Final argument vector plus the plan pulled out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub argv: Vec<String>,
    pub plan: RedirectPlan,
}

/// Strip `&`, `< path` and `> path` out of a resolved token list.
///
/// The program name (first token) is never treated as an operator. A
/// trailing `<` or `>` without a path is dropped silently.
pub fn extract(tokens: Vec<String>) -> Extracted {
    let mut tokens = tokens.into_iter();
    let program = tokens.next().unwrap_or_default();
    let mut slots: Vec<Option<String>> = tokens.map(Some).collect();
    let mut plan = RedirectPlan::default();

    for slot in slots.iter_mut() {
        if slot.as_deref() == Some(BACKGROUND) {
            plan.background = true;
            *slot = None;
        }
    }

    for i in 0..slots.len() {
        let target = match slots[i].as_deref() {
            Some(REDIRECT_OUT) => &mut plan.output,
            Some(REDIRECT_IN) => &mut plan.input,
            _ => continue,
        };
        slots[i] = None;
        if let Some(path) = slots.get_mut(i + 1).and_then(Option::take) {
            *target = Some(PathBuf::from(path));
        }
    }

    let argv = std::iter::once(program).chain(slots.into_iter().flatten()).collect();
    Extracted { argv, plan }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_plain_command() {
        let extracted = extract(tokens(&["ls", "-l"]));
        assert_eq!(extracted.argv, tokens(&["ls", "-l"]));
        assert_eq!(extracted.plan, RedirectPlan::default());
    }

    #[test]
    fn test_output_redirect() {
        let extracted = extract(tokens(&["cat", ">", "out.txt"]));
        assert_eq!(extracted.argv, tokens(&["cat"]));
        assert_eq!(extracted.plan.output, Some(PathBuf::from("out.txt")));
        assert_eq!(extracted.plan.input, None);
    }

    #[test]
    fn test_both_redirects_and_background() {
        let extracted = extract(tokens(&["sort", "-r", "<", "in", ">", "out", "&"]));
        assert_eq!(extracted.argv, tokens(&["sort", "-r"]));
        assert_eq!(extracted.plan.input, Some(PathBuf::from("in")));
        assert_eq!(extracted.plan.output, Some(PathBuf::from("out")));
        assert!(extracted.plan.background);
    }

    #[test]
    fn test_background_anywhere() {
        let extracted = extract(tokens(&["sleep", "&", "1"]));
        assert_eq!(extracted.argv, tokens(&["sleep", "1"]));
        assert!(extracted.plan.background);
    }

    #[test]
    fn test_ampersand_inside_word_is_an_argument() {
        let extracted = extract(tokens(&["echo", "a&b", "&&"]));
        assert_eq!(extracted.argv, tokens(&["echo", "a&b", "&&"]));
        assert!(!extracted.plan.background);
    }

    #[test]
    fn test_dangling_operator_is_dropped() {
        let extracted = extract(tokens(&["cat", "file", ">"]));
        assert_eq!(extracted.argv, tokens(&["cat", "file"]));
        assert_eq!(extracted.plan.output, None);
    }

    #[test]
    fn test_operator_before_background_marker_gets_no_path() {
        let extracted = extract(tokens(&["cat", "<", "&"]));
        assert_eq!(extracted.argv, tokens(&["cat"]));
        assert_eq!(extracted.plan.input, None);
        assert!(extracted.plan.background);
    }
}
