/// Arguments kept after the program name.
pub const MAX_ARGS: usize = 16;

const COMMENT: char = '#';

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_terminator(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Split one raw line into owned argument tokens.
///
/// Comments end the line: a `#` anywhere truncates the token it appears
/// in and nothing after it is collected. A token that is empty after
/// dropping line terminators also ends the line. At most
/// [`MAX_ARGS`] tokens follow the program name; the rest of the line is
/// discarded.
pub fn tokenize(line: &str) -> Vec<String> {
    let body = line.trim_start_matches(|c: char| is_separator(c) || is_terminator(c));
    if body.is_empty() || body.starts_with(COMMENT) {
        return Vec::new();
    }

    let mut tokens = Vec::with_capacity(MAX_ARGS + 1);
    for raw in body.split(is_separator).filter(|s| !s.is_empty()) {
        if tokens.len() > MAX_ARGS {
            break;
        }

        let (word, commented) = match raw.find(COMMENT) {
            Some(pos) => (&raw[..pos], true),
            None => (raw, false),
        };
        let word: String = word.chars().filter(|&c| !is_terminator(c)).collect();
        if word.is_empty() {
            break;
        }
        tokens.push(word);

        if commented {
            break;
        }
    }
    tokens
}
