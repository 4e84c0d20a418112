// ============================================================
// Text Preprocessor
// ============================================================
// Turns a raw abstract or title into the list of sentence lines
// that `encode_for_summarization` tokenises one by one.
//
// Steps (applied in order):
//   1. Map Unicode whitespace variants and control characters
//      to plain spaces (newlines survive, \r becomes \n)
//   2. Collapse runs of spaces and trim each line
//   3. Split lines further after sentence-final punctuation
//      (. ! ?) that is followed by whitespace
//   4. Drop empty lines
//
// Example:
//   "Deep  nets work.\u{00A0}They scale!\r\nDone"
//     → ["Deep nets work.", "They scale!", "Done"]
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalise whitespace and control characters.
    /// Line structure is kept; every line is collapsed and trimmed.
    pub fn clean(&self, text: &str) -> String {
        let normalised: String = text
            .chars()
            .map(|c| match c {
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                '\r' => '\n',
                c if c.is_control() && c != '\n' => ' ',
                c => c,
            })
            .collect();

        normalised
            .lines()
            .map(collapse_spaces)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Clean `text` and split it into non-empty sentence lines.
    pub fn split_lines(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);

        cleaned
            .lines()
            .flat_map(split_sentences)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_spaces(line: &str) -> String {
    let mut out        = String::with_capacity(line.len());
    let mut last_space = false;

    for c in line.chars() {
        if c == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }

    out.trim().to_string()
}

/// Split one cleaned line after `.`, `!` or `?` followed by a space.
fn split_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current   = String::new();
    let mut chars     = line.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|next| *next == ' ');
        if at_boundary {
            sentences.push(current.trim().to_string());
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello   world"), "hello world");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_splits_on_sentence_punctuation() {
        let p = Preprocessor::new();
        let lines = p.split_lines("Deep  nets work.\u{00A0}They scale!\r\nDone");
        assert_eq!(lines, vec!["Deep nets work.", "They scale!", "Done"]);
    }

    #[test]
    fn test_keeps_decimal_points() {
        let p = Preprocessor::new();
        assert_eq!(p.split_lines("Accuracy rose to 93.5 percent."), vec!["Accuracy rose to 93.5 percent."]);
    }

    #[test]
    fn test_drops_blank_lines() {
        let p = Preprocessor::new();
        assert_eq!(p.split_lines("one\n\n\n  \ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert!(p.split_lines("   ").is_empty());
    }
}
