//! Record-pair ("name=value" / "name: value") field support.
//!
//! A record pair is edited as two sibling fields. The name-side tokenizer
//! watches for the configured separator being typed immediately after
//! non-empty content; when that happens the composite control splits the text
//! at the separator and moves the trailing part (and the caret) into the
//! paired value field.

use inline_editor::{Line, SeparatorPolicy, Token, Tokenization, Tokenizer};

/// Result of a detected name/value split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSplit {
    /// Text that stays in the name field.
    pub name: String,
    /// Text that moves into the paired value field.
    pub value: String,
    /// Caret offset inside the value field after the move.
    pub value_caret: usize,
}

/// Tokenizer for the name side of a record pair.
#[derive(Debug, Clone, Copy)]
pub struct RecordPairTokenizer {
    separator: char,
}

impl RecordPairTokenizer {
    /// Create a tokenizer watching for `separator`.
    ///
    /// Only `=` (form fields) and `:` (headers) are meaningful separators;
    /// anything else is a configuration error and fails fast.
    pub fn new(separator: char) -> Self {
        assert!(
            separator == '=' || separator == ':',
            "record pair separator must be '=' or ':', got {separator:?}"
        );
        Self { separator }
    }

    /// The configured separator character.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Detect a separator typed immediately before `caret` (char offset)
    /// after non-empty name content.
    ///
    /// Returns the split to perform: everything before the separator stays as
    /// the name, everything after the caret moves to the value field with the
    /// caret at its start. The separator character itself is dropped.
    pub fn detect_split(&self, text: &str, caret: usize) -> Option<PairSplit> {
        let chars: Vec<char> = text.chars().collect();
        if caret == 0 || caret > chars.len() {
            return None;
        }
        if chars[caret - 1] != self.separator {
            return None;
        }
        let name: String = chars[..caret - 1].iter().collect();
        if name.is_empty() {
            return None;
        }
        let value: String = chars[caret..].iter().collect();
        Some(PairSplit {
            name,
            value,
            value_caret: 0,
        })
    }
}

impl Tokenizer for RecordPairTokenizer {
    fn tokenize(&self, text: &str) -> Tokenization {
        Tokenization::from_lines(vec![Line::with_tokens(vec![Token::plain(text)])])
    }

    fn separator_policy(&self) -> SeparatorPolicy {
        SeparatorPolicy::Contiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_separator_after_name() {
        let tokenizer = RecordPairTokenizer::new('=');
        let split = tokenizer.detect_split("Accept=", 7).unwrap();
        assert_eq!(split.name, "Accept");
        assert_eq!(split.value, "");
        assert_eq!(split.value_caret, 0);
    }

    #[test]
    fn test_moves_trailing_text_into_value() {
        let tokenizer = RecordPairTokenizer::new(':');
        // Separator typed in the middle: "Host:" then existing tail "name".
        let split = tokenizer.detect_split("Host:name", 5).unwrap();
        assert_eq!(split.name, "Host");
        assert_eq!(split.value, "name");
        assert_eq!(split.value_caret, 0);
    }

    #[test]
    fn test_no_split_without_name_content() {
        let tokenizer = RecordPairTokenizer::new('=');
        assert_eq!(tokenizer.detect_split("=", 1), None);
        assert_eq!(tokenizer.detect_split("", 0), None);
    }

    #[test]
    fn test_no_split_when_caret_not_after_separator() {
        let tokenizer = RecordPairTokenizer::new('=');
        assert_eq!(tokenizer.detect_split("a=b", 3), None);
        assert_eq!(tokenizer.detect_split("ab", 2), None);
    }

    #[test]
    #[should_panic(expected = "record pair separator")]
    fn test_invalid_separator_fails_fast() {
        RecordPairTokenizer::new(';');
    }
}
