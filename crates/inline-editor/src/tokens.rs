//! The token/line model: a structural, read-only representation of tokenized
//! text with offset bookkeeping.
//!
//! Lines and tokens are fully regenerated by the active tokenizer on every
//! text change; nothing is reused across tokenize calls. Incremental
//! re-tokenization is an explicit non-goal of this kernel.

use crate::caret::SeparatorPolicy;
use std::collections::BTreeSet;

/// Semantic kind of a rendered token, checked by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unstyled text.
    Plain,
    /// Structural emphasis (protocol, query separators, hash marker).
    Accent,
    /// A `${NAME}` macro placeholder.
    Parameter,
    /// Rendered dimmed (placeholder text, query pairs with empty values).
    Suppressed,
}

/// Minimal rendered unit of text with a semantic kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The literal text of the token.
    pub text: String,
    /// Semantic kind.
    pub kind: TokenKind,
    /// Character offset within the owning line, assigned by
    /// [`Line::set_tokens`].
    pub offset: usize,
}

impl Token {
    /// Create a token with an unassigned offset.
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
            offset: 0,
        }
    }

    /// An unstyled token.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Plain)
    }

    /// Token length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the token has zero length. Such tokens are dropped by
    /// [`Line::set_tokens`] before offset assignment.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An ordered run of tokens.
///
/// A line may correspond to a literal `\n`-delimited text line, or to a
/// synthetic structural row (a URL segment, a query pair) that exists purely
/// to get independent wrapping. Which of the two it is decides the
/// [`SeparatorPolicy`] the coordinate mapper uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Zero-based row index, assigned by [`assign_line_offsets`].
    pub index: usize,
    /// Cumulative character offset of this line within the whole text:
    /// the sum of the lengths of every preceding line. Virtual newline
    /// separators are *not* included here; the mapper injects them.
    pub offset: usize,
    tokens: Vec<Token>,
    length: usize,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line holding the given tokens.
    pub fn with_tokens(tokens: Vec<Token>) -> Self {
        let mut line = Self::new();
        line.set_tokens(tokens);
        line
    }

    /// Replace this line's tokens.
    ///
    /// Zero-length tokens are dropped; each surviving token gets
    /// `offset = sum of the lengths of the tokens before it`; the line length
    /// becomes the sum of all token lengths.
    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .collect();
        let mut offset = 0;
        for token in &mut self.tokens {
            token.offset = offset;
            offset += token.len();
        }
        self.length = offset;
    }

    /// The tokens of this line, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Line length in characters (the sum of its token lengths).
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the line holds no text.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The literal text of this line (its token texts concatenated).
    pub fn text(&self) -> String {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }
}

/// Assign row indices and cumulative document offsets to a freshly tokenized
/// line sequence: `offset_0 = 0`, `offset_i = offset_{i-1} + length_{i-1}`.
pub fn assign_line_offsets(lines: &mut [Line]) {
    let mut offset = 0;
    for (index, line) in lines.iter_mut().enumerate() {
        line.index = index;
        line.offset = offset;
        offset += line.len();
    }
}

/// The result of one tokenize pass: the rendered lines plus the set of
/// distinct macro names discovered along the way.
///
/// The macro-name set is a side artifact consumed by composite controls
/// (autocomplete, cross-highlighting); it is recomputed on every call and is
/// not part of the buffer state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokenization {
    /// The rendered lines. Offsets are already assigned.
    pub lines: Vec<Line>,
    /// Distinct `${NAME}` names found while tokenizing.
    pub macro_names: BTreeSet<String>,
}

impl Tokenization {
    /// Build a tokenization from lines, assigning offsets, with no macros.
    pub fn from_lines(mut lines: Vec<Line>) -> Self {
        assign_line_offsets(&mut lines);
        Self {
            lines,
            macro_names: BTreeSet::new(),
        }
    }

    /// Attach the macro-name side artifact.
    pub fn with_macro_names(mut self, macro_names: BTreeSet<String>) -> Self {
        self.macro_names = macro_names;
        self
    }

    /// Reconstruct the source text these lines were tokenized from.
    ///
    /// Under [`SeparatorPolicy::NewlineSeparated`] a literal `\n` is
    /// reinserted at each line boundary; under
    /// [`SeparatorPolicy::Contiguous`] the lines are synthetic rows and
    /// concatenate directly.
    pub fn source_text(&self, policy: SeparatorPolicy) -> String {
        let separator = match policy {
            SeparatorPolicy::NewlineSeparated => "\n",
            SeparatorPolicy::Contiguous => "",
        };
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// A pluggable function mapping raw text to an ordered sequence of lines of
/// tokens, defining both the visual structure and the offset semantics of one
/// editor specialization.
///
/// Tokenizers must be total over arbitrary input strings: malformed URLs,
/// unterminated `${...}` spans and the like tokenize to *something*, they
/// never raise.
pub trait Tokenizer {
    /// Tokenize `text` into lines, from scratch.
    ///
    /// Calling this twice with identical external macro state must yield
    /// structurally identical results, and concatenating the token texts (with
    /// the policy's separator reinserted at line boundaries) must reconstruct
    /// `text` exactly.
    fn tokenize(&self, text: &str) -> Tokenization;

    /// How this tokenizer's lines relate to the source text.
    ///
    /// The default assumes lines are literal `\n`-delimited text lines.
    /// Tokenizers whose lines are synthetic (URL segments, record pairs) must
    /// report [`SeparatorPolicy::Contiguous`], since no separator character
    /// exists between their rows.
    fn separator_policy(&self) -> SeparatorPolicy {
        SeparatorPolicy::NewlineSeparated
    }
}

/// The default tokenizer: splits on `\n`, one line with one unstyled token
/// per fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, text: &str) -> Tokenization {
        let lines = text
            .split('\n')
            .map(|fragment| Line::with_tokens(vec![Token::plain(fragment)]))
            .collect();
        Tokenization::from_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tokens_drops_empty_and_assigns_offsets() {
        let mut line = Line::new();
        line.set_tokens(vec![
            Token::plain("ab"),
            Token::plain(""),
            Token::new("cde", TokenKind::Accent),
        ]);

        assert_eq!(line.tokens().len(), 2);
        assert_eq!(line.tokens()[0].offset, 0);
        assert_eq!(line.tokens()[1].offset, 2);
        assert_eq!(line.len(), 5);
        assert_eq!(line.text(), "abcde");
    }

    #[test]
    fn test_assign_line_offsets_is_cumulative() {
        let mut lines = vec![
            Line::with_tokens(vec![Token::plain("abc")]),
            Line::with_tokens(vec![Token::plain("de")]),
            Line::with_tokens(vec![Token::plain("f")]),
        ];
        assign_line_offsets(&mut lines);

        assert_eq!(lines[0].offset, 0);
        assert_eq!(lines[1].offset, 3);
        assert_eq!(lines[2].offset, 5);
        assert_eq!(lines[2].index, 2);
    }

    #[test]
    fn test_plain_tokenizer_splits_on_newlines() {
        let tokenization = PlainTokenizer.tokenize("one\ntwo\n");
        assert_eq!(tokenization.lines.len(), 3);
        assert_eq!(tokenization.lines[0].text(), "one");
        assert_eq!(tokenization.lines[1].text(), "two");
        assert_eq!(tokenization.lines[2].text(), "");
        assert!(tokenization.macro_names.is_empty());
    }

    #[test]
    fn test_plain_tokenizer_round_trips() {
        let input = "one\ntwo\n\nthree";
        let tokenization = PlainTokenizer.tokenize(input);
        assert_eq!(
            tokenization.source_text(SeparatorPolicy::NewlineSeparated),
            input
        );
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let a = PlainTokenizer.tokenize("x\ny");
        let b = PlainTokenizer.tokenize("x\ny");
        assert_eq!(a, b);
    }

    #[test]
    fn test_token_lengths_are_characters() {
        let token = Token::plain("你好");
        assert_eq!(token.len(), 2);
    }
}
