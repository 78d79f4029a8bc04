//! Structural URL tokenization.
//!
//! A single-pass scanner splits the text into protocol, hostname, path, query
//! and hash; every character is appended verbatim to whichever segment is
//! active, with no normalization or decoding. The tokenizer then renders the
//! segments either as one line each (multi-line mode, which gives each URL
//! segment and each `&`-joined query pair independent wrapping) or all on a
//! single line.
//!
//! The scanner is total: any internal failure makes the whole text a single
//! literal hostname token instead of propagating an error.

use crate::error::UrlScanError;
use crate::macro_aware::{collect_macro_names, resolve_macros};
use inline_editor::{Line, MacroProvider, SeparatorPolicy, Token, TokenKind, Tokenization, Tokenizer};
use std::rc::Rc;

/// How the URL tokenizer lays segments out into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlLayout {
    /// All tokens concatenated onto a single line.
    SingleLine,
    /// One line per segment and per query pair, for independent wrapping.
    MultiLine,
}

/// The scanned URL segments. Concatenating the fields in declaration order
/// reproduces the scanned text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts {
    /// Everything up to and including the first literal `://`, if present.
    pub protocol: String,
    /// The authority part (verbatim, no decoding).
    pub hostname: String,
    /// The path, including its leading `/`.
    pub path: String,
    /// The query, including its leading `?`.
    pub query: String,
    /// The fragment, including its leading `#`.
    pub hash: String,
}

impl UrlParts {
    fn reassembled(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.protocol, self.hostname, self.path, self.query, self.hash
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Hostname,
    Path,
    Query,
    Hash,
}

/// Scan `text` into URL segments.
///
/// Rules: the scanner starts in the hostname segment (after consuming an
/// optional protocol). The first unescaped `/` switches to the path, but only
/// while no path/query/hash has started; the first `?` switches to the query
/// while no query/hash has started; the first `#` switches to the hash. The
/// switching character belongs to the segment it opens.
pub fn scan_url(text: &str) -> Result<UrlParts, UrlScanError> {
    let mut parts = UrlParts::default();

    let rest = match text.find("://") {
        Some(index) => {
            let split = index + "://".len();
            parts.protocol = text[..split].to_string();
            &text[split..]
        }
        None => text,
    };

    let mut segment = Segment::Hostname;
    let mut previous: Option<char> = None;
    for c in rest.chars() {
        let escaped = previous == Some('\\');
        match c {
            '/' if !escaped && segment == Segment::Hostname => segment = Segment::Path,
            '?' if matches!(segment, Segment::Hostname | Segment::Path) => {
                segment = Segment::Query
            }
            '#' if segment != Segment::Hash => segment = Segment::Hash,
            _ => {}
        }
        match segment {
            Segment::Hostname => parts.hostname.push(c),
            Segment::Path => parts.path.push(c),
            Segment::Query => parts.query.push(c),
            Segment::Hash => parts.hash.push(c),
        }
        previous = Some(c);
    }

    let reassembled = parts.reassembled();
    if reassembled != text {
        return Err(UrlScanError::Desync {
            expected: text.chars().count(),
            actual: reassembled.chars().count(),
        });
    }
    Ok(parts)
}

/// Tokenizer that renders a URL as typed structural segments.
///
/// Query pairs whose value (after macro resolution against the provider)
/// is empty are emitted as [`TokenKind::Suppressed`] so the renderer dims
/// them. The suppression flag is computed from the provider snapshot at
/// tokenize time and self-corrects on the next re-tokenize.
#[derive(Clone)]
pub struct UrlTokenizer {
    layout: UrlLayout,
    provider: Option<Rc<dyn MacroProvider>>,
}

impl UrlTokenizer {
    pub fn new(layout: UrlLayout) -> Self {
        Self {
            layout,
            provider: None,
        }
    }

    /// Attach a macro value provider for query-pair emptiness checks.
    pub fn with_provider(mut self, provider: Rc<dyn MacroProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn layout(&self) -> UrlLayout {
        self.layout
    }

    /// One token row per structural segment (and per query pair). Empty
    /// segments produce no row.
    fn token_rows(&self, parts: &UrlParts) -> Vec<Vec<Token>> {
        let mut rows = Vec::new();
        if !parts.protocol.is_empty() {
            rows.push(vec![Token::new(parts.protocol.clone(), TokenKind::Accent)]);
        }
        if !parts.hostname.is_empty() {
            rows.push(vec![Token::plain(parts.hostname.clone())]);
        }
        if !parts.path.is_empty() {
            rows.push(vec![Token::plain(parts.path.clone())]);
        }
        for pair in split_query_pairs(&parts.query) {
            rows.push(self.query_pair_tokens(&pair));
        }
        if !parts.hash.is_empty() {
            let body = &parts.hash[1..];
            rows.push(vec![
                Token::new("#", TokenKind::Accent),
                Token::plain(body),
            ]);
        }
        rows
    }

    /// Tokens for one `?key=value` / `&key=value` pair.
    fn query_pair_tokens(&self, pair: &str) -> Vec<Token> {
        let separator = &pair[..1];
        let body = &pair[1..];
        let suppressed = match body.find('=') {
            Some(eq) => resolve_macros(&body[eq + 1..], self.provider.as_ref()).is_empty(),
            None => false,
        };
        let (separator_kind, body_kind) = if suppressed {
            (TokenKind::Suppressed, TokenKind::Suppressed)
        } else {
            (TokenKind::Accent, TokenKind::Plain)
        };
        vec![
            Token::new(separator, separator_kind),
            Token::new(body, body_kind),
        ]
    }
}

impl Tokenizer for UrlTokenizer {
    fn tokenize(&self, text: &str) -> Tokenization {
        let names = collect_macro_names(text);
        let parts = match scan_url(text) {
            Ok(parts) => parts,
            // Fallback: the whole text is one literal hostname token.
            Err(_) => {
                return Tokenization::from_lines(vec![Line::with_tokens(vec![Token::plain(
                    text,
                )])])
                .with_macro_names(names);
            }
        };

        let rows = self.token_rows(&parts);
        let lines = match self.layout {
            UrlLayout::MultiLine => rows.into_iter().map(Line::with_tokens).collect(),
            UrlLayout::SingleLine => {
                vec![Line::with_tokens(rows.into_iter().flatten().collect())]
            }
        };
        Tokenization::from_lines(lines).with_macro_names(names)
    }

    fn separator_policy(&self) -> SeparatorPolicy {
        // URL lines are synthetic rows; no separator character exists between
        // them in the source text.
        SeparatorPolicy::Contiguous
    }
}

/// Split a scanned query (leading `?`) into its `&`-joined pairs, each pair
/// keeping the separator that opened it.
fn split_query_pairs(query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut pairs = Vec::new();
    let mut current = String::new();
    for c in query.chars() {
        if c == '&' && !current.is_empty() {
            pairs.push(current);
            current = String::new();
        }
        current.push(c);
    }
    pairs.push(current);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_splits_all_segments() {
        let parts = scan_url("https://a.com/p?x=1&y=").unwrap();
        assert_eq!(parts.protocol, "https://");
        assert_eq!(parts.hostname, "a.com");
        assert_eq!(parts.path, "/p");
        assert_eq!(parts.query, "?x=1&y=");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn test_scanner_bare_hostname() {
        let parts = scan_url("a.com").unwrap();
        assert_eq!(parts.hostname, "a.com");
        assert_eq!(parts.protocol, "");
        assert_eq!(parts.path, "");
        assert_eq!(parts.query, "");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn test_scanner_empty_input() {
        let parts = scan_url("").unwrap();
        assert_eq!(parts, UrlParts::default());
    }

    #[test]
    fn test_scanner_path_only_switches_once() {
        // A '/' inside the query must not re-open the path.
        let parts = scan_url("a.com/p?redirect=/home").unwrap();
        assert_eq!(parts.path, "/p");
        assert_eq!(parts.query, "?redirect=/home");
    }

    #[test]
    fn test_scanner_hash_wins_over_everything() {
        let parts = scan_url("a.com#frag?not=query/not-path").unwrap();
        assert_eq!(parts.hostname, "a.com");
        assert_eq!(parts.hash, "#frag?not=query/not-path");
    }

    #[test]
    fn test_split_query_pairs_keeps_separators() {
        assert_eq!(split_query_pairs("?x=1&y="), vec!["?x=1", "&y="]);
        assert_eq!(split_query_pairs(""), Vec::<String>::new());
    }
}
