//! Macro-aware tokenization of `${NAME}` placeholder spans.

use inline_editor::{Line, MacroProvider, Token, TokenKind, Tokenization, Tokenizer};
use regex::Regex;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::LazyLock;

/// `${NAME}` spans. An unterminated `${...` is not a span and stays plain
/// text; tokenization is total either way.
pub(crate) static MACRO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("macro pattern is valid"));

/// Collect the distinct non-empty macro names referenced in `text`.
pub fn collect_macro_names(text: &str) -> BTreeSet<String> {
    MACRO_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Replace every `${NAME}` in `text` with its current value (missing macros
/// resolve to the empty string).
pub(crate) fn resolve_macros(text: &str, provider: Option<&Rc<dyn MacroProvider>>) -> String {
    MACRO_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            provider
                .and_then(|p| p.value(name))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Tokenizer that alternates plain-text and parameter tokens around `${NAME}`
/// spans, yielding the set of names found as a side artifact.
///
/// With a provider and [`flag_trailing_empty`](Self::flag_trailing_empty)
/// enabled, a parameter that is the last component of the text and resolves
/// to an empty value is emitted as [`TokenKind::Suppressed`], so the renderer
/// can dim it (the half-opacity query-pair treatment).
#[derive(Clone, Default)]
pub struct MacroTokenizer {
    provider: Option<Rc<dyn MacroProvider>>,
    flag_trailing_empty: bool,
}

impl MacroTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a macro value provider (enables emptiness checks).
    pub fn with_provider(mut self, provider: Rc<dyn MacroProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Dim a trailing parameter whose resolved value is empty.
    pub fn flag_trailing_empty(mut self, flag: bool) -> Self {
        self.flag_trailing_empty = flag;
        self
    }

    fn scan_fragment(&self, fragment: &str, names: &mut BTreeSet<String>) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 0;
        for caps in MACRO_PATTERN.captures_iter(fragment) {
            let span = caps.get(0).expect("group 0 always matches");
            if span.start() > last {
                tokens.push(Token::plain(&fragment[last..span.start()]));
            }
            let name = caps.get(1).map_or("", |m| m.as_str());
            if !name.is_empty() {
                names.insert(name.to_string());
            }
            tokens.push(Token::new(span.as_str(), TokenKind::Parameter));
            last = span.end();
        }
        if last < fragment.len() {
            tokens.push(Token::plain(&fragment[last..]));
        }
        tokens
    }
}

impl Tokenizer for MacroTokenizer {
    fn tokenize(&self, text: &str) -> Tokenization {
        let mut names = BTreeSet::new();
        let mut rows: Vec<Vec<Token>> = text
            .split('\n')
            .map(|fragment| self.scan_fragment(fragment, &mut names))
            .collect();

        if self.flag_trailing_empty {
            if let Some(provider) = &self.provider {
                if let Some(token) = rows.last_mut().and_then(|row| row.last_mut()) {
                    if token.kind == TokenKind::Parameter
                        && provider.is_empty(macro_name(&token.text))
                    {
                        token.kind = TokenKind::Suppressed;
                    }
                }
            }
        }

        Tokenization::from_lines(rows.into_iter().map(Line::with_tokens).collect())
            .with_macro_names(names)
    }
}

/// The NAME inside a `${NAME}` token text.
fn macro_name(token_text: &str) -> &str {
    token_text
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(token_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates_plain_and_parameter_tokens() {
        let tokenization = MacroTokenizer::new().tokenize("Bearer ${TOKEN}");
        let tokens = tokenization.lines[0].tokens();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Bearer ");
        assert_eq!(tokens[0].kind, TokenKind::Plain);
        assert_eq!(tokens[1].text, "${TOKEN}");
        assert_eq!(tokens[1].kind, TokenKind::Parameter);
        assert_eq!(
            tokenization.macro_names,
            BTreeSet::from(["TOKEN".to_string()])
        );
    }

    #[test]
    fn test_unterminated_span_stays_plain() {
        let tokenization = MacroTokenizer::new().tokenize("x ${oops");
        let tokens = tokenization.lines[0].tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Plain);
        assert_eq!(tokens[0].text, "x ${oops");
    }

    #[test]
    fn test_macro_name_extraction() {
        assert_eq!(macro_name("${HOST}"), "HOST");
        assert_eq!(macro_name("not a macro"), "not a macro");
    }
}
