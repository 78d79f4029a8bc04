use thiserror::Error;

/// Internal failures of the URL segment scanner.
///
/// These never reach callers: the tokenizer catches them and falls back to a
/// single literal-hostname token. They exist so the scanner can state its own
/// consistency contract instead of asserting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlScanError {
    /// Concatenating the scanned segments did not reproduce the input text.
    #[error("scanned segments do not reassemble the input ({actual} of {expected} chars)")]
    Desync {
        /// Character length of the input.
        expected: usize,
        /// Character length of the reassembled segments.
        actual: usize,
    },
}
