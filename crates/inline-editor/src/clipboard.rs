//! Clipboard access behind a trait.
//!
//! The system clipboard is the one genuinely process-wide resource the kernel
//! touches, so it is injected as an interface rather than reached for
//! globally. Read/write failures are represented as `None` / silently ignored:
//! an unavailable clipboard disables Paste, it never raises.

/// Provider of clipboard text.
pub trait Clipboard {
    /// Read the clipboard. `None` when empty or unavailable.
    fn get_text(&mut self) -> Option<String>;

    /// Write `text` to the clipboard. Failures are swallowed.
    fn set_text(&mut self, text: &str);

    /// Whether the clipboard currently holds non-empty text.
    fn has_text(&mut self) -> bool {
        matches!(self.get_text(), Some(text) if !text.is_empty())
    }
}

/// An in-process clipboard for tests and headless embedding.
///
/// Embedders that want the OS clipboard implement [`Clipboard`] over their
/// platform layer instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard preloaded with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }
}
