//! Immutable buffer state: text plus a selection range in character offsets.
//!
//! A [`TextBufferState`] is never mutated in place. The edit-operation
//! processor ([`crate::ops::apply_edit`]) consumes a state and produces a
//! replacement; the host surface swaps the whole state on every edit.

use std::fmt;

/// A selection over the buffer text, in character offsets.
///
/// `start == end` is a collapsed selection (a bare caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset. Always `>= start`.
    pub end: usize,
}

impl SelectionRange {
    /// Create a selection range. Panics in debug builds if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "selection start must not exceed end");
        Self { start, end }
    }

    /// A collapsed selection (caret) at `offset`.
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether this selection is a bare caret.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Selection length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the selection covers zero characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Errors raised when constructing a buffer state that violates its invariant.
///
/// These are programming errors on the caller's side and fail fast rather than
/// degrading silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The selection range does not satisfy `0 <= start <= end <= char_len`.
    InvalidSelection {
        /// Requested selection start.
        start: usize,
        /// Requested selection end.
        end: usize,
        /// Character length of the buffer text.
        char_len: usize,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::InvalidSelection {
                start,
                end,
                char_len,
            } => {
                write!(
                    f,
                    "invalid selection {}..{} for text of {} characters",
                    start, end, char_len
                )
            }
        }
    }
}

impl std::error::Error for StateError {}

/// One immutable snapshot of an editable field: its text and selection.
///
/// Invariant: `0 <= selection.start <= selection.end <= char_len(text)`.
/// Offsets are in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBufferState {
    text: String,
    selection: SelectionRange,
}

impl TextBufferState {
    /// Create a state with a collapsed selection at offset 0.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: SelectionRange::collapsed(0),
        }
    }

    /// Create a state with an explicit selection, validating the invariant.
    pub fn with_selection(
        text: impl Into<String>,
        selection: SelectionRange,
    ) -> Result<Self, StateError> {
        let text = text.into();
        let char_len = text.chars().count();
        if selection.start > selection.end || selection.end > char_len {
            return Err(StateError::InvalidSelection {
                start: selection.start,
                end: selection.end,
                char_len,
            });
        }
        Ok(Self { text, selection })
    }

    /// The buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The current selection.
    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    /// Character length of the buffer text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The substring covered by the selection.
    pub fn selected_text(&self) -> String {
        self.text
            .chars()
            .skip(self.selection.start)
            .take(self.selection.len())
            .collect()
    }
}
