//! The edit-operation processor.
//!
//! [`apply_edit`] is a pure, deterministic function of
//! `(state, operation, clipboard)`. It never mutates the input state; it
//! returns a replacement state, or `None` when the operation is not
//! applicable at all. Operations never raise. Backspace at offset 0 and
//! Delete at the end of the buffer are still "applied" and reproduce the
//! state unchanged; only Copy, a collapsed Cut and an empty Paste yield
//! `None`.
//!
//! Copy is deliberately asymmetric: it writes the clipboard (the one external
//! effect this module has) yet still returns `None`, because the buffer
//! itself is unchanged.

use crate::clipboard::Clipboard;
use crate::state::{SelectionRange, TextBufferState};
use ropey::Rope;

/// One of the closed set of text/clipboard-affecting intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert text at the caret, replacing the selection if non-collapsed.
    Insert(String),
    /// Delete one character before the caret, or the selection.
    Backspace,
    /// Delete one character after the caret, or the selection.
    Delete,
    /// Write the selected substring to the clipboard. Never changes the buffer.
    Copy,
    /// Write the selected substring to the clipboard and delete it.
    Cut,
    /// Insert the clipboard text like [`EditOp::Insert`].
    Paste {
        /// Strip all `\n` characters from the clipboard text before inserting
        /// (single-line fields).
        skip_newlines: bool,
    },
}

/// Apply `op` to `state`, returning the replacement state.
///
/// `None` means "nothing to apply": the buffer text and selection are
/// unchanged and the caller should keep the current state. Copy and a
/// collapsed-selection Cut are the canonical `None` cases; Copy still writes
/// the clipboard, Cut does not.
pub fn apply_edit(
    state: &TextBufferState,
    op: &EditOp,
    clipboard: &mut dyn Clipboard,
) -> Option<TextBufferState> {
    let selection = state.selection();
    match op {
        EditOp::Insert(text) => Some(replace_selection(state, text)),
        EditOp::Backspace => {
            if selection.is_collapsed() {
                if selection.start == 0 {
                    // At the start of the buffer there is nothing to delete;
                    // the state is reproduced unchanged.
                    return Some(state.clone());
                }
                Some(splice(
                    state,
                    SelectionRange::new(selection.start - 1, selection.start),
                    "",
                    selection.start - 1,
                ))
            } else {
                Some(splice(state, selection, "", selection.start))
            }
        }
        EditOp::Delete => {
            if selection.is_collapsed() {
                if selection.start >= state.char_len() {
                    return Some(state.clone());
                }
                Some(splice(
                    state,
                    SelectionRange::new(selection.start, selection.start + 1),
                    "",
                    selection.start,
                ))
            } else {
                Some(splice(state, selection, "", selection.start))
            }
        }
        EditOp::Copy => {
            let selected = state.selected_text();
            if selection.is_collapsed() || selected.is_empty() {
                return None;
            }
            clipboard.set_text(&selected);
            None
        }
        EditOp::Cut => {
            let selected = state.selected_text();
            if selection.is_collapsed() || selected.is_empty() {
                return None;
            }
            clipboard.set_text(&selected);
            Some(splice(state, selection, "", selection.start))
        }
        EditOp::Paste { skip_newlines } => {
            let mut payload = clipboard.get_text().unwrap_or_default();
            if *skip_newlines {
                payload.retain(|c| c != '\n');
            }
            if payload.is_empty() {
                return None;
            }
            Some(replace_selection(state, &payload))
        }
    }
}

/// Replace the selection with `text`; the selection collapses after it.
fn replace_selection(state: &TextBufferState, text: &str) -> TextBufferState {
    let selection = state.selection();
    let caret = selection.start + text.chars().count();
    splice(state, selection, text, caret)
}

/// Splice `replacement` over `range` (char offsets) and collapse the
/// selection at `caret`.
fn splice(
    state: &TextBufferState,
    range: SelectionRange,
    replacement: &str,
    caret: usize,
) -> TextBufferState {
    // Rope gives char-indexed insert/remove; buffer texts here are small
    // enough that rebuilding one per edit is immaterial.
    let mut rope = Rope::from_str(state.text());
    if range.start < range.end {
        rope.remove(range.start..range.end);
    }
    if !replacement.is_empty() {
        rope.insert(range.start, replacement);
    }
    TextBufferState::with_selection(rope.to_string(), SelectionRange::collapsed(caret))
        .expect("spliced selection is within bounds")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;

    fn state(text: &str, start: usize, end: usize) -> TextBufferState {
        TextBufferState::with_selection(text, SelectionRange::new(start, end)).unwrap()
    }

    #[test]
    fn test_insert_at_collapsed_caret() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(
            &state("abc", 1, 1),
            &EditOp::Insert("X".to_string()),
            &mut clipboard,
        )
        .unwrap();
        assert_eq!(next.text(), "aXbc");
        assert_eq!(next.selection(), SelectionRange::collapsed(2));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(
            &state("abcd", 1, 3),
            &EditOp::Insert("X".to_string()),
            &mut clipboard,
        )
        .unwrap();
        assert_eq!(next.text(), "aXd");
        assert_eq!(next.selection(), SelectionRange::collapsed(2));
    }

    #[test]
    fn test_backspace_collapsed() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(&state("abc", 1, 1), &EditOp::Backspace, &mut clipboard).unwrap();
        assert_eq!(next.text(), "bc");
        assert_eq!(next.selection(), SelectionRange::collapsed(0));
    }

    #[test]
    fn test_backspace_at_start_is_a_no_op() {
        let mut clipboard = MemoryClipboard::new();
        let before = state("abc", 0, 0);
        let next = apply_edit(&before, &EditOp::Backspace, &mut clipboard).unwrap();
        assert_eq!(next, before);
    }

    #[test]
    fn test_delete_collapsed() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(&state("abc", 1, 1), &EditOp::Delete, &mut clipboard).unwrap();
        assert_eq!(next.text(), "ac");
        assert_eq!(next.selection(), SelectionRange::collapsed(1));
    }

    #[test]
    fn test_delete_at_end_is_a_no_op() {
        let mut clipboard = MemoryClipboard::new();
        let before = state("abc", 3, 3);
        let next = apply_edit(&before, &EditOp::Delete, &mut clipboard).unwrap();
        assert_eq!(next, before);
    }

    #[test]
    fn test_copy_collapsed_returns_none_and_keeps_clipboard() {
        let mut clipboard = MemoryClipboard::with_text("before");
        assert_eq!(
            apply_edit(&state("abc", 1, 1), &EditOp::Copy, &mut clipboard),
            None
        );
        assert_eq!(clipboard.get_text().as_deref(), Some("before"));
    }

    #[test]
    fn test_cut_collapsed_returns_none_and_keeps_clipboard() {
        let mut clipboard = MemoryClipboard::with_text("before");
        assert_eq!(
            apply_edit(&state("abc", 1, 1), &EditOp::Cut, &mut clipboard),
            None
        );
        assert_eq!(clipboard.get_text().as_deref(), Some("before"));
    }

    #[test]
    fn test_copy_writes_clipboard_without_buffer_change() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(
            apply_edit(&state("abcd", 1, 3), &EditOp::Copy, &mut clipboard),
            None
        );
        assert_eq!(clipboard.get_text().as_deref(), Some("bc"));
    }

    #[test]
    fn test_cut_deletes_and_writes_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(&state("abcd", 1, 3), &EditOp::Cut, &mut clipboard).unwrap();
        assert_eq!(next.text(), "ad");
        assert_eq!(next.selection(), SelectionRange::collapsed(1));
        assert_eq!(clipboard.get_text().as_deref(), Some("bc"));
    }

    #[test]
    fn test_paste_inserts_clipboard_text() {
        let mut clipboard = MemoryClipboard::with_text("XY");
        let next = apply_edit(
            &state("ab", 1, 1),
            &EditOp::Paste {
                skip_newlines: false,
            },
            &mut clipboard,
        )
        .unwrap();
        assert_eq!(next.text(), "aXYb");
        assert_eq!(next.selection(), SelectionRange::collapsed(3));
    }

    #[test]
    fn test_paste_skip_newlines_strips_and_may_no_op() {
        let mut clipboard = MemoryClipboard::with_text("X\nY\n");
        let next = apply_edit(
            &state("ab", 1, 1),
            &EditOp::Paste {
                skip_newlines: true,
            },
            &mut clipboard,
        )
        .unwrap();
        assert_eq!(next.text(), "aXYb");

        let mut newline_only = MemoryClipboard::with_text("\n\n");
        assert_eq!(
            apply_edit(
                &state("ab", 1, 1),
                &EditOp::Paste {
                    skip_newlines: true
                },
                &mut newline_only,
            ),
            None
        );
    }

    #[test]
    fn test_paste_empty_clipboard_is_not_applicable() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(
            apply_edit(
                &state("ab", 1, 1),
                &EditOp::Paste {
                    skip_newlines: false
                },
                &mut clipboard,
            ),
            None
        );
    }

    #[test]
    fn test_edits_are_character_based_on_multibyte_text() {
        let mut clipboard = MemoryClipboard::new();
        let next = apply_edit(&state("你好ab", 2, 2), &EditOp::Backspace, &mut clipboard).unwrap();
        assert_eq!(next.text(), "你ab");
        assert_eq!(next.selection(), SelectionRange::collapsed(1));
    }
}
