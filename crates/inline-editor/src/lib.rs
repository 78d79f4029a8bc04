#![warn(missing_docs)]
//! Inline Editor - Headless Structural Text-Editing Kernel
//!
//! # Overview
//!
//! `inline-editor` is a small, self-contained editor kernel for inline fields:
//! an edit-operation processor over an immutable text/selection state, a
//! pluggable tokenizer contract that turns raw text into lines of typed
//! tokens, and a bidirectional mapping between linear string offsets and
//! structural `(row, column)` caret coordinates. It does no rendering and
//! owns no windows; an upper layer draws the tokens and feeds resolved key
//! events back in.
//!
//! Each [`EditorSurface`] is one editable field. Specialized fields (a
//! structural URL editor, macro-aware text, header/form name=value pairs) are
//! surfaces with a different [`Tokenizer`] plugged in — see the
//! `inline-editor-tokenizers` crate.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Host Editor Surface (EditorSurface)        │  ← Input mediation & signals
//! ├─────────────────────────────────────────────┤
//! │  Coordinate Mapper (caret)                  │  ← Offset ↔ (row, column)
//! ├─────────────────────────────────────────────┤
//! │  Specialized Tokenizers (plug-ins)          │  ← Visual structure
//! ├─────────────────────────────────────────────┤
//! │  Token/Line Model (tokens)                  │  ← Offset bookkeeping
//! ├─────────────────────────────────────────────┤
//! │  Edit Operation Processor (ops)             │  ← Pure state transitions
//! ├─────────────────────────────────────────────┤
//! │  TextBufferState (state)                    │  ← Immutable snapshots
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Design points
//!
//! - Every text change discards and rebuilds the whole token/line structure.
//!   Incremental re-tokenization is an accepted non-goal, not an oversight.
//! - The processor signals "not applicable" with `None`, never by raising.
//! - Configuration errors (invalid selections) fail fast; malformed *input*
//!   never does — tokenizers are total over arbitrary strings.
//!
//! # Quick Start
//!
//! ```rust
//! use inline_editor::{
//!     EditOp, EditorOptions, EditorSurface, Key, MemoryClipboard, PlainTokenizer,
//!     SelectionRange, TextBufferState, apply_edit,
//! };
//!
//! // The processor is a pure function over immutable states.
//! let mut clipboard = MemoryClipboard::new();
//! let state = TextBufferState::with_selection("abc", SelectionRange::collapsed(1)).unwrap();
//! let next = apply_edit(&state, &EditOp::Insert("X".to_string()), &mut clipboard).unwrap();
//! assert_eq!(next.text(), "aXbc");
//!
//! // The surface wires the processor, a tokenizer and the caret mapper
//! // together behind key events.
//! let mut surface = EditorSurface::new(Box::new(PlainTokenizer), EditorOptions::default());
//! surface.focus_gained();
//! surface.handle_key(Key::Char('a'), &mut clipboard);
//! assert_eq!(surface.text(), "a");
//! ```
//!
//! # Module Description
//!
//! - [`state`] - immutable text/selection snapshots
//! - [`ops`] - the pure edit-operation processor
//! - [`tokens`] - token/line model and the [`Tokenizer`] contract
//! - [`caret`] - linear offset ↔ caret coordinate mapping
//! - [`surface`] - the host editor surface
//! - [`clipboard`] / [`macros`] - injected external collaborators

pub mod caret;
pub mod clipboard;
pub mod macros;
pub mod ops;
pub mod state;
pub mod surface;
pub mod tokens;

pub use caret::{
    CaretPosition, SelectionInterval, SeparatorPolicy, to_caret_position, to_linear_offset,
};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use macros::{MacroProvider, StaticMacros};
pub use ops::{EditOp, apply_edit};
pub use state::{SelectionRange, StateError, TextBufferState};
pub use surface::{
    ContextMenuState, EditorOptions, EditorSurface, FocusLeaveDirection, Key, KeyResponse,
    PasteHook, SignalCallback, SurfaceSignal, TextFilter,
};
pub use tokens::{
    Line, PlainTokenizer, Token, TokenKind, Tokenization, Tokenizer, assign_line_offsets,
};
