//! The host editor surface.
//!
//! [`EditorSurface`] owns the current text and selection, invokes the active
//! tokenizer, applies the edit-operation processor in response to input,
//! repositions the caret, and emits change/navigation signals. One surface is
//! one inline field; composite controls (method+URL, header name+value) are
//! built from several surfaces wired together through the
//! [`SurfaceSignal::FocusLeaveRequested`] protocol.
//!
//! # Signal model
//!
//! Two kinds of text signals exist:
//!
//! - [`SurfaceSignal::InputChanged`] is the *live* signal. It is queued on
//!   every text replacement and delivered on the next
//!   [`poll_signals`](EditorSurface::poll_signals) call — the headless
//!   analogue of a next-tick deferred emit.
//! - [`SurfaceSignal::ChangeCommitted`] is the *commit* signal. It fires
//!   synchronously on focus loss, and only when the text differs from the
//!   snapshot captured at focus gain.
//!
//! # Example
//!
//! ```rust
//! use inline_editor::{EditorOptions, EditorSurface, Key, MemoryClipboard, PlainTokenizer};
//!
//! let mut surface = EditorSurface::new(Box::new(PlainTokenizer), EditorOptions::default());
//! let mut clipboard = MemoryClipboard::new();
//!
//! surface.focus_gained();
//! surface.handle_key(Key::Char('h'), &mut clipboard);
//! surface.handle_key(Key::Char('i'), &mut clipboard);
//! assert_eq!(surface.text(), "hi");
//! ```

use crate::caret::{
    CaretPosition, SelectionInterval, SeparatorPolicy, to_caret_position, to_linear_offset,
};
use crate::clipboard::Clipboard;
use crate::ops::{EditOp, apply_edit};
use crate::state::{SelectionRange, TextBufferState};
use crate::tokens::{Line, Token, TokenKind, Tokenizer, assign_line_offsets};
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

/// Direction carried by a focus-leave request.
///
/// Raised instead of a no-op keystroke when an arrow key is pressed at a
/// buffer boundary (or Backspace on an already-empty buffer); a parent
/// composite control consumes it to move focus to the adjacent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusLeaveDirection {
    /// ArrowUp at row 0.
    Up,
    /// ArrowDown at the last row.
    Down,
    /// ArrowLeft at the start of the content.
    Left,
    /// ArrowRight at the end of the content.
    Right,
    /// Backspace on an empty buffer.
    Backspace,
}

/// Signals emitted by an [`EditorSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSignal {
    /// The text changed (live signal, delivered deferred via
    /// [`EditorSurface::poll_signals`]).
    InputChanged,
    /// Focus was lost with text differing from the focus-gain snapshot.
    ChangeCommitted {
        /// The committed text.
        text: String,
    },
    /// The caret hit a boundary; the parent should move focus.
    FocusLeaveRequested(FocusLeaveDirection),
    /// Enter was pressed on a surface configured to submit.
    SubmitRequested,
}

/// Callback invoked for every delivered [`SurfaceSignal`].
pub type SignalCallback = Box<dyn FnMut(&SurfaceSignal)>;

/// A key event, already resolved from whatever raw input the embedder has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// ArrowUp.
    Up,
    /// ArrowDown.
    Down,
    /// ArrowLeft.
    Left,
    /// ArrowRight.
    Right,
    /// Enter.
    Enter,
    /// Tab.
    Tab,
    /// Ctrl/Cmd+Z.
    Undo,
    /// Ctrl/Cmd+C.
    Copy,
    /// Ctrl/Cmd+X.
    Cut,
    /// Ctrl/Cmd+V.
    Paste,
}

/// Whether a key event was handled by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// The surface handled the key; the embedder must suppress the default
    /// action.
    Consumed,
    /// The key passes through unhandled.
    Ignored,
}

/// Availability of the context-menu clipboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuState {
    /// Copy is enabled iff the selection is non-collapsed.
    pub can_copy: bool,
    /// Cut additionally requires a writable surface.
    pub can_cut: bool,
    /// Paste requires non-empty clipboard text and a writable surface.
    pub can_paste: bool,
}

/// Per-instance configuration, supplied through the constructor.
///
/// All of this is per-field state; nothing here is global (see the design
/// note on singletons). The clipboard is the one process-wide collaborator
/// and is injected per call instead.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Enter inserts `\n` when set. Also controls whether Paste strips
    /// newlines (single-line fields skip them).
    pub multi_line: bool,
    /// Enter raises [`SurfaceSignal::SubmitRequested`] instead of inserting.
    /// Takes precedence over `multi_line`.
    pub submit_on_enter: bool,
    /// Whether a space character may be typed (disabled for single-token
    /// fields such as an HTTP-method editor).
    pub allow_space: bool,
    /// Literal string inserted on Tab; `None` lets Tab pass through.
    pub tab_insert: Option<String>,
    /// Text rendered dimmed while the field is empty and unfocused.
    pub placeholder: String,
    /// Content stays visible/selectable/copyable, but every mutating
    /// operation is refused.
    pub read_only: bool,
    /// Removes all interactivity and focusability.
    pub disabled: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            multi_line: false,
            submit_on_enter: false,
            allow_space: true,
            tab_insert: None,
            placeholder: String::new(),
            read_only: false,
            disabled: false,
        }
    }
}

/// Sanitizer applied to text before it enters the buffer (e.g. an HTTP-method
/// field upper-casing and truncating its content).
pub type TextFilter = Box<dyn Fn(&str) -> String>;

/// Paste-interception hook. Invoked with the raw clipboard text before a
/// paste is applied; returning `false` means the hook fully handled the
/// paste and the default insertion is suppressed.
pub type PasteHook = Box<dyn FnMut(&str) -> bool>;

/// One inline editable field: state owner and input mediator.
pub struct EditorSurface {
    options: EditorOptions,
    tokenizer: Box<dyn Tokenizer>,
    state: TextBufferState,
    lines: Vec<Line>,
    macro_names: BTreeSet<String>,
    placeholder_shown: bool,
    focused: bool,
    /// Text captured at the most recent focus gain; backs both the commit
    /// signal and the single-level undo.
    focus_snapshot: Option<String>,
    callbacks: Vec<SignalCallback>,
    deferred: VecDeque<SurfaceSignal>,
    text_filter: Option<TextFilter>,
    paste_hook: Option<PasteHook>,
}

impl EditorSurface {
    /// Create an empty surface with the given tokenizer and options.
    pub fn new(tokenizer: Box<dyn Tokenizer>, options: EditorOptions) -> Self {
        let mut surface = Self {
            options,
            tokenizer,
            state: TextBufferState::new(""),
            lines: Vec::new(),
            macro_names: BTreeSet::new(),
            placeholder_shown: false,
            focused: false,
            focus_snapshot: None,
            callbacks: Vec::new(),
            deferred: VecDeque::new(),
            text_filter: None,
            paste_hook: None,
        };
        surface.rebuild_lines();
        surface
    }

    /// Create a surface pre-filled with `text`.
    pub fn with_text(
        tokenizer: Box<dyn Tokenizer>,
        options: EditorOptions,
        text: &str,
    ) -> Self {
        let mut surface = Self::new(tokenizer, options);
        surface.set_text(text);
        surface.deferred.clear();
        surface
    }

    /// Subscribe to surface signals.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SurfaceSignal) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Install the text filter/sanitizer applied before every tokenize.
    pub fn set_text_filter<F>(&mut self, filter: F)
    where
        F: Fn(&str) -> String + 'static,
    {
        self.text_filter = Some(Box::new(filter));
        let filtered = self.apply_filter(self.state.text());
        if filtered != self.state.text() {
            self.set_text(&filtered);
        }
    }

    /// Install the paste-interception hook.
    pub fn set_paste_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&str) -> bool + 'static,
    {
        self.paste_hook = Some(Box::new(hook));
    }

    /// Replace the active tokenizer and rebuild the line structure.
    pub fn set_tokenizer(&mut self, tokenizer: Box<dyn Tokenizer>) {
        self.tokenizer = tokenizer;
        self.rebuild_lines();
    }

    /// The current text. Returns `""` while the placeholder is showing.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    /// The current buffer state.
    pub fn state(&self) -> &TextBufferState {
        &self.state
    }

    /// The rendered lines from the last tokenize pass.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Distinct macro names from the last tokenize pass.
    pub fn macro_names(&self) -> &BTreeSet<String> {
        &self.macro_names
    }

    /// Whether the placeholder token is currently rendered.
    pub fn is_placeholder_shown(&self) -> bool {
        self.placeholder_shown
    }

    /// The active tokenizer's separator policy.
    pub fn separator_policy(&self) -> SeparatorPolicy {
        self.tokenizer.separator_policy()
    }

    /// Current per-instance options.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Toggle read-only.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.options.read_only = read_only;
    }

    /// Toggle disabled. A disabled surface ignores every input event.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Replace the text, running the filter and re-tokenizing.
    ///
    /// The selection is clamped into the new text; an `InputChanged` signal is
    /// queued for the next [`poll_signals`](Self::poll_signals) call.
    pub fn set_text(&mut self, text: &str) {
        let filtered = self.apply_filter(text);
        let char_len = filtered.chars().count();
        let old = self.state.selection();
        let selection = SelectionRange::new(old.start.min(char_len), old.end.min(char_len));
        let changed = filtered != self.state.text();
        self.state = TextBufferState::with_selection(filtered, selection)
            .expect("clamped selection is within bounds");
        self.rebuild_lines();
        if changed {
            trace!(len = char_len, "surface text replaced");
            self.queue_input_changed();
        }
    }

    /// The current selection in linear character offsets.
    pub fn selection(&self) -> SelectionRange {
        self.state.selection()
    }

    /// Set the selection in linear character offsets (clamped).
    pub fn set_selection(&mut self, selection: SelectionRange) {
        let char_len = self.state.char_len();
        let clamped =
            SelectionRange::new(selection.start.min(char_len), selection.end.min(char_len));
        self.state = TextBufferState::with_selection(self.state.text().to_string(), clamped)
            .expect("clamped selection is within bounds");
    }

    /// Collapse the selection at `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(SelectionRange::collapsed(offset));
    }

    /// The caret as a structural coordinate (the selection's active end).
    pub fn caret_position(&self) -> CaretPosition {
        to_caret_position(
            &self.lines,
            self.state.selection().end,
            self.separator_policy(),
        )
    }

    /// Place the caret at a structural coordinate (sentinels resolve).
    pub fn set_caret_position(&mut self, position: CaretPosition) {
        let offset = to_linear_offset(&self.lines, position, self.separator_policy());
        self.set_caret(offset);
    }

    /// The selection in caret coordinates.
    pub fn selection_interval(&self) -> SelectionInterval {
        let selection = self.state.selection();
        let policy = self.separator_policy();
        SelectionInterval::new(
            to_caret_position(&self.lines, selection.start, policy),
            to_caret_position(&self.lines, selection.end, policy),
        )
    }

    /// Set the selection from caret coordinates.
    pub fn set_selection_interval(&mut self, interval: SelectionInterval) {
        let policy = self.separator_policy();
        let a = to_linear_offset(&self.lines, interval.start, policy);
        let b = to_linear_offset(&self.lines, interval.end, policy);
        self.set_selection(SelectionRange::new(a.min(b), a.max(b)));
    }

    /// Place the caret at the start of the content (used when focus arrives
    /// via Right/Down from a sibling field).
    pub fn caret_to_start(&mut self) {
        self.set_caret(0);
    }

    /// Place the caret at the end of the content (used when focus arrives via
    /// Left/Backspace/Up from a sibling field).
    pub fn caret_to_end(&mut self) {
        self.set_caret(self.state.char_len());
    }

    /// Deliver any deferred signals to subscribers. The embedder calls this
    /// once per tick.
    pub fn poll_signals(&mut self) {
        while let Some(signal) = self.deferred.pop_front() {
            self.notify(&signal);
        }
    }

    /// Focus entered this surface.
    pub fn focus_gained(&mut self) {
        if self.options.disabled {
            return;
        }
        trace!("surface focus gained");
        self.focused = true;
        self.focus_snapshot = Some(self.state.text().to_string());
        self.rebuild_lines();
    }

    /// Focus left this surface. Emits the commit signal when the text differs
    /// from the focus-gain snapshot.
    pub fn focus_lost(&mut self) {
        self.focused = false;
        if let Some(snapshot) = self.focus_snapshot.take() {
            if snapshot != self.state.text() {
                let text = self.state.text().to_string();
                debug!(len = text.chars().count(), "surface change committed");
                self.notify(&SurfaceSignal::ChangeCommitted { text });
            }
        }
        self.rebuild_lines();
    }

    /// Notify the embedder that macro values changed; re-tokenizes so
    /// suppression flags refresh. Stale flags last at most until this call.
    pub fn macros_changed(&mut self) {
        trace!("macro values changed, re-tokenizing");
        self.rebuild_lines();
    }

    /// Availability of the clipboard context-menu actions.
    pub fn context_menu_state(&self, clipboard: &mut dyn Clipboard) -> ContextMenuState {
        let writable = !self.options.read_only && !self.options.disabled;
        let has_selection = !self.state.selection().is_collapsed();
        ContextMenuState {
            can_copy: has_selection,
            can_cut: has_selection && writable,
            can_paste: clipboard.has_text() && writable,
        }
    }

    /// Process one key event.
    ///
    /// [`KeyResponse::Consumed`] means the default action must be suppressed;
    /// boundary arrow keys consume the event *and* raise a focus-leave signal
    /// instead of moving the caret.
    pub fn handle_key(&mut self, key: Key, clipboard: &mut dyn Clipboard) -> KeyResponse {
        if self.options.disabled {
            return KeyResponse::Ignored;
        }
        match key {
            Key::Left => self.handle_left(),
            Key::Right => self.handle_right(),
            Key::Up => self.handle_up(),
            Key::Down => self.handle_down(),
            Key::Backspace => {
                if self.state.char_len() == 0 {
                    self.request_focus_leave(FocusLeaveDirection::Backspace);
                    return KeyResponse::Consumed;
                }
                if self.options.read_only {
                    return KeyResponse::Ignored;
                }
                self.apply_op(&EditOp::Backspace, clipboard)
            }
            Key::Delete => {
                if self.options.read_only {
                    return KeyResponse::Ignored;
                }
                self.apply_op(&EditOp::Delete, clipboard)
            }
            Key::Char(c) => {
                if self.options.read_only {
                    return KeyResponse::Ignored;
                }
                if c == ' ' && !self.options.allow_space {
                    // Swallowed, not passed through: the field simply does
                    // not accept spaces.
                    return KeyResponse::Consumed;
                }
                if c == '\n' {
                    return self.handle_enter(clipboard);
                }
                self.apply_op(&EditOp::Insert(c.to_string()), clipboard)
            }
            Key::Enter => self.handle_enter(clipboard),
            Key::Tab => match self.options.tab_insert.clone() {
                Some(tab) if !self.options.read_only => {
                    self.apply_op(&EditOp::Insert(tab), clipboard)
                }
                _ => KeyResponse::Ignored,
            },
            Key::Undo => self.handle_undo(),
            Key::Copy => {
                // Copy is permitted on read-only surfaces.
                if self.state.selection().is_collapsed() {
                    return KeyResponse::Ignored;
                }
                let _ = apply_edit(&self.state, &EditOp::Copy, clipboard);
                KeyResponse::Consumed
            }
            Key::Cut => {
                if self.options.read_only {
                    return KeyResponse::Ignored;
                }
                self.apply_op(&EditOp::Cut, clipboard)
            }
            Key::Paste => self.handle_paste(clipboard),
        }
    }

    fn handle_left(&mut self) -> KeyResponse {
        let selection = self.state.selection();
        if !selection.is_collapsed() {
            self.set_caret(selection.start);
            return KeyResponse::Consumed;
        }
        if selection.start == 0 {
            self.request_focus_leave(FocusLeaveDirection::Left);
            return KeyResponse::Consumed;
        }
        let offset = prev_grapheme_offset(self.state.text(), selection.start);
        self.set_caret(offset);
        KeyResponse::Consumed
    }

    fn handle_right(&mut self) -> KeyResponse {
        let selection = self.state.selection();
        if !selection.is_collapsed() {
            self.set_caret(selection.end);
            return KeyResponse::Consumed;
        }
        if selection.end >= self.state.char_len() {
            self.request_focus_leave(FocusLeaveDirection::Right);
            return KeyResponse::Consumed;
        }
        let offset = next_grapheme_offset(self.state.text(), selection.end);
        self.set_caret(offset);
        KeyResponse::Consumed
    }

    fn handle_up(&mut self) -> KeyResponse {
        let caret = self.caret_position();
        if caret.row <= 0 {
            self.request_focus_leave(FocusLeaveDirection::Up);
            return KeyResponse::Consumed;
        }
        self.set_caret_position(CaretPosition::new(caret.row - 1, caret.column));
        KeyResponse::Consumed
    }

    fn handle_down(&mut self) -> KeyResponse {
        let caret = self.caret_position();
        let last_row = self.lines.len().saturating_sub(1) as i32;
        if caret.row >= last_row {
            self.request_focus_leave(FocusLeaveDirection::Down);
            return KeyResponse::Consumed;
        }
        self.set_caret_position(CaretPosition::new(caret.row + 1, caret.column));
        KeyResponse::Consumed
    }

    fn handle_enter(&mut self, clipboard: &mut dyn Clipboard) -> KeyResponse {
        if self.options.submit_on_enter {
            debug!("surface submit requested");
            self.notify(&SurfaceSignal::SubmitRequested);
            return KeyResponse::Consumed;
        }
        if self.options.multi_line && !self.options.read_only {
            return self.apply_op(&EditOp::Insert("\n".to_string()), clipboard);
        }
        KeyResponse::Ignored
    }

    fn handle_undo(&mut self) -> KeyResponse {
        if self.options.read_only {
            return KeyResponse::Ignored;
        }
        let Some(snapshot) = self.focus_snapshot.clone() else {
            return KeyResponse::Ignored;
        };
        if snapshot != self.state.text() {
            debug!("surface undo to focus snapshot");
            let char_len = snapshot.chars().count();
            self.state =
                TextBufferState::with_selection(snapshot, SelectionRange::collapsed(char_len))
                    .expect("caret at end is within bounds");
            self.rebuild_lines();
            self.queue_input_changed();
        }
        KeyResponse::Consumed
    }

    fn handle_paste(&mut self, clipboard: &mut dyn Clipboard) -> KeyResponse {
        if self.options.read_only {
            return KeyResponse::Ignored;
        }
        let Some(raw) = clipboard.get_text().filter(|text| !text.is_empty()) else {
            return KeyResponse::Ignored;
        };
        if let Some(hook) = &mut self.paste_hook {
            if !hook(&raw) {
                debug!("paste intercepted by hook");
                return KeyResponse::Consumed;
            }
        }
        let skip_newlines = !self.options.multi_line;
        self.apply_op(&EditOp::Paste { skip_newlines }, clipboard)
    }

    /// Run an operation through the processor and adopt the result.
    fn apply_op(&mut self, op: &EditOp, clipboard: &mut dyn Clipboard) -> KeyResponse {
        let Some(next) = apply_edit(&self.state, op, clipboard) else {
            return KeyResponse::Ignored;
        };
        self.adopt_state(next);
        KeyResponse::Consumed
    }

    /// Adopt a processor-produced state, re-running the filter and
    /// re-tokenizing when the text changed.
    fn adopt_state(&mut self, next: TextBufferState) {
        let changed = next.text() != self.state.text();
        let filtered = self.apply_filter(next.text());
        if filtered != next.text() {
            let char_len = filtered.chars().count();
            let selection = next.selection();
            let clamped =
                SelectionRange::new(selection.start.min(char_len), selection.end.min(char_len));
            self.state = TextBufferState::with_selection(filtered, clamped)
                .expect("clamped selection is within bounds");
        } else {
            self.state = next;
        }
        if changed {
            self.rebuild_lines();
            self.queue_input_changed();
        }
    }

    fn apply_filter(&self, text: &str) -> String {
        match &self.text_filter {
            Some(filter) => filter(text),
            None => text.to_string(),
        }
    }

    /// Full rebuild of the line structure. Every call discards and recreates
    /// all lines and tokens; nothing is recycled.
    fn rebuild_lines(&mut self) {
        let text = self.state.text();
        self.placeholder_shown =
            text.is_empty() && !self.focused && !self.options.placeholder.is_empty();
        if self.placeholder_shown {
            self.lines = vec![Line::with_tokens(vec![Token::new(
                self.options.placeholder.clone(),
                TokenKind::Suppressed,
            )])];
            assign_line_offsets(&mut self.lines);
            self.macro_names = BTreeSet::new();
            return;
        }
        let mut tokenization = self.tokenizer.tokenize(text);
        assign_line_offsets(&mut tokenization.lines);
        self.lines = tokenization.lines;
        self.macro_names = tokenization.macro_names;
    }

    fn request_focus_leave(&mut self, direction: FocusLeaveDirection) {
        trace!(?direction, "surface focus leave requested");
        self.notify(&SurfaceSignal::FocusLeaveRequested(direction));
    }

    fn queue_input_changed(&mut self) {
        if self.deferred.back() != Some(&SurfaceSignal::InputChanged) {
            self.deferred.push_back(SurfaceSignal::InputChanged);
        }
    }

    fn notify(&mut self, signal: &SurfaceSignal) {
        for callback in &mut self.callbacks {
            callback(signal);
        }
    }
}

/// Largest grapheme boundary strictly before `offset` (char offsets).
fn prev_grapheme_offset(text: &str, offset: usize) -> usize {
    let mut previous = 0;
    let mut chars = 0;
    for grapheme in text.graphemes(true) {
        let next = chars + grapheme.chars().count();
        if next >= offset {
            return previous;
        }
        previous = next;
        chars = next;
    }
    previous
}

/// Smallest grapheme boundary strictly after `offset` (char offsets).
fn next_grapheme_offset(text: &str, offset: usize) -> usize {
    let mut chars = 0;
    for grapheme in text.graphemes(true) {
        chars += grapheme.chars().count();
        if chars > offset {
            return chars;
        }
    }
    chars
}
