//! Bidirectional mapping between linear character offsets and structural
//! `(row, column)` caret coordinates.
//!
//! Tokenizers disagree on whether their lines correspond to literal `\n`
//! characters in the source text. The default policy accounts for a virtual
//! one-character separator per line boundary (the `\n` that exists between
//! true text lines); tokenizers whose rows are synthetic (URL segments, query
//! pairs, record pairs) use the contiguous policy, because no separator
//! character exists between their rows.

use crate::tokens::Line;

/// How line boundaries relate to characters in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorPolicy {
    /// Lines are `\n`-delimited text lines; one virtual separator unit is
    /// injected per line boundary when mapping.
    #[default]
    NewlineSeparated,
    /// Lines are synthetic rows that concatenate directly; no separator unit
    /// exists between them.
    Contiguous,
}

impl SeparatorPolicy {
    /// Width in characters of the virtual separator between two lines.
    pub fn separator_width(self) -> usize {
        match self {
            SeparatorPolicy::NewlineSeparated => 1,
            SeparatorPolicy::Contiguous => 0,
        }
    }
}

/// A logical `(row, column)` coordinate within tokenized lines.
///
/// `row == -1` and `column == -1` are sentinels meaning "last row" and
/// "end of row"; use [`CaretPosition::end_of_text`] and
/// [`CaretPosition::end_of_row`] instead of writing the literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    /// Zero-based row, or `-1` for the last row.
    pub row: i32,
    /// Zero-based column in characters, or `-1` for the end of the row.
    pub column: i32,
}

impl CaretPosition {
    /// A concrete `(row, column)` coordinate.
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The end of the last row.
    pub fn end_of_text() -> Self {
        Self { row: -1, column: -1 }
    }

    /// The end of the given row.
    pub fn end_of_row(row: i32) -> Self {
        Self { row, column: -1 }
    }

    /// The start of the first row.
    pub fn start_of_text() -> Self {
        Self { row: 0, column: 0 }
    }

    /// Whether the row field is the "last row" sentinel.
    pub fn is_last_row(&self) -> bool {
        self.row < 0
    }

    /// Whether the column field is the "end of row" sentinel.
    pub fn is_end_of_row(&self) -> bool {
        self.column < 0
    }
}

/// A selection expressed in caret coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionInterval {
    /// Selection start.
    pub start: CaretPosition,
    /// Selection end.
    pub end: CaretPosition,
}

impl SelectionInterval {
    /// Create a selection interval.
    pub fn new(start: CaretPosition, end: CaretPosition) -> Self {
        Self { start, end }
    }

    /// A collapsed interval at `position`.
    pub fn collapsed(position: CaretPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }
}

/// Map a caret coordinate to a linear character offset.
///
/// The target line's own offset plus the column, plus one separator unit per
/// preceding line under [`SeparatorPolicy::NewlineSeparated`]. Sentinel rows
/// and columns resolve to the last row / end of row; out-of-range rows and
/// columns clamp.
pub fn to_linear_offset(lines: &[Line], caret: CaretPosition, policy: SeparatorPolicy) -> usize {
    if lines.is_empty() {
        return 0;
    }

    let last_row = lines.len() - 1;
    let row = if caret.is_last_row() {
        last_row
    } else {
        (caret.row as usize).min(last_row)
    };
    let line = &lines[row];
    let column = if caret.is_end_of_row() {
        line.len()
    } else {
        (caret.column as usize).min(line.len())
    };

    line.offset + policy.separator_width() * row + column
}

/// Map a linear character offset to a caret coordinate. The inverse of
/// [`to_linear_offset`].
///
/// One separator unit is consumed per line boundary crossed while locating
/// the owning line. An offset before the first line maps to `(0, 0)`; an
/// offset past the end maps to the end of the last row. Offsets at a line's
/// end resolve to that line rather than the start of the next.
pub fn to_caret_position(lines: &[Line], offset: usize, policy: SeparatorPolicy) -> CaretPosition {
    if lines.is_empty() {
        return CaretPosition::start_of_text();
    }

    let separator = policy.separator_width();
    for (row, line) in lines.iter().enumerate() {
        let start = line.offset + separator * row;
        if offset <= start + line.len() {
            let column = offset.saturating_sub(start);
            return CaretPosition::new(row as i32, column as i32);
        }
    }

    let last_row = lines.len() - 1;
    CaretPosition::new(last_row as i32, lines[last_row].len() as i32)
}
