//! Offset to line/column translation.
//!
//! Lines are separated by `\n` only, the same byte the classifier uses to
//! end a line comment. A `\r` before it is an ordinary byte. Columns count
//! bytes (UTF-8 code units), so they agree with scan offsets.
//!
//! For a single lookup use [`offset_to_position`]. When several offsets in
//! the same text are translated, build a [`LineOffsetTable`] once.

use std::fmt;

/// 1-based line and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Translate `offset` into a 1-based line and column.
///
/// `offset` may equal `text.len()` (the position just past the last byte).
/// Returns `None` beyond that.
pub fn offset_to_position(text: &str, offset: u32) -> Option<Position> {
    let bytes = text.as_bytes();
    let before = bytes.get(..offset as usize)?;

    let newlines = memchr::memchr_iter(b'\n', before).count();
    let line_start = memchr::memrchr(b'\n', before).map_or(0, |nl| nl + 1);

    Some(Position {
        line: saturating_u32(newlines + 1),
        column: saturating_u32(before.len() - line_start + 1),
    })
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Pre-computed line starts for O(log L) lookups.
///
/// # Example
///
/// ```
/// use brace_diagnostic::position::{LineOffsetTable, Position};
///
/// let table = LineOffsetTable::build("a {\n}\n");
/// assert_eq!(table.position(4), Some(Position { line: 2, column: 1 }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
    /// Length of the text the table was built from.
    len: u32,
}

impl LineOffsetTable {
    /// Scan `text` once for line breaks.
    pub fn build(text: &str) -> Self {
        let mut offsets = vec![0u32];
        for nl in memchr::memchr_iter(b'\n', text.as_bytes()) {
            // Offsets past u32::MAX are never produced by the scanner.
            let Ok(start) = u32::try_from(nl + 1) else {
                break;
            };
            offsets.push(start);
        }
        LineOffsetTable {
            offsets,
            len: saturating_u32(text.len()),
        }
    }

    /// Same result as [`offset_to_position`] for the text this table was
    /// built from.
    pub fn position(&self, offset: u32) -> Option<Position> {
        if offset > self.len {
            return None;
        }
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        Some(Position {
            line: saturating_u32(line_idx + 1),
            column: offset - self.offsets[line_idx] + 1,
        })
    }

    /// Offset of the first byte of `line` (1-based).
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.offsets.get(idx).copied()
    }

    /// Byte range of `line` without its terminating `\n`.
    pub fn line_range(&self, line: u32) -> Option<std::ops::Range<u32>> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map_or(self.len, |next| next - 1);
        Some(start..end)
    }

    /// Number of lines. A trailing `\n` starts an (empty) final line.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
