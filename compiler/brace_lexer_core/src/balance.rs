//! Brace-balance tracking on top of the region classifier.
//!
//! Both scan modes share [`scan`]: a whole-file scan runs to end of text
//! with [`StopRule::EndOfText`], an anchored scan starts at an opening
//! brace with [`StopRule::Balanced`] and stops at its match. Imbalance and
//! unterminated constructs are reported as data. Only a bad anchor is an
//! error.

use memchr::memmem;
use tracing::{debug, trace};

use crate::region::{CharClass, LexState, Region};
use crate::SourceBuffer;

/// When [`scan`] stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopRule {
    /// Consume the whole text.
    EndOfText,
    /// Stop at the first structural `}` that brings depth back to zero
    /// after it went positive.
    Balanced,
}

/// Mutable state of one scan. Created fresh per scan and owned by the
/// caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Region classifier state.
    pub lex: LexState,
    /// Structural depth: opens minus closes so far. May go negative.
    pub depth: i64,
    /// Offset of the `}` that first took `depth` below zero. Write-once.
    pub first_negative: Option<u32>,
    /// Offsets of structural `{` that have not been matched yet, outermost
    /// first.
    pub open_stack: Vec<u32>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self, offset: u32) {
        self.depth += 1;
        self.open_stack.push(offset);
    }

    fn close(&mut self, offset: u32) {
        self.depth -= 1;
        if self.open_stack.pop().is_none() {
            trace!(offset, depth = self.depth, "closing brace without opener");
        }
        if self.depth < 0 && self.first_negative.is_none() {
            self.first_negative = Some(offset);
        }
    }
}

/// Scan `buffer` from `start`, updating `state`.
///
/// Returns the offset of the closing brace when `stop` is
/// [`StopRule::Balanced`] and the scan balanced; `None` otherwise.
pub fn scan(
    buffer: &SourceBuffer,
    start: u32,
    stop: StopRule,
    state: &mut ScanState,
) -> Option<u32> {
    let mut cursor = buffer.cursor_at(start);
    let mut went_positive = false;

    while !cursor.is_eof() {
        let offset = cursor.pos();
        match state.lex.step(cursor.current()) {
            CharClass::OpenBrace => {
                state.open(offset);
                went_positive |= state.depth > 0;
            }
            CharClass::CloseBrace => {
                state.close(offset);
                if stop == StopRule::Balanced && went_positive && state.depth == 0 {
                    return Some(offset);
                }
            }
            CharClass::Code
            | CharClass::Inert
            | CharClass::PlaceholderOpen
            | CharClass::PlaceholderClose => {}
        }
        cursor.advance();
    }
    None
}

/// Result of a whole-file scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceReport {
    /// Depth at end of text. Zero on success.
    pub final_depth: i64,
    /// First `}` that had no matching `{`.
    pub first_negative: Option<u32>,
    /// Structural `{` never closed, outermost first.
    pub unclosed: Vec<u32>,
    /// Region at end of text. Anything other than code or a line comment
    /// means a comment or string literal was left open.
    pub end_region: Region,
}

impl BalanceReport {
    /// `true` when depth ends at zero and never went negative.
    pub fn is_balanced(&self) -> bool {
        self.final_depth == 0 && self.first_negative.is_none()
    }
}

/// Scan all of `text`.
pub fn scan_whole_file(text: &str) -> BalanceReport {
    scan_buffer(&SourceBuffer::new(text))
}

/// Scan all of an already-built buffer.
#[tracing::instrument(level = "debug", skip_all, fields(len = buffer.len()))]
pub fn scan_buffer(buffer: &SourceBuffer) -> BalanceReport {
    let mut state = ScanState::new();
    scan(buffer, 0, StopRule::EndOfText, &mut state);

    let report = BalanceReport {
        final_depth: state.depth,
        first_negative: state.first_negative,
        unclosed: state.open_stack,
        end_region: state.lex.region(),
    };
    debug!(
        final_depth = report.final_depth,
        first_negative = ?report.first_negative,
        unclosed = report.unclosed.len(),
        end_region = %report.end_region,
        "whole-file scan finished"
    );
    report
}

/// Result of an anchored scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchoredScan {
    /// Offset of the opening brace the scan started from.
    pub anchor: u32,
    /// Offset of the matching `}`; `None` if end of text came first.
    pub closing: Option<u32>,
}

impl AnchoredScan {
    /// `true` when the matching `}` was found.
    pub fn is_terminated(&self) -> bool {
        self.closing.is_some()
    }
}

/// Why an anchor offset cannot start an anchored scan.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnchorError {
    #[error("anchor offset {offset} is out of bounds for a text of {len} bytes")]
    OutOfBounds { offset: u32, len: u32 },
    #[error("anchor offset {offset} holds {found:?}, not an opening brace")]
    NotOpenBrace { offset: u32, found: char },
    #[error("opening brace at offset {offset} is inside a {region}, not code")]
    NotStructural { offset: u32, region: Region },
}

/// Find the `}` matching the structural `{` at `anchor`.
///
/// The anchor is validated against a classification of the text from its
/// start; the scan itself then restarts in code at the anchor.
#[tracing::instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn scan_from_anchor(text: &str, anchor: u32) -> Result<AnchoredScan, AnchorError> {
    let buffer = SourceBuffer::new(text);
    validate_anchor(&buffer, anchor)?;

    let mut state = ScanState::new();
    let closing = scan(&buffer, anchor, StopRule::Balanced, &mut state);
    debug!(closing = ?closing, "anchored scan finished");
    Ok(AnchoredScan { anchor, closing })
}

fn validate_anchor(buffer: &SourceBuffer, anchor: u32) -> Result<(), AnchorError> {
    let bytes = buffer.as_bytes();
    let Some(&found) = bytes.get(anchor as usize) else {
        return Err(AnchorError::OutOfBounds {
            offset: anchor,
            len: buffer.len(),
        });
    };
    if found != b'{' {
        return Err(AnchorError::NotOpenBrace {
            offset: anchor,
            found: char::from(found),
        });
    }

    let mut lex = LexState::new();
    for &b in &bytes[..anchor as usize] {
        lex.step(b);
    }
    let region = lex.region();
    if lex.step(found) == CharClass::OpenBrace {
        Ok(())
    } else {
        Err(AnchorError::NotStructural {
            offset: anchor,
            region,
        })
    }
}

/// Offset of the first `{` at or after the first occurrence of `name`.
///
/// A plain substring search: `name` is not required to be a whole word and
/// the brace is not validated. [`scan_from_anchor`] does that.
pub fn locate_anchor(text: &str, name: &str) -> Option<u32> {
    let name_offset = find_name(text, name)?;
    brace_after(text, name_offset, name)
}

fn find_name(text: &str, name: &str) -> Option<u32> {
    let found = memmem::find(text.as_bytes(), name.as_bytes())?;
    u32::try_from(found).ok()
}

fn brace_after(text: &str, name_offset: u32, name: &str) -> Option<u32> {
    let from = name_offset as usize + name.len();
    let rel = memchr::memchr(b'{', text.as_bytes().get(from..)?)?;
    u32::try_from(from + rel).ok()
}

/// A named construct and its body braces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructMatch {
    /// Offset where `name` was found.
    pub name_offset: u32,
    /// Offset of the body's opening `{`.
    pub anchor: u32,
    /// Offset of the body's closing `}`; `None` when unterminated.
    pub closing: Option<u32>,
}

/// Why a named construct could not be scanned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FindError {
    #[error("`{name}` does not occur in the text")]
    NameNotFound { name: String },
    #[error("no opening brace follows `{name}` at offset {name_offset}")]
    NoOpeningBrace { name: String, name_offset: u32 },
    #[error(transparent)]
    Anchor(#[from] AnchorError),
}

/// Locate `name` and find the closing brace of the body that follows it.
pub fn find_construct(text: &str, name: &str) -> Result<ConstructMatch, FindError> {
    let name_offset = find_name(text, name).ok_or_else(|| FindError::NameNotFound {
        name: name.to_owned(),
    })?;
    let anchor = brace_after(text, name_offset, name).ok_or_else(|| FindError::NoOpeningBrace {
        name: name.to_owned(),
        name_offset,
    })?;
    let scanned = scan_from_anchor(text, anchor)?;
    Ok(ConstructMatch {
        name_offset,
        anchor,
        closing: scanned.closing,
    })
}
