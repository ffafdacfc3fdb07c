//! Sentinel-terminated source buffer for the region classifier.
//!
//! The buffer appends a `0x00` sentinel after the source content and pads
//! the allocation to the next 64-byte boundary. The cursor can therefore
//! read the current byte anywhere in the text, the end included, without a
//! separate bounds check.
//!
//! # Encoding Detection
//!
//! Construction also looks for encoding problems that make brace positions
//! misleading:
//! - UTF-8 BOM (shifts every column on line 1 by three code units)
//! - Interior null bytes (indistinguishable from the sentinel by value)
//!
//! Issues are recorded as [`EncodingIssue`] values and never stop a scan.
//! The diagnostic layer turns them into warnings.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated copy of the text being scanned.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Encoding issues detected during construction.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected while building a [`SourceBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Byte offset of the problematic sequence.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`0xEF 0xBB 0xBF`) at start.
    Utf8Bom,
    /// Null byte (U+0000) inside the content.
    InteriorNull,
}

impl EncodingIssueKind {
    /// Short human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            EncodingIssueKind::Utf8Bom => "UTF-8 byte order mark at start of file",
            EncodingIssueKind::InteriorNull => "null byte inside source text",
        }
    }
}

impl SourceBuffer {
    /// Copy `source` into a sentinel-terminated, cache-line padded buffer.
    ///
    /// Texts longer than `u32::MAX` bytes are accepted, but the recorded
    /// length saturates at `u32::MAX` and the tail is never scanned. Callers
    /// that read files reject such texts before they get here.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Minimum: source + 1 sentinel byte, rounded up to a cache line.
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let mut encoding_issues = Vec::new();
        detect_bom(source_bytes, &mut encoding_issues);
        detect_interior_nulls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Create a [`Cursor`] positioned at `offset`.
    ///
    /// Offsets past the end are clamped to the sentinel, so the returned
    /// cursor is immediately at EOF.
    pub fn cursor_at(&self, offset: u32) -> Cursor<'_> {
        let mut cursor = self.cursor();
        cursor.advance_n(offset.min(self.source_len));
        cursor
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Encoding issues detected during construction.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

/// Detect a UTF-8 byte order mark at the start of the source.
///
/// UTF-16 marks cannot occur here: the input is already a `&str`.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: 3,
        });
    }
}

/// Detect null bytes (U+0000) within the source content.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    for pos in memchr::memchr_iter(0, source) {
        let Ok(pos) = u32::try_from(pos) else {
            break;
        };
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::InteriorNull,
            pos,
            len: 1,
        });
    }
}
