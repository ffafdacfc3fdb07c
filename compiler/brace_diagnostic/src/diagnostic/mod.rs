//! Diagnostic types for brace-balance reporting.
//!
//! A [`Diagnostic`] carries an [`ErrorCode`], a [`Severity`], the byte
//! offset it points at, a message, and optional notes. Positions are
//! resolved only when rendering.

use std::fmt;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Error codes for scan diagnostics.
///
/// Format: B####.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Closing brace with no matching opening brace
    B0001,
    /// Opening brace never closed
    B0002,
    /// Comment or string literal still open at end of text
    B0003,
    /// Named construct has no closing brace
    B0004,
    /// Anchor offset is not a structural opening brace
    B0005,
    /// Encoding problem in the source text
    B0006,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::B0001,
        ErrorCode::B0002,
        ErrorCode::B0003,
        ErrorCode::B0004,
        ErrorCode::B0005,
        ErrorCode::B0006,
    ];

    /// The code as written in output, e.g. `B0001`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::B0001 => "B0001",
            ErrorCode::B0002 => "B0002",
            ErrorCode::B0003 => "B0003",
            ErrorCode::B0004 => "B0004",
            ErrorCode::B0005 => "B0005",
            ErrorCode::B0006 => "B0006",
        }
    }

    /// One-line explanation, used by `brace explain`.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::B0001 => "a `}` in code has no matching `{` before it",
            ErrorCode::B0002 => "a `{` in code is never closed",
            ErrorCode::B0003 => {
                "a block comment, string or template literal is still open at end of text"
            }
            ErrorCode::B0004 => "the body of the named construct runs to end of text",
            ErrorCode::B0005 => "the anchor offset does not hold a `{` in code",
            ErrorCode::B0006 => "the source text has a byte order mark or null bytes",
        }
    }

    /// Parse a code such as `B0003` (case-insensitive).
    pub fn parse(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reportable finding.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    /// Byte offset the diagnostic points at.
    pub offset: u32,
    pub message: String,
    /// Extra lines printed after the source snippet.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: ErrorCode, offset: u32) -> Self {
        Self::new(code, Severity::Error, offset)
    }

    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, offset: u32) -> Self {
        Self::new(code, Severity::Warning, offset)
    }

    fn new(code: ErrorCode, severity: Severity, offset: u32) -> Self {
        Diagnostic {
            code,
            severity,
            offset,
            message: String::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
