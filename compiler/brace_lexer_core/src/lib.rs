//! Brace-balance scanner for C-family source text.
//!
//! Standalone crate with no `brace_*` dependencies. It classifies every
//! byte of a source text into a lexical region (code, comments, quoted
//! strings, template literals with `${...}` placeholders) and counts only
//! the braces that are structural code.
//!
//! # Layers
//!
//! - [`SourceBuffer`] / [`Cursor`]: sentinel-terminated input.
//! - [`region`]: the per-byte region classifier ([`LexState::step`]).
//! - [`balance`]: whole-file and anchored scans sharing one routine.
//!
//! # Example
//!
//! ```
//! use brace_lexer_core::{scan_from_anchor, scan_whole_file};
//!
//! let text = "fn f() { let s = \"}\"; /* { */ }";
//! let report = scan_whole_file(text);
//! assert!(report.is_balanced());
//!
//! let anchored = scan_from_anchor(text, 7).unwrap();
//! assert_eq!(anchored.closing, Some(30));
//! ```
//!
//! Offsets are byte offsets into the UTF-8 text.

pub mod balance;
mod cursor;
pub mod region;
mod source_buffer;

pub use balance::{
    find_construct, locate_anchor, scan, scan_buffer, scan_from_anchor, scan_whole_file,
    AnchorError, AnchoredScan, BalanceReport, ConstructMatch, FindError, ScanState, StopRule,
};
pub use cursor::Cursor;
pub use region::{region_runs, CharClass, Classified, LexState, Region, RegionRun, RegionScanner};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
