//! Diagnostics for brace-balance scans.
//!
//! Turns the data reported by `brace_lexer_core` into positioned,
//! human-readable diagnostics:
//!
//! - [`position`]: byte offset to 1-based line and column
//! - [`Diagnostic`] / [`ErrorCode`]: what went wrong and where
//! - [`problem`]: lowering of scan reports into diagnostics
//! - [`emitter`]: text rendering with source snippets

mod diagnostic;
pub mod emitter;
pub mod position;
pub mod problem;

pub use diagnostic::{Diagnostic, ErrorCode, Severity};
pub use emitter::{ColorMode, SourceView, TextEmitter};
pub use position::{offset_to_position, LineOffsetTable, Position};
