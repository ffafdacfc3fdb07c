//! Lowering of scan results into [`Diagnostic`]s.
//!
//! The scanner reports imbalance as data. These functions decide which
//! parts of that data are worth showing and word the messages.

use brace_lexer_core::{AnchorError, BalanceReport, ConstructMatch, EncodingIssue, FindError};

use crate::{Diagnostic, ErrorCode};

/// Diagnostics for a whole-file scan of a text of `text_len` bytes.
///
/// Empty when the report is balanced and no literal was left open.
pub fn balance_diagnostics(report: &BalanceReport, text_len: u32) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if let Some(offset) = report.first_negative {
        let mut diag = Diagnostic::error(ErrorCode::B0001, offset)
            .with_message("unmatched closing brace");
        if report.final_depth != 0 {
            diag = diag.with_note(format!("brace depth at end of text is {}", report.final_depth));
        }
        diags.push(diag);
    }

    for &offset in &report.unclosed {
        diags.push(
            Diagnostic::error(ErrorCode::B0002, offset)
                .with_message("unclosed opening brace"),
        );
    }

    if report.end_region.is_unterminated_at_eof() {
        diags.push(
            Diagnostic::error(ErrorCode::B0003, text_len)
                .with_message(format!("unterminated {} at end of text", report.end_region))
                .with_note("braces after the opening delimiter were not counted"),
        );
    }

    diags
}

/// Diagnostic for a named construct whose body never closes.
pub fn construct_diagnostic(name: &str, found: &ConstructMatch) -> Option<Diagnostic> {
    if found.closing.is_some() {
        return None;
    }
    Some(
        Diagnostic::error(ErrorCode::B0004, found.anchor)
            .with_message(format!("body of `{name}` is never closed")),
    )
}

/// Diagnostic for a failed construct lookup.
///
/// `None` when the name does not occur at all: there is no place in the
/// text to point at.
pub fn find_error_diagnostic(err: &FindError) -> Option<Diagnostic> {
    match err {
        FindError::NameNotFound { .. } => None,
        FindError::NoOpeningBrace { name_offset, .. } => Some(
            Diagnostic::error(ErrorCode::B0005, *name_offset).with_message(err.to_string()),
        ),
        FindError::Anchor(anchor) => Some(anchor_error_diagnostic(anchor)),
    }
}

/// Diagnostic for an invalid anchor offset.
pub fn anchor_error_diagnostic(err: &AnchorError) -> Diagnostic {
    let offset = match *err {
        AnchorError::OutOfBounds { len, .. } => len,
        AnchorError::NotOpenBrace { offset, .. } | AnchorError::NotStructural { offset, .. } => {
            offset
        }
    };
    Diagnostic::error(ErrorCode::B0005, offset).with_message(err.to_string())
}

/// Warnings for encoding problems found while buffering the text.
pub fn encoding_diagnostics(issues: &[EncodingIssue]) -> Vec<Diagnostic> {
    issues
        .iter()
        .map(|issue| {
            Diagnostic::warning(ErrorCode::B0006, issue.pos).with_message(issue.kind.describe())
        })
        .collect()
}
