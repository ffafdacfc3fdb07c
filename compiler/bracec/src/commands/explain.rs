//! The `explain` command: describe a diagnostic code.

use std::io::Write;

use brace_diagnostic::ErrorCode;

use super::CommandError;

/// Print the description of `code_str` (e.g. `B0001`).
pub fn explain_code<W: Write>(code_str: &str, out: &mut W) -> Result<(), CommandError> {
    let code = ErrorCode::parse(code_str).ok_or_else(|| CommandError::UnknownCode {
        code: code_str.to_owned(),
    })?;
    writeln!(out, "{code}: {}", code.description())?;
    Ok(())
}
