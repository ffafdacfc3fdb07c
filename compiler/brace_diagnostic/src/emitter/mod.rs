//! Text emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! convex/game.ts:3:1: error[B0001]: unmatched closing brace
//!   3 | }}
//!     | ^
//!   = note: brace depth at end of text is -1
//! ```

use std::io::Write;

use crate::position::{LineOffsetTable, Position};
use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse `auto`, `always` or `never`.
    pub fn parse(mode: &str) -> Option<ColorMode> {
        match mode {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// A source text with its path and line table, as diagnostics see it.
pub struct SourceView<'a> {
    path: &'a str,
    text: &'a str,
    lines: LineOffsetTable,
}

impl<'a> SourceView<'a> {
    pub fn new(path: &'a str, text: &'a str) -> Self {
        SourceView {
            path,
            text,
            lines: LineOffsetTable::build(text),
        }
    }

    pub fn path(&self) -> &str {
        self.path
    }

    pub fn position(&self, offset: u32) -> Option<Position> {
        self.lines.position(offset)
    }

    /// Text of `line` without its line break or a trailing `\r`.
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let range = self.lines.line_range(line)?;
        let text = self.text.get(range.start as usize..range.end as usize)?;
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

/// Writes diagnostics as `path:line:col: severity[code]: message`, followed
/// by the source line, a caret under the offending byte and any notes.
///
/// Write errors are ignored: a closed pipe must not turn a finished scan
/// into a failure.
pub struct TextEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TextEmitter<W> {
    /// Create an emitter with an explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TextEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Give the writer back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_gutter(&mut self, label: &str, width: usize) {
        let gutter = format!("{label:>width$} |");
        let _ = write!(self.writer, "  ");
        self.write_colored(&gutter, colors::GUTTER);
    }

    /// Emit one diagnostic against `source`.
    pub fn emit(&mut self, source: &SourceView<'_>, diagnostic: &Diagnostic) {
        let position = source.position(diagnostic.offset);

        // Header: path:line:col: severity[CODE]: message
        match position {
            Some(pos) => self.write_colored(&format!("{}:{pos}:", source.path), colors::BOLD),
            None => self.write_colored(&format!("{}:", source.path), colors::BOLD),
        }
        let _ = write!(self.writer, " ");
        self.write_severity(diagnostic.severity);
        self.write_colored(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        // Snippet
        if let Some(pos) = position {
            if let Some(line) = source.line_text(pos.line) {
                self.write_snippet(pos, line, diagnostic.severity);
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn write_snippet(&mut self, pos: Position, line: &str, severity: Severity) {
        let number = pos.line.to_string();
        let width = number.len();

        self.write_gutter(&number, width);
        if line.is_empty() {
            let _ = writeln!(self.writer);
        } else {
            let _ = writeln!(self.writer, " {line}");
        }

        self.write_gutter("", width);
        let _ = write!(self.writer, " {}", caret_padding(line, pos.column));
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored("^", color);
        let _ = writeln!(self.writer);
    }

    /// Emit every diagnostic in order.
    pub fn emit_all(&mut self, source: &SourceView<'_>, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(source, diag);
        }
    }

    /// Emit a plain line, e.g. a per-file result.
    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{text}");
    }

    /// Emit a count of errors and warnings. Nothing when both are zero.
    pub fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": {error_count} error{} and {warning_count} warning{} found",
                    plural_s(error_count),
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    ": {error_count} error{} found",
                    plural_s(error_count)
                );
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} found",
                plural_s(warning_count)
            );
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Whitespace that lines the caret up under byte `column` of `line`.
///
/// Tabs are kept so the caret follows the line's own indentation. UTF-8
/// continuation bytes take no column on screen.
fn caret_padding(line: &str, column: u32) -> String {
    let before = (column as usize).saturating_sub(1).min(line.len());
    line.as_bytes()[..before]
        .iter()
        .filter(|&&b| b & 0xC0 != 0x80)
        .map(|&b| if b == b'\t' { '\t' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests;
