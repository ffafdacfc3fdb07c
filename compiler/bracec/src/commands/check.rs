//! The `check` command: whole-file brace balance for one or more files.

use std::fmt::Write as _;
use std::io::Write;

use brace_diagnostic::problem::{balance_diagnostics, encoding_diagnostics};
use brace_diagnostic::{ColorMode, Diagnostic, Position, SourceView, TextEmitter};
use brace_lexer_core::{scan_buffer, BalanceReport, SourceBuffer};
use rayon::prelude::*;
use tracing::debug;

use super::{parse_color_flag, read_file, CommandError, ReadError};

/// Path checked when none is given.
pub const DEFAULT_PATH: &str = "convex/game.ts";

/// Options for `brace check`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Files to check, in output order.
    pub paths: Vec<String>,
    pub color: ColorMode,
    /// Scan files on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            paths: vec![DEFAULT_PATH.to_owned()],
            color: ColorMode::Auto,
            parallel: true,
        }
    }
}

impl CheckConfig {
    /// Parse the arguments after `check`.
    pub fn from_args(args: &[String]) -> Result<Self, CommandError> {
        let mut config = CheckConfig {
            paths: Vec::new(),
            ..CheckConfig::default()
        };
        for arg in args {
            if let Some(color) = parse_color_flag(arg) {
                config.color = color?;
            } else if arg == "--no-parallel" {
                config.parallel = false;
            } else if arg.starts_with('-') {
                return Err(CommandError::Usage(format!("unknown option '{arg}'")));
            } else {
                config.paths.push(arg.clone());
            }
        }
        if config.paths.is_empty() {
            config.paths.push(DEFAULT_PATH.to_owned());
        }
        Ok(config)
    }
}

/// Result of checking one source text.
#[derive(Clone, Debug)]
pub struct CheckedFile {
    pub report: BalanceReport,
    /// Line and column of [`BalanceReport::first_negative`].
    pub first_negative_at: Option<Position>,
    pub diagnostics: Vec<Diagnostic>,
    /// Headline plus rendered diagnostics, ready to print.
    pub rendered: String,
}

impl CheckedFile {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

/// One path and what checking it produced.
#[derive(Debug)]
pub struct FileCheck {
    pub path: String,
    pub outcome: Result<CheckedFile, ReadError>,
}

/// Totals over a `check` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub unreadable: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckSummary {
    /// 1 when a file could not be read. Imbalance alone exits 0.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.unreadable > 0)
    }
}

/// Scan and render `text`, read from `path`.
pub fn check_source(path: &str, text: &str, color: ColorMode, is_tty: bool) -> CheckedFile {
    let buffer = SourceBuffer::new(text);
    let report = scan_buffer(&buffer);

    let mut diagnostics = encoding_diagnostics(buffer.encoding_issues());
    diagnostics.extend(balance_diagnostics(&report, buffer.len()));

    let source = SourceView::new(path, text);
    let first_negative_at = report.first_negative.and_then(|o| source.position(o));

    let mut headline = format!("{path}: depth {}", report.final_depth);
    if let Some(pos) = first_negative_at {
        let _ = write!(headline, ", first unmatched `}}` at {pos}");
    }

    let mut emitter = TextEmitter::with_color_mode(Vec::new(), color, is_tty);
    emitter.line(&headline);
    emitter.emit_all(&source, &diagnostics);
    let rendered = String::from_utf8_lossy(&emitter.into_inner()).into_owned();

    CheckedFile {
        report,
        first_negative_at,
        diagnostics,
        rendered,
    }
}

#[tracing::instrument(level = "debug", skip(color, is_tty))]
fn check_file(path: &str, color: ColorMode, is_tty: bool) -> FileCheck {
    let outcome = read_file(path).map(|text| check_source(path, &text, color, is_tty));
    FileCheck {
        path: path.to_owned(),
        outcome,
    }
}

/// Check every configured path. Results come back in argument order.
pub fn check_paths(config: &CheckConfig, is_tty: bool) -> Vec<FileCheck> {
    let check = |path: &String| check_file(path, config.color, is_tty);
    if config.parallel && config.paths.len() > 1 {
        config.paths.par_iter().map(check).collect()
    } else {
        config.paths.iter().map(check).collect()
    }
}

/// Print results in order: rendered files to `out`, read failures to `err`,
/// then an error/warning summary to `out`.
pub fn write_checks<W: Write, E: Write>(
    checks: &[FileCheck],
    config: &CheckConfig,
    is_tty: bool,
    out: &mut W,
    err: &mut E,
) -> Result<CheckSummary, CommandError> {
    let mut summary = CheckSummary::default();
    for check in checks {
        summary.files += 1;
        match &check.outcome {
            Ok(file) => {
                out.write_all(file.rendered.as_bytes())?;
                summary.errors += file.error_count();
                summary.warnings += file.warning_count();
            }
            Err(e) => {
                writeln!(err, "error: {e}")?;
                summary.unreadable += 1;
            }
        }
    }
    debug!(?summary, "check finished");

    let mut emitter = TextEmitter::with_color_mode(&mut *out, config.color, is_tty);
    emitter.emit_summary(summary.errors, summary.warnings);
    emitter.flush();
    Ok(summary)
}
