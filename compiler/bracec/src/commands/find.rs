//! The `find` command: locate a named construct and its closing brace.

use std::io::Write;

use brace_diagnostic::problem::{construct_diagnostic, find_error_diagnostic};
use brace_diagnostic::{ColorMode, SourceView, TextEmitter};
use brace_lexer_core::find_construct;

use super::{parse_color_flag, read_file, CommandError};

/// Options for `brace find`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindConfig {
    pub path: String,
    /// Text searched for verbatim; the first `{` after it is the anchor.
    pub name: String,
    pub color: ColorMode,
}

impl FindConfig {
    /// Parse the arguments after `find`: `<PATH> <NAME> [--color=<mode>]`.
    pub fn from_args(args: &[String]) -> Result<Self, CommandError> {
        let mut color = ColorMode::Auto;
        let mut positional = Vec::new();
        for arg in args {
            if let Some(mode) = parse_color_flag(arg) {
                color = mode?;
            } else {
                positional.push(arg);
            }
        }
        match positional.as_slice() {
            [path, name] => Ok(FindConfig {
                path: (*path).clone(),
                name: (*name).clone(),
                color,
            }),
            _ => Err(CommandError::Usage(
                "expected a path and a name: brace find <PATH> <NAME>".to_owned(),
            )),
        }
    }
}

/// Read the configured file and report where the named construct closes.
pub fn find_in_file<W: Write>(
    config: &FindConfig,
    is_tty: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let text = read_file(&config.path)?;
    find_in_source(&config.path, &text, &config.name, config.color, is_tty, out);
    Ok(())
}

/// Report where `name`'s body closes in `text`.
///
/// A missing name, a bad anchor and an unterminated body are all reported
/// results, not command failures.
pub fn find_in_source<W: Write>(
    path: &str,
    text: &str,
    name: &str,
    color: ColorMode,
    is_tty: bool,
    out: &mut W,
) {
    let source = SourceView::new(path, text);
    let at = |offset: u32| {
        source
            .position(offset)
            .map_or_else(|| format!("offset {offset}"), |pos| pos.to_string())
    };
    let mut emitter = TextEmitter::with_color_mode(out, color, is_tty);

    match find_construct(text, name) {
        Ok(found) => match found.closing {
            Some(close) => emitter.line(&format!(
                "{path}: `{name}` opens at {}, closes at {}",
                at(found.anchor),
                at(close)
            )),
            None => {
                emitter.line(&format!(
                    "{path}: `{name}` opens at {}, never closes",
                    at(found.anchor)
                ));
                if let Some(diag) = construct_diagnostic(name, &found) {
                    emitter.emit(&source, &diag);
                }
            }
        },
        Err(err) => match find_error_diagnostic(&err) {
            Some(diag) => {
                emitter.line(&format!("{path}: `{name}` could not be scanned"));
                emitter.emit(&source, &diag);
            }
            None => emitter.line(&format!("{path}: {err}")),
        },
    }
    emitter.flush();
}
