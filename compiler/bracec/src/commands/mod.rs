//! Command handlers for the `brace` CLI.
//!
//! Each submodule implements one command. Shared pieces (file reading and
//! the error type every command returns) live here.

use std::io;

use brace_diagnostic::ColorMode;

mod check;
mod explain;
mod find;
mod regions;

pub use check::{
    check_paths, check_source, write_checks, CheckConfig, CheckSummary, CheckedFile, FileCheck,
    DEFAULT_PATH,
};
pub use explain::explain_code;
pub use find::{find_in_file, find_in_source, FindConfig};
pub use regions::{dump_regions, write_regions};

/// Why a source file could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("'{path}' is {len} bytes; files over {max} bytes cannot be scanned", max = MAX_SOURCE_LEN)]
    TooLarge { path: String, len: u64 },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Failure of a command as a whole. Imbalance is never one of these.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("unknown error code `{code}`")]
    UnknownCode { code: String },
    #[error("{0}")]
    Usage(String),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Largest file a scan can address: offsets are `u32`.
pub const MAX_SOURCE_LEN: u64 = u32::MAX as u64;

/// Read a file from disk.
///
/// Files longer than [`MAX_SOURCE_LEN`] are rejected before their contents
/// are read.
pub fn read_file(path: &str) -> Result<String, ReadError> {
    let len = std::fs::metadata(path).map_err(|e| classify(path, e))?.len();
    check_size(path, len)?;
    std::fs::read_to_string(path).map_err(|e| classify(path, e))
}

/// Reject a text of `len` bytes that a scan could not address.
pub fn check_size(path: &str, len: u64) -> Result<(), ReadError> {
    if len > MAX_SOURCE_LEN {
        return Err(ReadError::TooLarge {
            path: path.to_owned(),
            len,
        });
    }
    Ok(())
}

fn classify(path: &str, e: io::Error) -> ReadError {
    match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound {
            path: path.to_owned(),
        },
        io::ErrorKind::PermissionDenied => ReadError::PermissionDenied {
            path: path.to_owned(),
        },
        io::ErrorKind::InvalidData => ReadError::InvalidUtf8 {
            path: path.to_owned(),
        },
        _ => ReadError::Io {
            path: path.to_owned(),
            source: e,
        },
    }
}

/// Parse a `--color=<mode>` argument. `None` if `arg` is not one.
pub(crate) fn parse_color_flag(arg: &str) -> Option<Result<ColorMode, CommandError>> {
    let mode = arg.strip_prefix("--color=")?;
    Some(ColorMode::parse(mode).ok_or_else(|| {
        CommandError::Usage(format!(
            "invalid color mode '{mode}' (expected auto, always or never)"
        ))
    }))
}
