//! Brace-balance checker CLI.
//!
//! The binary (`brace`) is a thin dispatcher over [`commands`]. Commands
//! write to caller-supplied writers so they can be driven from tests.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=brace_lexer_core=trace`. With `BRACE_LOG_TREE` also set, spans
/// are rendered as an indented tree instead of flat lines. Output goes to
/// stderr so it never mixes with command output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("BRACE_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
