//! The `regions` command: debug dump of lexical region runs.

use std::io::Write;

use brace_diagnostic::LineOffsetTable;
use brace_lexer_core::region_runs;

use super::{read_file, CommandError};

/// Longest snippet printed per run, in chars.
const SNIPPET_CHARS: usize = 24;

/// Print every region run of the file at `path`.
pub fn dump_regions<W: Write>(path: &str, out: &mut W) -> Result<(), CommandError> {
    let text = read_file(path)?;
    write_regions(&text, out)?;
    Ok(())
}

/// One tab-separated line per run: `line:col  start..end  region  "snippet"`.
pub fn write_regions<W: Write>(text: &str, out: &mut W) -> std::io::Result<()> {
    let lines = LineOffsetTable::build(text);
    for run in region_runs(text) {
        let pos = lines
            .position(run.start)
            .map_or_else(String::new, |p| p.to_string());
        let snippet: String = text
            .get(run.start as usize..run.end as usize)
            .unwrap_or_default()
            .chars()
            .take(SNIPPET_CHARS)
            .collect();
        writeln!(
            out,
            "{pos}\t{}..{}\t{}\t{snippet:?}",
            run.start, run.end, run.region
        )?;
    }
    out.flush()
}
