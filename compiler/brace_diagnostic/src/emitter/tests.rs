use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn render(text: &str, diags: &[Diagnostic]) -> String {
    let source = SourceView::new("t.ts", text);
    let mut emitter = TextEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_all(&source, diags);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn header_snippet_and_caret() {
    let diag = Diagnostic::error(ErrorCode::B0001, 5).with_message("unmatched closing brace");
    assert_eq!(
        render("a {\n}}\n", &[diag]),
        "t.ts:2:2: error[B0001]: unmatched closing brace\n\
         \x20 2 | }}\n\
         \x20   |  ^\n"
    );
}

#[test]
fn notes_follow_snippet() {
    let diag = Diagnostic::error(ErrorCode::B0001, 0)
        .with_message("unmatched closing brace")
        .with_note("brace depth at end of text is -1");
    assert_eq!(
        render("}", &[diag]),
        "t.ts:1:1: error[B0001]: unmatched closing brace\n\
         \x20 1 | }\n\
         \x20   | ^\n\
         \x20 = note: brace depth at end of text is -1\n"
    );
}

#[test]
fn gutter_widens_with_line_number() {
    let text = "\n".repeat(11) + "{";
    let diag = Diagnostic::error(ErrorCode::B0002, 11).with_message("unclosed opening brace");
    assert_eq!(
        render(&text, &[diag]),
        "t.ts:12:1: error[B0002]: unclosed opening brace\n\
         \x20 12 | {\n\
         \x20    | ^\n"
    );
}

#[test]
fn end_of_text_on_empty_last_line() {
    let diag = Diagnostic::error(ErrorCode::B0003, 6).with_message("unterminated block comment at end of text");
    assert_eq!(
        render("/* {\n\n", &[diag]),
        "t.ts:3:1: error[B0003]: unterminated block comment at end of text\n\
         \x20 3 |\n\
         \x20   | ^\n"
    );
}

#[test]
fn offset_past_end_has_no_position() {
    let diag = Diagnostic::error(ErrorCode::B0005, 99).with_message("bad anchor");
    assert_eq!(render("{}", &[diag]), "t.ts: error[B0005]: bad anchor\n");
}

#[test]
fn carriage_return_is_not_echoed() {
    let diag = Diagnostic::error(ErrorCode::B0001, 3).with_message("unmatched closing brace");
    let out = render("x\r\n}\r\n", &[diag]);
    assert!(out.contains("  2 | }\n"), "got:\n{out}");
}

#[test]
fn caret_keeps_tabs_and_skips_continuation_bytes() {
    assert_eq!(caret_padding("\tx}", 3), "\t ");
    // "é" is two bytes but one column on screen.
    assert_eq!(caret_padding("é}", 3), " ");
    assert_eq!(caret_padding("ab", 10), "  ");
}

#[test]
fn warning_severity_label() {
    let diag = Diagnostic::warning(ErrorCode::B0006, 0).with_message("UTF-8 byte order mark");
    let out = render("\u{FEFF}{}", &[diag]);
    assert!(out.starts_with("t.ts:1:1: warning[B0006]: "), "got:\n{out}");
}

#[test]
fn colors_always_emit_ansi() {
    let source = SourceView::new("t.ts", "}");
    let mut emitter = TextEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&source, &Diagnostic::error(ErrorCode::B0001, 0));
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("\x1b[1;31merror\x1b[0m"));
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("sometimes"), None);
}

#[test]
fn summary_counts() {
    let summary = |errors, warnings| {
        let mut emitter = TextEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(errors, warnings);
        String::from_utf8(emitter.into_inner()).unwrap()
    };
    assert_eq!(summary(0, 0), "");
    assert_eq!(summary(1, 0), "error: 1 error found\n");
    assert_eq!(summary(2, 1), "error: 2 errors and 1 warning found\n");
    assert_eq!(summary(0, 3), "warning: 3 warnings found\n");
}

#[test]
fn source_view_line_text() {
    let source = SourceView::new("p", "ab\r\ncd");
    assert_eq!(source.path(), "p");
    assert_eq!(source.line_text(1), Some("ab"));
    assert_eq!(source.line_text(2), Some("cd"));
    assert_eq!(source.line_text(3), None);
}
