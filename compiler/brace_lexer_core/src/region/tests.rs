use super::*;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

/// Helper: classify every byte of `source`.
fn classify(source: &str) -> Vec<Classified> {
    let buf = SourceBuffer::new(source);
    RegionScanner::new(buf.cursor()).collect()
}

/// Helper: offsets of structural braces.
fn structural_offsets(source: &str) -> Vec<u32> {
    classify(source)
        .into_iter()
        .filter(|c| c.class.is_structural())
        .map(|c| c.offset)
        .collect()
}

/// Helper: final region after consuming all of `source`.
fn end_region(source: &str) -> Region {
    let mut state = LexState::new();
    for &b in source.as_bytes() {
        state.step(b);
    }
    state.region()
}

// ─── Code ───────────────────────────────────────────────────────

#[test]
fn plain_braces_are_structural() {
    assert_eq!(structural_offsets("a{b}c"), vec![1, 3]);
    let classes: Vec<CharClass> = classify("{x}").iter().map(|c| c.class).collect();
    assert_eq!(
        classes,
        vec![CharClass::OpenBrace, CharClass::Code, CharClass::CloseBrace]
    );
}

#[test]
fn empty_source_classifies_nothing() {
    assert!(classify("").is_empty());
    assert_eq!(end_region(""), Region::Code);
}

// ─── Comments ───────────────────────────────────────────────────

#[test]
fn line_comment_hides_braces_until_newline() {
    assert_eq!(structural_offsets("{ // {\n}"), vec![0, 7]);
    assert_eq!(end_region("// {"), Region::LineComment);
    assert_eq!(end_region("// {\n"), Region::Code);
}

#[test]
fn block_comment_hides_braces() {
    assert_eq!(structural_offsets("/* { } } */{"), vec![11]);
    assert_eq!(end_region("/* {"), Region::BlockComment);
}

#[test]
fn block_comment_spans_lines() {
    assert_eq!(structural_offsets("/*\n{\n*/}"), vec![7]);
}

#[test]
fn block_comment_opening_star_does_not_close() {
    // `/*/` is still inside the comment.
    assert_eq!(end_region("/*/"), Region::BlockComment);
    assert_eq!(end_region("/**/"), Region::Code);
}

#[test]
fn slash_after_block_comment_close_is_code() {
    // The `/` that closes `*/` cannot also start `//`.
    assert_eq!(structural_offsets("/**//{"), vec![5]);
    assert_eq!(end_region("/**//"), Region::Code);
}

#[test]
fn division_is_not_a_comment() {
    assert_eq!(structural_offsets("a / b {}"), vec![6, 7]);
}

#[test]
fn quotes_inside_comments_are_ignored() {
    assert_eq!(structural_offsets("// it's\n{}"), vec![8, 9]);
    assert_eq!(structural_offsets("/* \" */{}"), vec![7, 8]);
}

// ─── Quoted strings ─────────────────────────────────────────────

#[test]
fn braces_in_strings_are_inert() {
    assert_eq!(structural_offsets(r#"{"}"}"#), vec![0, 4]);
    assert_eq!(structural_offsets("{'{'}"), vec![0, 4]);
}

#[test]
fn escaped_quote_does_not_close_string() {
    // "a\"{" then a real brace
    let source = r#""a\"{"}"#;
    assert_eq!(structural_offsets(source), vec![6]);
}

#[test]
fn escaped_backslash_before_quote_closes_string() {
    // "\\" is a complete string containing one backslash.
    let source = r#""\\"{"#;
    assert_eq!(structural_offsets(source), vec![4]);
    assert_eq!(end_region(r#""\\""#), Region::Code);
}

#[test]
fn other_quote_kind_does_not_close() {
    assert_eq!(end_region(r#""it's"#), Region::DoubleQuoted);
    assert_eq!(end_region(r#"'say "hi"'"#), Region::Code);
}

#[test]
fn comment_markers_inside_strings_are_text() {
    assert_eq!(structural_offsets(r#""//"{}"#), vec![4, 5]);
    assert_eq!(structural_offsets(r#"'/*'{}"#), vec![4, 5]);
}

// ─── Template literals ──────────────────────────────────────────

#[test]
fn template_text_braces_are_inert() {
    assert_eq!(structural_offsets("`{}`{"), vec![4]);
}

#[test]
fn placeholder_markers_are_not_structural() {
    let items = classify("`${x}`");
    let classes: Vec<CharClass> = items.iter().map(|c| c.class).collect();
    assert_eq!(
        classes,
        vec![
            CharClass::Inert,            // `
            CharClass::Inert,            // $
            CharClass::PlaceholderOpen,  // {
            CharClass::Code,             // x
            CharClass::PlaceholderClose, // }
            CharClass::Inert,            // `
        ]
    );
}

#[test]
fn nested_braces_inside_placeholder_count() {
    // `${ {a:1} }`
    let source = "`${ {a:1} }`";
    assert_eq!(structural_offsets(source), vec![4, 8]);
    assert_eq!(end_region(source), Region::Code);
}

#[test]
fn placeholder_depth_tracks_nesting() {
    let mut state = LexState::new();
    for &b in b"`${ {{" {
        state.step(b);
    }
    assert_eq!(
        state.region(),
        Region::Interpolated {
            placeholder_depth: 3
        }
    );
    for &b in b"}}" {
        state.step(b);
    }
    assert_eq!(
        state.region(),
        Region::Interpolated {
            placeholder_depth: 1
        }
    );
    assert_eq!(state.step(b'}'), CharClass::PlaceholderClose);
    assert_eq!(
        state.region(),
        Region::Interpolated {
            placeholder_depth: 0
        }
    );
}

#[test]
fn escaped_backtick_stays_in_template() {
    assert_eq!(end_region(r"`a\`"), Region::Interpolated { placeholder_depth: 0 });
    assert_eq!(end_region(r"`a\``"), Region::Code);
}

#[test]
fn escaped_dollar_is_literal() {
    // `\${` does not open a placeholder.
    let source = r"`\${x}`{";
    assert_eq!(structural_offsets(source), vec![7]);
    assert!(classify(source)
        .iter()
        .all(|c| c.class != CharClass::PlaceholderOpen));
}

#[test]
fn dollar_without_brace_is_text() {
    assert_eq!(structural_offsets("`$ {x}`{}"), vec![7, 8]);
}

#[test]
fn backtick_inside_placeholder_leaves_template() {
    // Known limitation: a template nested inside a placeholder is not
    // re-entered; its opening backtick ends the outer literal.
    assert_eq!(end_region("`${`"), Region::Code);
}

#[test]
fn quotes_inside_placeholder_are_code() {
    // Strings inside an embedded expression are not re-entered: the quoted
    // `{` opens a nested brace and the placeholder's `}` closes it.
    assert_eq!(structural_offsets("`${ \"{\" }`"), vec![5, 8]);
}

#[test]
fn multiple_placeholders() {
    let source = "`${a} and ${ {b} }`";
    assert_eq!(structural_offsets(source), vec![13, 15]);
    let opens = classify(source)
        .iter()
        .filter(|c| c.class == CharClass::PlaceholderOpen)
        .count();
    assert_eq!(opens, 2);
}

// ─── Region attribution ─────────────────────────────────────────

#[test]
fn delimiters_belong_to_their_region() {
    let items = classify("a\"b\"c");
    let regions: Vec<Region> = items.iter().map(|c| c.region).collect();
    assert_eq!(
        regions,
        vec![
            Region::Code,
            Region::DoubleQuoted,
            Region::DoubleQuoted,
            Region::DoubleQuoted,
            Region::Code,
        ]
    );
}

#[test]
fn runs_merge_adjacent_bytes() {
    let runs = region_runs("x = 'a'; // c\n{}");
    assert_eq!(
        runs,
        vec![
            RegionRun {
                region: Region::Code,
                start: 0,
                end: 4,
            },
            RegionRun {
                region: Region::SingleQuoted,
                start: 4,
                end: 7,
            },
            RegionRun {
                region: Region::Code,
                start: 7,
                end: 9,
            },
            RegionRun {
                region: Region::LineComment,
                start: 9,
                end: 14,
            },
            RegionRun {
                region: Region::Code,
                start: 14,
                end: 16,
            },
        ]
    );
}

#[test]
fn comment_runs_start_at_opening_slash() {
    assert_eq!(
        region_runs("//x"),
        vec![RegionRun {
            region: Region::LineComment,
            start: 0,
            end: 3,
        }]
    );
    assert_eq!(
        region_runs("'a'/*b*/"),
        vec![
            RegionRun {
                region: Region::SingleQuoted,
                start: 0,
                end: 3,
            },
            RegionRun {
                region: Region::BlockComment,
                start: 3,
                end: 8,
            },
        ]
    );
}

// ─── Region helpers ─────────────────────────────────────────────

#[test]
fn inert_regions() {
    assert!(!Region::Code.is_inert());
    assert!(Region::LineComment.is_inert());
    assert!(Region::Interpolated { placeholder_depth: 0 }.is_inert());
    assert!(!Region::Interpolated { placeholder_depth: 2 }.is_inert());
}

#[test]
fn unterminated_regions_at_eof() {
    assert!(!Region::Code.is_unterminated_at_eof());
    assert!(!Region::LineComment.is_unterminated_at_eof());
    assert!(Region::BlockComment.is_unterminated_at_eof());
    assert!(Region::DoubleQuoted.is_unterminated_at_eof());
    assert!(Region::Interpolated { placeholder_depth: 1 }.is_unterminated_at_eof());
}

#[test]
fn region_display() {
    assert_eq!(Region::BlockComment.to_string(), "block comment");
    assert_eq!(
        Region::Interpolated { placeholder_depth: 1 }.to_string(),
        "template placeholder"
    );
}
