//! Region classifier: which lexical region each byte belongs to.
//!
//! The classifier is a byte-at-a-time state machine over six regions:
//! code, line comment, block comment, single- and double-quoted strings,
//! and backtick template literals. A template literal carries a
//! placeholder depth: `${` opens an embedded expression whose braces are
//! structural until the matching `}` closes the placeholder.
//!
//! Transitions look at the current byte, the previous byte and the current
//! region only. Two-byte sequences (`//`, `/*`, `*/`, `${`) consume both
//! bytes, so the second byte never starts another sequence: `/*/` leaves
//! the comment open and `*//` after a block comment is plain code.
//!
//! Inside a placeholder only braces and the template delimiter are
//! recognised. Quotes and comment openers in the embedded expression are
//! treated as plain code.

/// Lexical region active at a byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Structural code.
    #[default]
    Code,
    /// `//` up to the next `\n`.
    LineComment,
    /// `/*` up to the next `*/`. Block comments do not nest.
    BlockComment,
    /// `'...'`.
    SingleQuoted,
    /// `"..."`.
    DoubleQuoted,
    /// `` `...` ``, with the number of open `{` inside the current `${...}`.
    Interpolated { placeholder_depth: u32 },
}

impl Region {
    /// Returns `true` for regions whose braces never count.
    ///
    /// A template literal is inert only between placeholders.
    pub fn is_inert(self) -> bool {
        match self {
            Region::Code => false,
            Region::Interpolated { placeholder_depth } => placeholder_depth == 0,
            Region::LineComment
            | Region::BlockComment
            | Region::SingleQuoted
            | Region::DoubleQuoted => true,
        }
    }

    /// Returns `true` if text ending in this region left a construct open.
    ///
    /// A trailing line comment is closed by end of text, so it is not
    /// reported.
    pub fn is_unterminated_at_eof(self) -> bool {
        !matches!(self, Region::Code | Region::LineComment)
    }

    /// Human-readable region name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Region::Code => "code",
            Region::LineComment => "line comment",
            Region::BlockComment => "block comment",
            Region::SingleQuoted => "single-quoted string",
            Region::DoubleQuoted => "double-quoted string",
            Region::Interpolated {
                placeholder_depth: 0,
            } => "template literal",
            Region::Interpolated { .. } => "template placeholder",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// What a single byte means for brace counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Code that is not a brace.
    Code,
    /// Comment text, string text, or a region delimiter.
    Inert,
    /// Structural `{`.
    OpenBrace,
    /// Structural `}`.
    CloseBrace,
    /// The `{` of `${`. Pairs with [`CharClass::PlaceholderClose`], never
    /// with a structural brace.
    PlaceholderOpen,
    /// The `}` that ends a placeholder.
    PlaceholderClose,
}

impl CharClass {
    /// Returns `true` for structural braces.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(self, CharClass::OpenBrace | CharClass::CloseBrace)
    }
}

/// Classifier state threaded through a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexState {
    region: Region,
    /// Previous byte, or `None` at the start of a scan and right after a
    /// two-byte sequence consumed it.
    prev: Option<u8>,
    /// Whether `prev` was itself escaped by a backslash.
    prev_escaped: bool,
}

impl LexState {
    /// Fresh state in [`Region::Code`] with no previous byte.
    pub fn new() -> Self {
        Self::default()
    }

    /// Region in effect after the last consumed byte.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Consume one byte and classify it.
    pub fn step(&mut self, byte: u8) -> CharClass {
        let prev = self.prev;
        // A backslash escapes the next byte unless it was escaped itself.
        let escaped = prev == Some(b'\\') && !self.prev_escaped;
        let mut consumed_pair = false;

        let class = match self.region {
            Region::LineComment => {
                if byte == b'\n' {
                    self.region = Region::Code;
                }
                CharClass::Inert
            }
            Region::BlockComment => {
                if prev == Some(b'*') && byte == b'/' {
                    self.region = Region::Code;
                    consumed_pair = true;
                }
                CharClass::Inert
            }
            Region::SingleQuoted | Region::DoubleQuoted => {
                let quote = if self.region == Region::SingleQuoted {
                    b'\''
                } else {
                    b'"'
                };
                if byte == quote && !escaped {
                    self.region = Region::Code;
                }
                CharClass::Inert
            }
            Region::Code => match byte {
                b'/' if prev == Some(b'/') => {
                    self.region = Region::LineComment;
                    consumed_pair = true;
                    CharClass::Inert
                }
                b'*' if prev == Some(b'/') => {
                    self.region = Region::BlockComment;
                    consumed_pair = true;
                    CharClass::Inert
                }
                b'\'' if !escaped => {
                    self.region = Region::SingleQuoted;
                    CharClass::Inert
                }
                b'"' if !escaped => {
                    self.region = Region::DoubleQuoted;
                    CharClass::Inert
                }
                b'`' => {
                    self.region = Region::Interpolated {
                        placeholder_depth: 0,
                    };
                    CharClass::Inert
                }
                b'{' => CharClass::OpenBrace,
                b'}' => CharClass::CloseBrace,
                _ => CharClass::Code,
            },
            Region::Interpolated { placeholder_depth } => {
                self.step_interpolated(byte, prev, escaped, placeholder_depth, &mut consumed_pair)
            }
        };

        if consumed_pair {
            self.prev = None;
            self.prev_escaped = false;
        } else {
            self.prev = Some(byte);
            self.prev_escaped = escaped;
        }
        class
    }

    fn step_interpolated(
        &mut self,
        byte: u8,
        prev: Option<u8>,
        escaped: bool,
        placeholder_depth: u32,
        consumed_pair: &mut bool,
    ) -> CharClass {
        if byte == b'`' && !escaped {
            self.region = Region::Code;
            return CharClass::Inert;
        }

        if placeholder_depth == 0 {
            // `\${` is literal text: the marker itself must be unescaped.
            if byte == b'{' && prev == Some(b'$') && !self.prev_escaped {
                self.region = Region::Interpolated {
                    placeholder_depth: 1,
                };
                *consumed_pair = true;
                return CharClass::PlaceholderOpen;
            }
            return CharClass::Inert;
        }

        match byte {
            b'{' if !escaped => {
                self.region = Region::Interpolated {
                    placeholder_depth: placeholder_depth + 1,
                };
                CharClass::OpenBrace
            }
            b'}' if !escaped => {
                let placeholder_depth = placeholder_depth - 1;
                self.region = Region::Interpolated { placeholder_depth };
                if placeholder_depth == 0 {
                    CharClass::PlaceholderClose
                } else {
                    CharClass::CloseBrace
                }
            }
            _ => CharClass::Code,
        }
    }
}

/// One classified byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classified {
    /// Byte offset in the source.
    pub offset: u32,
    /// Region the byte belongs to. Delimiters belong to the region they
    /// delimit, except the first `/` of `//` and `/*`: the classifier has no
    /// lookahead, so that byte is still code. [`region_runs`] moves it into
    /// the comment.
    pub region: Region,
    /// Meaning of the byte for brace counting.
    pub class: CharClass,
}

/// Iterator classifying every byte of a source buffer.
pub struct RegionScanner<'a> {
    cursor: crate::Cursor<'a>,
    state: LexState,
}

impl<'a> RegionScanner<'a> {
    /// Start classifying at the cursor's position in [`Region::Code`].
    pub fn new(cursor: crate::Cursor<'a>) -> Self {
        Self {
            cursor,
            state: LexState::new(),
        }
    }
}

impl Iterator for RegionScanner<'_> {
    type Item = Classified;

    fn next(&mut self) -> Option<Classified> {
        if self.cursor.is_eof() {
            return None;
        }
        let offset = self.cursor.pos();
        let before = self.state.region();
        let class = self.state.step(self.cursor.current());
        self.cursor.advance();
        let region = if before == Region::Code {
            self.state.region()
        } else {
            before
        };
        Some(Classified {
            offset,
            region,
            class,
        })
    }
}

/// A maximal run of consecutive bytes in one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionRun {
    pub region: Region,
    pub start: u32,
    /// Exclusive end offset.
    pub end: u32,
}

/// Split `source` into region runs.
///
/// A comment run starts at its opening `/`, so `//` and `/*` are never split
/// across a code run and a comment run.
pub fn region_runs(source: &str) -> Vec<RegionRun> {
    let buffer = crate::SourceBuffer::new(source);
    let mut runs: Vec<RegionRun> = Vec::new();
    for item in RegionScanner::new(buffer.cursor()) {
        match runs.last_mut() {
            Some(run) if run.region == item.region => run.end = item.offset + 1,
            _ => {
                let mut start = item.offset;
                if matches!(item.region, Region::LineComment | Region::BlockComment) {
                    // The opening `/` was classified as code; hand it over.
                    if let Some(code) = runs.last_mut() {
                        code.end -= 1;
                        start -= 1;
                        if code.start == code.end {
                            runs.pop();
                        }
                    }
                }
                runs.push(RegionRun {
                    region: item.region,
                    start,
                    end: item.offset + 1,
                });
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests;
