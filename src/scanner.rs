//! Single-pass lexical scanner for JS/TS-family sources.
//!
//! Classifies each character into a lexical context (code, string, template
//! literal, regex literal, line comment, block comment) so that removable
//! comments can be dropped while everything lexically significant passes
//! through untouched. No tokenizer or AST is built; the scan runs on local
//! character-level state with up to three characters of lookahead.

/// Lexical context of the current scan position. Exactly one is active at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Ordinary code, the only state transitions start from.
    Code,
    /// Inside `// ...`, discarding until the newline.
    LineComment,
    /// Inside `/* ... */`, discarding until the closer.
    BlockComment,
    /// Inside a `'...'` literal.
    SingleQuote,
    /// Inside a `"..."` literal.
    DoubleQuote,
    /// Inside a backtick template literal, interpolation included.
    Template,
    /// Inside a `/.../ ` regex literal.
    Regex,
}

/// Removes `//` and `/* ... */` comments from JS/TS source text.
///
/// Doc comments (`/**` openers that are not the degenerate `/**/`) are
/// preserved byte-for-byte, as are string literals, template literals
/// (including anything inside `${...}`), and regex literal bodies. The
/// function is total: any input, syntactically valid or not, produces some
/// output in a single left-to-right pass.
///
/// Characters are never reordered, only comment spans are deleted; the
/// newline terminating a line comment is kept so line structure survives.
pub fn strip_js_ts(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = ScanState::Code;
    // One-character lookahead: when set, the next character is emitted
    // verbatim and cannot act as a delimiter.
    let mut escaped = false;
    // Single-level `[...]` bracket-class flag for regex literals.
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            // Comment interiors discard everything. A backslash consumes
            // the following character with it, so an escaped character can
            // never act as a comment closer.
            ScanState::LineComment => {
                if c == '\\' {
                    i += 2;
                } else if c == '\n' {
                    // The newline is not part of the comment.
                    out.push('\n');
                    state = ScanState::Code;
                    i += 1;
                } else {
                    i += 1;
                }
            }
            ScanState::BlockComment => {
                if c == '\\' {
                    i += 2;
                } else if c == '*' && next == Some('/') {
                    state = ScanState::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ if escaped => {
                out.push(c);
                escaped = false;
                i += 1;
            }
            _ if c == '\\' => {
                out.push(c);
                escaped = true;
                i += 1;
            }
            ScanState::SingleQuote => {
                out.push(c);
                if c == '\'' {
                    state = ScanState::Code;
                }
                i += 1;
            }
            ScanState::DoubleQuote => {
                out.push(c);
                if c == '"' {
                    state = ScanState::Code;
                }
                i += 1;
            }
            ScanState::Template => {
                // The whole span is opaque; `${...}` is not re-entered as
                // code, nesting is tracked only by backtick toggling.
                out.push(c);
                if c == '`' {
                    state = ScanState::Code;
                }
                i += 1;
            }
            ScanState::Regex => {
                out.push(c);
                match c {
                    '[' if !in_class => in_class = true,
                    ']' if in_class => in_class = false,
                    '/' if !in_class => state = ScanState::Code,
                    _ => {}
                }
                i += 1;
            }
            ScanState::Code => {
                if c == '/' && next == Some('*') {
                    if chars.get(i + 2) == Some(&'*') && chars.get(i + 3) != Some(&'/') {
                        // `/**` opener that is not the empty `/**/`: a doc
                        // comment. No state change; the delimiter and body
                        // flow through the ordinary code rules, so the
                        // eventual `*/` is emitted verbatim too.
                        out.push(c);
                        i += 1;
                    } else {
                        state = ScanState::BlockComment;
                        i += 2;
                    }
                } else if c == '/' && next == Some('/') {
                    state = ScanState::LineComment;
                    i += 2;
                } else if c == '\'' {
                    out.push(c);
                    state = ScanState::SingleQuote;
                    i += 1;
                } else if c == '"' {
                    out.push(c);
                    state = ScanState::DoubleQuote;
                    i += 1;
                } else if c == '`' {
                    out.push(c);
                    state = ScanState::Template;
                    i += 1;
                } else if c == '/' && regex_can_start(&chars[..i]) {
                    out.push(c);
                    state = ScanState::Regex;
                    in_class = false;
                    i += 1;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
        }
    }

    out
}

/// Whether a `/` at the current position starts a regex literal rather than
/// a division operator.
///
/// Heuristic, not a grammar: a regex can start where an expression is
/// expected, approximated as "the nearest preceding non-whitespace character
/// is one of a fixed punctuator set, or there is none". A `/` after an
/// identifier or closing paren/bracket is treated as division.
fn regex_can_start(before: &[char]) -> bool {
    match before.iter().rev().find(|c| !c.is_whitespace()) {
        None => true,
        Some(&c) => matches!(
            c,
            '(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';' | '\n'
        ),
    }
}
