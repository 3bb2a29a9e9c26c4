//! Per-language comment stripping strategies.
//!
//! A pure mapping from file extension to a stateless strategy. The JS/TS
//! family goes through the lexical scanner; everything else is a regex-based
//! stripper. Strategies hold no state of their own, so any number of files
//! can be processed concurrently.

use std::sync::LazyLock;

use regex::Regex;

use crate::scanner;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("invalid block comment pattern"));

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("invalid HTML comment pattern"));

static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("invalid hash comment pattern"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("invalid line comment pattern"));

/// How comments are removed from one language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// JS/TS family: the single-pass lexical scanner.
    JsTs,
    /// CSS/SCSS/Less: `/* ... */` only.
    BlockOnly,
    /// HTML/Vue/Svelte/XML/SVG and Markdown: `<!-- ... -->`.
    HtmlComments,
    /// Python/Ruby/YAML: `#` to end of line.
    HashLines,
    /// Java/C#/Go/Swift/Kotlin: `//` lines plus `/* ... */` blocks.
    CStyle,
    /// PHP: C-style plus `#` lines.
    CStyleWithHash,
    /// Formats with no comment syntax (JSON): passed through unchanged.
    Untouched,
}

impl Strategy {
    /// Selects the strategy for a file extension (lowercase, no dot).
    /// Returns `None` for extensions the tool does not understand.
    pub fn for_extension(ext: &str) -> Option<Strategy> {
        match ext {
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" => Some(Strategy::JsTs),
            "css" | "scss" | "less" => Some(Strategy::BlockOnly),
            "html" | "vue" | "svelte" | "xml" | "svg" | "md" => Some(Strategy::HtmlComments),
            "py" | "rb" | "yml" | "yaml" => Some(Strategy::HashLines),
            "java" | "cs" | "go" | "swift" | "kt" => Some(Strategy::CStyle),
            "php" => Some(Strategy::CStyleWithHash),
            "json" => Some(Strategy::Untouched),
            _ => None,
        }
    }

    /// Applies the strategy to one file's contents.
    pub fn apply(&self, source: &str) -> String {
        match self {
            Strategy::JsTs => scanner::strip_js_ts(source),
            Strategy::BlockOnly => BLOCK_COMMENT.replace_all(source, "").into_owned(),
            Strategy::HtmlComments => HTML_COMMENT.replace_all(source, "").into_owned(),
            Strategy::HashLines => HASH_COMMENT.replace_all(source, "").into_owned(),
            Strategy::CStyle => {
                let stripped = LINE_COMMENT.replace_all(source, "");
                BLOCK_COMMENT.replace_all(&stripped, "").into_owned()
            }
            Strategy::CStyleWithHash => {
                let stripped = LINE_COMMENT.replace_all(source, "");
                let stripped = BLOCK_COMMENT.replace_all(&stripped, "");
                HASH_COMMENT.replace_all(&stripped, "").into_owned()
            }
            Strategy::Untouched => source.to_string(),
        }
    }
}
