//! Parsed tree representation
//!
//! Abstracts the parsed AST for downstream processing.

use super::syntax_node::SyntaxNode;

/// Parsed syntax tree
///
/// Only syntactically valid sources produce a `ParsedTree`.
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// Source code
    pub source: String,

    /// File path (for error messages)
    pub file_path: String,

    /// Language
    pub language: String,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, source: String, file_path: String, language: String) -> Self {
        Self {
            root,
            source,
            file_path,
            language,
        }
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        count_lines(&self.source)
    }
}

/// Count lines the way Python's `str.splitlines()` splits them
///
/// `\r\n` is one boundary; a trailing boundary does not open a new line.
pub fn count_lines(text: &str) -> usize {
    let mut count = 0;
    let mut open_line = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                count += 1;
                open_line = false;
            }
            '\n' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => {
                count += 1;
                open_line = false;
            }
            _ => open_line = true,
        }
    }

    count + usize::from(open_line)
}
