//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use crate::features::parsing::domain::ParsedTree;
use crate::shared::models::Result;

/// Parser trait - abstraction over parsing implementation
pub trait Parser: Send + Sync {
    /// Parse source code into a ParsedTree
    ///
    /// Fails with an `ErrorKind::Parse` error when the source is not
    /// syntactically valid; no partial tree is returned.
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;

    /// Check a path's extension against `supports_extension`
    fn supports_path(&self, path: &str) -> bool {
        std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.supports_extension(ext))
            .unwrap_or(false)
    }
}
