//! Parsing Feature
//!
//! Responsible for AST parsing and syntax tree conversion.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode models
//! - `ports/` - Parser trait
//! - `infrastructure/` - TreeSitterParser, Python node kinds

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::{count_lines, ParsedTree, SyntaxKind, SyntaxNode};
pub use infrastructure::tree_sitter::languages::python::node_kinds;
pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
