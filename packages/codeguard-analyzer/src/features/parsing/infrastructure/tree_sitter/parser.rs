//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use tracing::debug;
use tree_sitter::{Node, Parser as TSParser, Tree};

use super::languages::python::{node_kinds, python3_violation};
use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};
use crate::features::parsing::ports::Parser;
use crate::shared::models::{CodeguardError, Result, Span};

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: TreeSitterLanguage,
}

/// Supported tree-sitter languages
#[derive(Debug, Clone, Copy)]
pub enum TreeSitterLanguage {
    Python,
}

impl TreeSitterParser {
    /// Create a Python parser
    pub fn python() -> Self {
        Self {
            language: TreeSitterLanguage::Python,
        }
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.language {
            TreeSitterLanguage::Python => tree_sitter_python::language(),
        }
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &str) -> ParsedTree {
        let root = self.convert_node(&tree.root_node(), source);

        ParsedTree::new(
            root,
            source.to_string(),
            file_path.to_string(),
            self.language_name().to_string(),
        )
    }

    /// Convert a tree-sitter node to SyntaxNode
    fn convert_node(&self, node: &Node, source: &str) -> SyntaxNode {
        let mut children = Vec::with_capacity(node.child_count());
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                // Comments and line continuations are not part of the program
                if !child.is_extra() {
                    children.push(
                        self.convert_node(&child, source)
                            .with_field(cursor.field_name()),
                    );
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        let keeps_text = node.child_count() == 0 || node.kind() == node_kinds::STRING;
        let mut converted = SyntaxNode::new(self.map_node_kind(node.kind()), node_span(node))
            .with_raw_kind(node.kind())
            .with_named(node.is_named())
            .with_children(children);
        if keeps_text {
            converted = converted.with_text(source.get(node.byte_range()).unwrap_or(""));
        }
        converted
    }

    /// Map tree-sitter node kind to our SyntaxKind
    fn map_node_kind(&self, ts_kind: &str) -> SyntaxKind {
        match ts_kind {
            // Definitions
            "function_definition" => SyntaxKind::FunctionDef,
            "class_definition" => SyntaxKind::ClassDef,
            "lambda" => SyntaxKind::LambdaDef,

            // Declarations
            "parameters" | "lambda_parameters" => SyntaxKind::ParameterList,
            "default_parameter" | "typed_parameter" | "typed_default_parameter" => {
                SyntaxKind::ParameterDecl
            }
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                SyntaxKind::ImportDecl
            }

            // Expressions
            "identifier" | "keyword_identifier" => SyntaxKind::NameExpr,
            "attribute" => SyntaxKind::AttributeExpr,
            "string" | "concatenated_string" | "integer" | "float" | "true" | "false"
            | "none" => SyntaxKind::LiteralExpr,

            // Statements
            "expression_statement" => SyntaxKind::ExpressionStmt,
            "assignment" => SyntaxKind::AssignmentStmt,
            "augmented_assignment" => SyntaxKind::AugAssignmentStmt,

            // Other
            "block" | "module" => SyntaxKind::Block,
            "decorator" => SyntaxKind::Decorator,

            // Unknown
            other => SyntaxKind::Other(other.to_string()),
        }
    }
}

/// First ERROR or MISSING node in document order
fn first_error<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error)
}

/// First construct Python 3 rejects although the grammar accepted it
fn first_violation<'t>(node: &Node<'t>) -> Option<(Node<'t>, String)> {
    if let Some(message) = python3_violation(node) {
        return Some((*node, message));
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    children.iter().find_map(first_violation)
}

fn node_span(node: &Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        start.row as u32 + 1,
        start.column as u32,
        end.row as u32 + 1,
        end.column as u32,
    )
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| CodeguardError::internal(format!("Failed to set language: {}", e)))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            CodeguardError::parse("Failed to parse source code").with_file(file_path)
        })?;

        if let Some(error) = first_error(&tree.root_node()) {
            let message = if error.is_missing() {
                format!("invalid syntax: missing '{}'", error.kind())
            } else {
                "invalid syntax".to_string()
            };
            debug!(file_path, line = error.start_position().row + 1, "syntax error");
            return Err(CodeguardError::parse(message)
                .with_file(file_path)
                .with_line(error.start_position().row as u32 + 1));
        }

        if let Some((node, reason)) = first_violation(&tree.root_node()) {
            let line = node.start_position().row as u32 + 1;
            debug!(file_path, line, reason = reason.as_str(), "python 3 syntax error");
            return Err(CodeguardError::parse(format!("invalid syntax: {}", reason))
                .with_file(file_path)
                .with_line(line));
        }

        Ok(self.convert_tree(&tree, source, file_path))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.language {
            TreeSitterLanguage::Python => matches!(ext, "py" | "pyi"),
        }
    }

    fn language_name(&self) -> &'static str {
        match self.language {
            TreeSitterLanguage::Python => "python",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;

    #[test]
    fn test_parse_python_function() {
        let parser = TreeSitterParser::python();
        let source = "def hello():\n    pass";
        let tree = parser.parse(source, "test.py").unwrap();

        let func = &tree.root.children[0];
        assert_eq!(func.kind, SyntaxKind::FunctionDef);
        assert_eq!(func.child_by_field("name").unwrap().text(), "hello");
        assert_eq!(func.child_by_field("body").unwrap().raw_kind(), "block");
    }

    #[test]
    fn test_comments_are_dropped() {
        let parser = TreeSitterParser::python();
        let tree = parser.parse("# header\nx = 1  # trailing\n", "test.py").unwrap();

        assert_eq!(tree.root.children.len(), 1);
        assert_eq!(tree.root.children[0].raw_kind(), "expression_statement");
    }

    #[test]
    fn test_string_keeps_text() {
        let parser = TreeSitterParser::python();
        let tree = parser.parse("'''doc\nstring'''\n", "test.py").unwrap();

        let string = &tree.root.children[0].children[0];
        assert_eq!(string.raw_kind(), "string");
        assert_eq!(string.text(), "'''doc\nstring'''");
    }

    #[test]
    fn test_syntax_error_is_reported_with_line() {
        let parser = TreeSitterParser::python();
        let err = parser
            .parse("def ok():\n    pass\n\ndef broken(:\n    pass\n", "bad.py")
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.file_path.as_deref(), Some("bad.py"));
        assert_eq!(err.line, Some(4));
    }

    #[test]
    fn test_python2_syntax_is_rejected() {
        let parser = TreeSitterParser::python();
        let cases = [
            ("x = 1\nprint 'hi'\n", 2, "missing parentheses in call to 'print'"),
            ("exec 'x = 1'\n", 1, "missing parentheses in call to 'exec'"),
            (
                "try:\n    pass\nexcept ValueError, e:\n    pass\n",
                3,
                "multiple exception types must be parenthesized",
            ),
            ("del f()\n", 1, "cannot delete function call"),
        ];

        for (source, line, reason) in cases {
            let err = parser.parse(source, "legacy.py").unwrap_err();
            assert!(err.is_parse(), "{source:?}");
            assert_eq!(err.line, Some(line), "{source:?}");
            assert_eq!(err.message, format!("invalid syntax: {}", reason));
        }
    }

    #[test]
    fn test_supports_path() {
        let parser = TreeSitterParser::python();
        assert!(parser.supports_path("pkg/module.py"));
        assert!(parser.supports_path("stubs.pyi"));
        assert!(!parser.supports_path("README.md"));
        assert!(!parser.supports_path("Makefile"));
    }
}
