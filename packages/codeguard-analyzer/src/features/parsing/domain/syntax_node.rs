//! Language-neutral syntax node representation
//!
//! Abstracts tree-sitter nodes for use in domain logic.

use crate::shared::models::Span;

/// Syntax node kind (language-neutral)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxKind {
    // Definitions
    FunctionDef,
    ClassDef,
    LambdaDef,

    // Declarations
    ParameterList,
    ParameterDecl,
    ImportDecl,

    // Expressions
    NameExpr,
    AttributeExpr,
    LiteralExpr,

    // Statements
    ExpressionStmt,
    AssignmentStmt,
    AugAssignmentStmt,

    // Other
    Block,
    Decorator,

    // Unknown/Other
    Other(String),
}

impl SyntaxKind {
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDef | SyntaxKind::ClassDef | SyntaxKind::LambdaDef
        )
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            SyntaxKind::AssignmentStmt | SyntaxKind::AugAssignmentStmt
        )
    }
}

/// Language-neutral syntax node
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Span,
    /// Source text, kept for leaves and string literals
    pub text: Option<String>,
    pub children: Vec<SyntaxNode>,

    /// Original tree-sitter kind
    pub raw_kind: Option<String>,

    /// Grammar field this node fills in its parent (`name`, `left`, `body`, ...)
    pub field: Option<&'static str>,

    /// Named grammar node (false for punctuation and keywords)
    pub is_named: bool,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self {
            kind,
            span,
            text: None,
            children: Vec::new(),
            raw_kind: None,
            field: None,
            is_named: true,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_raw_kind(mut self, raw_kind: impl Into<String>) -> Self {
        self.raw_kind = Some(raw_kind.into());
        self
    }

    pub fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }

    pub fn with_named(mut self, is_named: bool) -> Self {
        self.is_named = is_named;
        self
    }

    /// Find first child of given kind
    pub fn find_child(&self, kind: &SyntaxKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| &c.kind == kind)
    }

    /// First child filling the given grammar field
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(|c| c.is_named)
    }

    /// Get text content
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn raw_kind(&self) -> &str {
        self.raw_kind.as_deref().unwrap_or("")
    }

    /// Plain identifier, including soft keywords used as names (`match`, `type`)
    pub fn is_identifier(&self) -> bool {
        matches!(self.raw_kind(), "identifier" | "keyword_identifier")
    }

    pub fn start_line(&self) -> u32 {
        self.span.start_line
    }
}
