//! Function-level measurements: span length and docstring presence

use crate::features::parsing::domain::SyntaxNode;
use crate::features::parsing::node_kinds;

/// Function name, or "" when the grammar recovered without one
pub fn function_name(func: &SyntaxNode) -> &str {
    func.child_by_field("name").map(SyntaxNode::text).unwrap_or("")
}

/// `async def`; coroutines are left out of the function-level checks
pub fn is_async(func: &SyntaxNode) -> bool {
    func.children
        .iter()
        .any(|child| !child.is_named && child.raw_kind() == "async")
}

/// Lines from `def` to the start of the last node inside the function
///
/// Strings are single nodes, so a trailing multi-line string counts only
/// up to its first line. Comments are not nodes.
pub fn function_length(func: &SyntaxNode) -> usize {
    let last = last_node_line(func);
    (last - func.start_line() + 1) as usize
}

fn last_node_line(node: &SyntaxNode) -> u32 {
    let start = node.start_line();
    if is_string_literal(node) {
        return start;
    }
    node.named_children()
        .map(last_node_line)
        .fold(start, u32::max)
}

fn is_string_literal(node: &SyntaxNode) -> bool {
    matches!(
        node.raw_kind(),
        node_kinds::STRING | node_kinds::CONCATENATED_STRING
    )
}

/// First body statement is a non-blank, non-f, non-bytes string literal
pub fn has_docstring(func: &SyntaxNode) -> bool {
    let Some(first) = func
        .child_by_field("body")
        .and_then(|body| body.named_children().next())
    else {
        return false;
    };
    if first.raw_kind() != node_kinds::EXPRESSION_STATEMENT {
        return false;
    }

    let mut exprs = first.named_children();
    match (exprs.next(), exprs.next()) {
        (Some(expr), None) => docstring_text(expr)
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false),
        _ => false,
    }
}

fn docstring_text(expr: &SyntaxNode) -> Option<String> {
    match expr.raw_kind() {
        // Parentheses do not survive parsing: `("Doc.")` is still a docstring
        node_kinds::PARENTHESIZED_EXPRESSION => {
            let mut inner = expr.named_children();
            match (inner.next(), inner.next()) {
                (Some(expr), None) => docstring_text(expr),
                _ => None,
            }
        }
        node_kinds::STRING => literal_body(expr.text()).map(str::to_string),
        node_kinds::CONCATENATED_STRING => expr
            .named_children()
            .map(|part| literal_body(part.text()))
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        _ => None,
    }
}

/// Text between the quotes; `None` for f-strings and bytes
fn literal_body(raw: &str) -> Option<&str> {
    let quote_at = raw.find(|c: char| c == '"' || c == '\'')?;
    let (prefix, rest) = raw.split_at(quote_at);
    if prefix
        .chars()
        .any(|c| matches!(c.to_ascii_lowercase(), 'f' | 'b'))
    {
        return None;
    }

    let delimiter = if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
        &rest[..3]
    } else {
        &rest[..1]
    };
    rest.strip_prefix(delimiter)?.strip_suffix(delimiter)
}
