//! Tree walker driving the per-node detectors
//!
//! Level-order over the syntax tree, visiting nodes in the order Python's
//! `ast.walk` visits the module: a whole depth before the next one, each
//! node's children in AST field order. tree-sitter keeps wrappers the Python
//! AST drops (blocks, parentheses, `else:` clauses, decorators, annotations)
//! and lacks nodes the AST has (the tuple in `a[i, j]`, an `elif` branch),
//! so the walk queues `Entry` values that put every name at its Python depth.
//!
//! Function definitions get the LongFunction, MissingDocstring and
//! function-name checks (`async def` is walked but not checked); every
//! identifier in a variable or parameter position gets the Hebrew check and
//! is recorded as defined or used. UnusedVariable alerts are appended after
//! the walk.
//!
//! Binding positions follow Python's own rules: assignment, annotated and
//! augmented targets, `for` and comprehension targets, `with ... as`, and
//! walrus names are stores; `del` targets are deletes; everything else is a
//! load. Names that are not variables (attribute and keyword-argument names,
//! class names, imports, `global`/`nonlocal`, `except ... as`, match
//! captures) are skipped entirely.

use std::collections::VecDeque;

use crate::config::RuleConfig;
use crate::features::parsing::domain::SyntaxNode;
use crate::features::parsing::infrastructure::tree_sitter::languages::python::{
    is_non_binding_statement, is_target_container,
};
use crate::features::parsing::node_kinds;
use crate::features::rules::domain::{Alert, IdentifierRole};

use super::functions::{function_length, function_name, has_docstring, is_async};
use super::identifiers::contains_hebrew;
use super::names::{NameContext, NameUsage};

/// Run every tree-level detector over `root`
pub fn check_tree(root: &SyntaxNode, config: &RuleConfig) -> Vec<Alert> {
    let mut walker = RuleWalker::new(config);
    walker.walk(root);
    walker.finish()
}

/// One pending node of the level-order walk
enum Entry<'t> {
    /// Expression or statement; identifiers take the given context
    Node(&'t SyntaxNode, NameContext),
    /// AST node tree-sitter has no node for, with its children
    Group(Vec<Entry<'t>>),
    /// Function or class, with the decorators of its `decorated_definition`
    Definition(&'t SyntaxNode, Vec<&'t SyntaxNode>),
    /// Parameter list of a function or lambda
    Arguments(&'t SyntaxNode),
    /// One parameter; its annotation is its only child
    Arg {
        name: &'t SyntaxNode,
        annotation: Option<&'t SyntaxNode>,
    },
    /// `elif` branch and the alternatives after it
    Branch {
        clause: &'t SyntaxNode,
        rest: Vec<&'t SyntaxNode>,
    },
    /// Match pattern
    Pattern(&'t SyntaxNode),
}

struct RuleWalker<'c> {
    config: &'c RuleConfig,
    alerts: Vec<Alert>,
    names: NameUsage,
}

impl<'c> RuleWalker<'c> {
    fn new(config: &'c RuleConfig) -> Self {
        Self {
            config,
            alerts: Vec::new(),
            names: NameUsage::new(),
        }
    }

    fn walk(&mut self, root: &SyntaxNode) {
        let mut queue = VecDeque::from([Entry::Node(root, NameContext::Load)]);
        let mut children = Vec::new();
        while let Some(entry) = queue.pop_front() {
            self.visit(entry, &mut children);
            queue.extend(children.drain(..));
        }
    }

    fn finish(mut self) -> Vec<Alert> {
        let unused: Vec<Alert> = self
            .names
            .unused()
            .map(|(name, line)| Alert::unused_variable(name, line))
            .collect();
        self.alerts.extend(unused);
        self.alerts
    }

    /// Check one entry and queue its children into `out`
    fn visit<'t>(&mut self, entry: Entry<'t>, out: &mut Vec<Entry<'t>>) {
        match entry {
            Entry::Node(node, context) => self.visit_node(node, context, out),
            Entry::Group(children) => out.extend(children),
            Entry::Definition(def, decorators) => self.visit_definition(def, decorators, out),
            Entry::Arguments(params) => push_arguments(params, out),
            Entry::Arg { name, annotation } => {
                self.on_parameter(name);
                if let Some(annotation) = annotation {
                    push(out, annotation, NameContext::Load);
                }
            }
            Entry::Branch { clause, rest } => push_branch(clause, &rest, out),
            Entry::Pattern(pattern) => push_pattern_children(pattern, out),
        }
    }

    fn visit_node<'t>(&mut self, node: &'t SyntaxNode, context: NameContext, out: &mut Vec<Entry<'t>>) {
        if node.is_identifier() {
            self.on_variable(node, context);
            return;
        }

        match node.raw_kind() {
            node_kinds::LAMBDA => {
                if let Some(params) = node.child_by_field("parameters") {
                    out.push(Entry::Arguments(params));
                }
                push_field(out, node, "body", NameContext::Load);
            }
            node_kinds::ASSIGNMENT => push_assignment(node, out),
            node_kinds::AUGMENTED_ASSIGNMENT
            | node_kinds::FOR_STATEMENT
            | node_kinds::FOR_IN_CLAUSE => push_fields(out, node, |field| match field {
                Some("left") => Some(NameContext::Store),
                _ => Some(NameContext::Load),
            }),
            node_kinds::NAMED_EXPRESSION => push_fields(out, node, |field| match field {
                Some("name") => Some(NameContext::Store),
                _ => Some(NameContext::Load),
            }),
            node_kinds::TYPE_ALIAS_STATEMENT => {
                let mut parts = node.named_children();
                if let Some(name) = parts.next() {
                    push(out, name, NameContext::Store);
                }
                for value in parts {
                    push(out, value, NameContext::Load);
                }
            }
            node_kinds::WITH_ITEM => {
                for value in node.named_children() {
                    if value.raw_kind() == node_kinds::AS_PATTERN {
                        push_as_pattern(out, value, Some(NameContext::Store));
                    } else {
                        push(out, value, NameContext::Load);
                    }
                }
            }
            node_kinds::EXCEPT_CLAUSE | node_kinds::EXCEPT_GROUP_CLAUSE => push_except(node, out),
            node_kinds::DELETE_STATEMENT => {
                for target in node.named_children() {
                    // `del a, b` has no tuple in the AST
                    if target.raw_kind() == node_kinds::EXPRESSION_LIST {
                        push_all(out, target.named_children(), NameContext::Del);
                    } else {
                        push(out, target, NameContext::Del);
                    }
                }
            }
            node_kinds::IF_STATEMENT => push_branch(node, &[], out),
            node_kinds::MATCH_STATEMENT => {
                let subjects: Vec<&SyntaxNode> = node
                    .children
                    .iter()
                    .filter(|child| child.field == Some("subject"))
                    .collect();
                push_tuple(out, subjects, NameContext::Load);
                push_field(out, node, "body", NameContext::Load);
            }
            node_kinds::CASE_CLAUSE => push_case(node, out),
            node_kinds::ATTRIBUTE => push_field(out, node, "object", NameContext::Load),
            node_kinds::KEYWORD_ARGUMENT => push_field(out, node, "value", NameContext::Load),
            node_kinds::CALL => {
                push_field(out, node, "function", NameContext::Load);
                if let Some(arguments) = node.child_by_field("arguments") {
                    if arguments.raw_kind() == node_kinds::ARGUMENT_LIST {
                        push_argument_list(out, arguments);
                    } else {
                        push(out, arguments, NameContext::Load);
                    }
                }
            }
            node_kinds::SUBSCRIPT => {
                push_field(out, node, "value", NameContext::Load);
                let indices: Vec<&SyntaxNode> = node
                    .children
                    .iter()
                    .filter(|child| child.field == Some("subscript"))
                    .collect();
                push_tuple(out, indices, NameContext::Load);
            }
            node_kinds::DICTIONARY => push_dictionary(node, out),
            node_kinds::BOOLEAN_OPERATOR => {
                let mut operands = Vec::new();
                bool_operands(node, &mut operands);
                push_all(out, operands.into_iter(), NameContext::Load);
            }
            node_kinds::CONDITIONAL_EXPRESSION => {
                // `body if test else orelse` is stored as (test, body, orelse)
                let parts: Vec<&SyntaxNode> = node.named_children().collect();
                if let [body, test, orelse] = parts[..] {
                    push_all(out, [test, body, orelse].into_iter(), NameContext::Load);
                } else {
                    push_all(out, parts.into_iter(), NameContext::Load);
                }
            }
            node_kinds::EXPRESSION_STATEMENT => {
                let values: Vec<&SyntaxNode> = node.named_children().collect();
                push_tuple(out, values, NameContext::Load);
            }
            node_kinds::CONCATENATED_STRING => {
                for part in node.named_children() {
                    push_all(out, part.named_children(), NameContext::Load);
                }
            }
            node_kinds::GENERIC_TYPE => {
                for child in node.named_children() {
                    if child.raw_kind() == node_kinds::TYPE_PARAMETER {
                        push_tuple(out, child.named_children().collect(), NameContext::Load);
                    } else {
                        push(out, child, NameContext::Load);
                    }
                }
            }
            node_kinds::MEMBER_TYPE => {
                // `module.Name`: only the object side is a variable
                if let Some(object) = node.named_children().next() {
                    push(out, object, NameContext::Load);
                }
            }
            kind if is_non_binding_statement(kind) => {}
            kind if is_target_container(kind) => push_all(out, node.named_children(), context),
            _ => push_all(out, node.named_children(), NameContext::Load),
        }
    }

    fn visit_definition<'t>(
        &mut self,
        def: &'t SyntaxNode,
        decorators: Vec<&'t SyntaxNode>,
        out: &mut Vec<Entry<'t>>,
    ) {
        if def.raw_kind() == node_kinds::CLASS_DEF {
            if let Some(bases) = def.child_by_field("superclasses") {
                push_argument_list(out, bases);
            }
            push_field(out, def, "body", NameContext::Load);
            push_all(out, decorators.into_iter(), NameContext::Load);
            return;
        }

        if !is_async(def) {
            self.check_function(def);
        }
        if let Some(params) = def.child_by_field("parameters") {
            out.push(Entry::Arguments(params));
        }
        push_field(out, def, "body", NameContext::Load);
        push_all(out, decorators.into_iter(), NameContext::Load);
        push_field(out, def, "return_type", NameContext::Load);
    }

    fn check_function(&mut self, func: &SyntaxNode) {
        let name = function_name(func);
        let line = func.start_line();

        let length = function_length(func);
        if length > self.config.max_function_lines {
            self.alerts.push(Alert::long_function(
                name,
                length,
                self.config.max_function_lines,
                line,
            ));
        }
        if !has_docstring(func) {
            self.alerts.push(Alert::missing_docstring(name, line));
        }
        if contains_hebrew(name) {
            self.alerts
                .push(Alert::non_latin_identifier(name, IdentifierRole::Function, line));
        }
    }

    fn on_variable(&mut self, node: &SyntaxNode, context: NameContext) {
        let name = node.text();
        let line = node.start_line();
        self.names.record(name, context, line);
        if contains_hebrew(name) {
            self.alerts
                .push(Alert::non_latin_identifier(name, IdentifierRole::Variable, line));
        }
    }

    fn on_parameter(&mut self, node: &SyntaxNode) {
        let name = node.text();
        if contains_hebrew(name) {
            self.alerts.push(Alert::non_latin_identifier(
                name,
                IdentifierRole::Parameter,
                node.start_line(),
            ));
        }
    }
}

/// Queue `node` as a child, looking through wrappers the AST has no node for
fn push<'t>(out: &mut Vec<Entry<'t>>, node: &'t SyntaxNode, context: NameContext) {
    match node.raw_kind() {
        node_kinds::BLOCK
        | node_kinds::ELSE_CLAUSE
        | node_kinds::FINALLY_CLAUSE
        | node_kinds::WITH_CLAUSE
        | node_kinds::DECORATOR
        | node_kinds::TYPE
        | node_kinds::PARENTHESIZED_EXPRESSION
        | node_kinds::AS_PATTERN_TARGET
        | node_kinds::PAIR => push_all(out, node.named_children(), context),
        node_kinds::EXPRESSION_STATEMENT if is_assignment_statement(node) => {
            push_all(out, node.named_children(), context)
        }
        node_kinds::DECORATED_DEFINITION => {
            let mut decorators = Vec::new();
            for child in node.named_children() {
                if child.raw_kind() == node_kinds::DECORATOR {
                    decorators.push(child);
                } else {
                    out.push(Entry::Definition(child, std::mem::take(&mut decorators)));
                }
            }
        }
        node_kinds::FUNCTION_DEF | node_kinds::CLASS_DEF => {
            out.push(Entry::Definition(node, Vec::new()))
        }
        _ => out.push(Entry::Node(node, context)),
    }
}

fn push_all<'t, I>(out: &mut Vec<Entry<'t>>, nodes: I, context: NameContext)
where
    I: Iterator<Item = &'t SyntaxNode>,
{
    for node in nodes {
        push(out, node, context);
    }
}

fn push_field<'t>(out: &mut Vec<Entry<'t>>, node: &'t SyntaxNode, field: &str, context: NameContext) {
    if let Some(child) = node.child_by_field(field) {
        push(out, child, context);
    }
}

/// Push named children, choosing each one's context from its field; `None` skips it
fn push_fields<'t, F>(out: &mut Vec<Entry<'t>>, node: &'t SyntaxNode, context_of: F)
where
    F: Fn(Option<&str>) -> Option<NameContext>,
{
    for child in node.named_children() {
        if let Some(context) = context_of(child.field) {
            push(out, child, context);
        }
    }
}

/// One node as is; several become the tuple the AST builds from them
fn push_tuple<'t>(out: &mut Vec<Entry<'t>>, nodes: Vec<&'t SyntaxNode>, context: NameContext) {
    if nodes.len() == 1 {
        push_all(out, nodes.into_iter(), context);
    } else if !nodes.is_empty() {
        let mut elements = Vec::new();
        push_all(&mut elements, nodes.into_iter(), context);
        out.push(Entry::Group(elements));
    }
}

/// Assignment and augmented assignment are statements of their own in the AST
fn is_assignment_statement(statement: &SyntaxNode) -> bool {
    let mut values = statement.named_children();
    match (values.next(), values.next()) {
        (Some(value), None) => matches!(
            value.raw_kind(),
            node_kinds::ASSIGNMENT | node_kinds::AUGMENTED_ASSIGNMENT
        ),
        _ => false,
    }
}

/// `a = b = value` is one node with targets `[a, b]`; annotations sit after their target
fn push_assignment<'t>(node: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    let mut current = node;
    loop {
        push_field(out, current, "left", NameContext::Store);
        push_field(out, current, "type", NameContext::Load);
        match current.child_by_field("right") {
            Some(right) if right.raw_kind() == node_kinds::ASSIGNMENT => current = right,
            Some(right) => {
                push(out, right, NameContext::Load);
                break;
            }
            None => break,
        }
    }
}

/// Positional arguments (and bases) come before keywords, wherever they were written
fn push_argument_list<'t>(out: &mut Vec<Entry<'t>>, arguments: &'t SyntaxNode) {
    let is_keyword = |arg: &&SyntaxNode| {
        matches!(
            arg.raw_kind(),
            node_kinds::KEYWORD_ARGUMENT | node_kinds::DICTIONARY_SPLAT
        )
    };
    push_all(
        out,
        arguments.named_children().filter(|arg| !is_keyword(arg)),
        NameContext::Load,
    );
    push_all(out, arguments.named_children().filter(is_keyword), NameContext::Load);
}

/// Dictionary displays keep every key before every value
fn push_dictionary<'t>(node: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    let mut values = Vec::new();
    for item in node.named_children() {
        if item.raw_kind() == node_kinds::PAIR {
            push_field(out, item, "key", NameContext::Load);
            values.extend(item.child_by_field("value"));
        } else if item.raw_kind() == node_kinds::DICTIONARY_SPLAT {
            values.extend(item.named_children());
        } else {
            values.push(item);
        }
    }
    push_all(out, values.into_iter(), NameContext::Load);
}

/// `a or b or c` is one operation with three operands
fn bool_operands<'t>(node: &'t SyntaxNode, operands: &mut Vec<&'t SyntaxNode>) {
    let operator = |n: &SyntaxNode| n.child_by_field("operator").map(|op| op.text().to_string());
    if let Some(left) = node.child_by_field("left") {
        if left.raw_kind() == node_kinds::BOOLEAN_OPERATOR && operator(left) == operator(node) {
            bool_operands(left, operands);
        } else {
            operands.push(left);
        }
    }
    operands.extend(node.child_by_field("right"));
}

/// Condition, body, then the next alternative; each `elif` nests one level down
fn push_branch<'t>(clause: &'t SyntaxNode, rest: &[&'t SyntaxNode], out: &mut Vec<Entry<'t>>) {
    push_field(out, clause, "condition", NameContext::Load);
    push_field(out, clause, "consequence", NameContext::Load);

    let alternatives: Vec<&SyntaxNode> = if clause.raw_kind() == node_kinds::IF_STATEMENT {
        clause
            .children
            .iter()
            .filter(|child| child.field == Some("alternative"))
            .collect()
    } else {
        rest.to_vec()
    };
    match alternatives.split_first() {
        Some((&next, later)) if next.raw_kind() == node_kinds::ELIF_CLAUSE => {
            out.push(Entry::Branch {
                clause: next,
                rest: later.to_vec(),
            });
        }
        Some((&otherwise, _)) => push(out, otherwise, NameContext::Load),
        None => {}
    }
}

/// `expr as alias`; `alias_context` of `None` leaves the alias out
fn push_as_pattern<'t>(out: &mut Vec<Entry<'t>>, node: &'t SyntaxNode, alias_context: Option<NameContext>) {
    for child in node.named_children() {
        let is_alias =
            child.field == Some("alias") || child.raw_kind() == node_kinds::AS_PATTERN_TARGET;
        match (is_alias, alias_context) {
            (true, Some(context)) => push(out, child, context),
            (true, None) => {}
            (false, _) => push(out, child, NameContext::Load),
        }
    }
}

/// The name after `except E as` is a handler label, not a variable
fn push_except<'t>(node: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    let mut after_as = false;
    for child in &node.children {
        if !child.is_named {
            after_as = matches!(child.raw_kind(), "as" | ",");
            continue;
        }
        if after_as || child.field == Some("alias") {
            after_as = false;
            continue;
        }
        if child.raw_kind() == node_kinds::AS_PATTERN {
            push_as_pattern(out, child, None);
        } else {
            push(out, child, NameContext::Load);
        }
    }
}

/// Python's `arguments` field order: positional, `*args`, keyword-only,
/// keyword-only defaults, `**kwargs`, positional defaults
fn push_arguments<'t>(params: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    let mut positional = Vec::new();
    let mut defaults = Vec::new();
    let mut vararg = None;
    let mut keyword_only = Vec::new();
    let mut keyword_defaults = Vec::new();
    let mut kwarg = None;
    let mut after_star = false;

    for param in params.named_children() {
        let (splat, annotation) = match param.raw_kind() {
            node_kinds::TYPED_PARAMETER => (
                param.named_children().find(|child| child.field.is_none()),
                param.child_by_field("type"),
            ),
            _ => (Some(param), None),
        };
        let Some(target) = splat else { continue };

        match target.raw_kind() {
            node_kinds::KEYWORD_SEPARATOR => after_star = true,
            node_kinds::LIST_SPLAT_PATTERN => {
                vararg = target
                    .named_children()
                    .next()
                    .map(|name| Entry::Arg { name, annotation });
                after_star = true;
            }
            node_kinds::DICTIONARY_SPLAT_PATTERN => {
                kwarg = target
                    .named_children()
                    .next()
                    .map(|name| Entry::Arg { name, annotation });
            }
            node_kinds::DEFAULT_PARAMETER | node_kinds::TYPED_DEFAULT_PARAMETER => {
                let Some(name) = target.child_by_field("name").filter(|n| n.is_identifier()) else {
                    continue;
                };
                let arg = Entry::Arg {
                    name,
                    annotation: target.child_by_field("type"),
                };
                let default = target.child_by_field("value");
                if after_star {
                    keyword_only.push(arg);
                    keyword_defaults.extend(default);
                } else {
                    positional.push(arg);
                    defaults.extend(default);
                }
            }
            _ if target.is_identifier() => {
                let arg = Entry::Arg { name: target, annotation };
                if after_star {
                    keyword_only.push(arg);
                } else {
                    positional.push(arg);
                }
            }
            // `/` separator
            _ => {}
        }
    }

    out.extend(positional);
    out.extend(vararg);
    out.extend(keyword_only);
    push_all(out, keyword_defaults.into_iter(), NameContext::Load);
    out.extend(kwarg);
    push_all(out, defaults.into_iter(), NameContext::Load);
}

/// Patterns, guard, body; several top-level patterns form one sequence pattern
fn push_case<'t>(clause: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    let patterns: Vec<&SyntaxNode> = clause
        .named_children()
        .filter(|child| child.raw_kind() == node_kinds::CASE_PATTERN)
        .collect();
    if patterns.len() == 1 {
        push_pattern(out, patterns[0]);
    } else {
        let mut sequence = Vec::new();
        for pattern in patterns {
            push_pattern(&mut sequence, pattern);
        }
        out.push(Entry::Group(sequence));
    }

    if let Some(guard) = clause.child_by_field("guard") {
        push_all(out, guard.named_children(), NameContext::Load);
    }
    push_field(out, clause, "consequence", NameContext::Load);
}

/// Queue a pattern, looking through `case_pattern` and `k=` wrappers
fn push_pattern<'t>(out: &mut Vec<Entry<'t>>, node: &'t SyntaxNode) {
    match node.raw_kind() {
        node_kinds::CASE_PATTERN => {
            for child in node.named_children() {
                push_pattern(out, child);
            }
        }
        // `attr=pattern`: the attribute name is a plain string
        node_kinds::KEYWORD_PATTERN => {
            for child in node.named_children().skip(1) {
                push_pattern(out, child);
            }
        }
        _ => out.push(Entry::Pattern(node)),
    }
}

/// Only class names and dotted value patterns read variables; captures bind
/// pattern names, not variables
fn push_pattern_children<'t>(pattern: &'t SyntaxNode, out: &mut Vec<Entry<'t>>) {
    match pattern.raw_kind() {
        // `Color.RED` compares against a value; a bare name is a capture
        node_kinds::DOTTED_NAME => {
            if pattern.named_children().count() > 1 {
                out.extend(dotted_value(pattern));
            }
        }
        node_kinds::CLASS_PATTERN => {
            let mut parts = pattern.named_children();
            if let Some(class) = parts.next() {
                out.extend(dotted_value(class));
            }
            for part in parts {
                push_pattern(out, part);
            }
        }
        node_kinds::DICT_PATTERN => {
            let mut values = Vec::new();
            for child in pattern.named_children() {
                match child.field {
                    Some("key") if child.raw_kind() == node_kinds::DOTTED_NAME => {
                        out.extend(dotted_value(child))
                    }
                    Some("value") => values.push(child),
                    _ => {}
                }
            }
            for value in values {
                push_pattern(out, value);
            }
        }
        node_kinds::AS_PATTERN
        | node_kinds::TUPLE_PATTERN
        | "list_pattern"
        | "union_pattern" => {
            for child in pattern.named_children() {
                if !child.is_identifier() {
                    push_pattern(out, child);
                }
            }
        }
        _ => {}
    }
}

/// `a.b.c` as an expression: `a` is a load one level deeper per attribute
fn dotted_value(dotted: &SyntaxNode) -> Option<Entry<'_>> {
    let parts = dotted.named_children().count();
    let first = dotted.named_children().next()?;
    let mut entry = Entry::Node(first, NameContext::Load);
    for _ in 1..parts {
        entry = Entry::Group(vec![entry]);
    }
    Some(entry)
}
