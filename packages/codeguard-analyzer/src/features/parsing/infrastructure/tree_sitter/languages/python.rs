//! Python-specific tree-sitter configuration

use tree_sitter::Node;

/// Python node kinds for quick lookup
pub mod node_kinds {
    pub const MODULE: &str = "module";
    pub const BLOCK: &str = "block";

    // Definitions
    pub const FUNCTION_DEF: &str = "function_definition";
    pub const CLASS_DEF: &str = "class_definition";
    pub const LAMBDA: &str = "lambda";
    pub const DECORATOR: &str = "decorator";

    // Parameters
    pub const PARAMETERS: &str = "parameters";
    pub const LAMBDA_PARAMETERS: &str = "lambda_parameters";
    pub const DEFAULT_PARAMETER: &str = "default_parameter";
    pub const TYPED_PARAMETER: &str = "typed_parameter";
    pub const TYPED_DEFAULT_PARAMETER: &str = "typed_default_parameter";
    pub const LIST_SPLAT_PATTERN: &str = "list_splat_pattern";
    pub const DICTIONARY_SPLAT_PATTERN: &str = "dictionary_splat_pattern";
    pub const KEYWORD_SEPARATOR: &str = "keyword_separator";
    pub const TUPLE_PATTERN: &str = "tuple_pattern";

    // Binding statements
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const ASSIGNMENT: &str = "assignment";
    pub const AUGMENTED_ASSIGNMENT: &str = "augmented_assignment";
    pub const FOR_STATEMENT: &str = "for_statement";
    pub const FOR_IN_CLAUSE: &str = "for_in_clause";
    pub const NAMED_EXPRESSION: &str = "named_expression";
    pub const AS_PATTERN: &str = "as_pattern";
    pub const AS_PATTERN_TARGET: &str = "as_pattern_target";
    pub const EXCEPT_CLAUSE: &str = "except_clause";
    pub const EXCEPT_GROUP_CLAUSE: &str = "except_group_clause";
    pub const DELETE_STATEMENT: &str = "delete_statement";
    pub const WITH_ITEM: &str = "with_item";
    pub const TYPE_ALIAS_STATEMENT: &str = "type_alias_statement";

    // Compound statements
    pub const DECORATED_DEFINITION: &str = "decorated_definition";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const ELIF_CLAUSE: &str = "elif_clause";
    pub const ELSE_CLAUSE: &str = "else_clause";
    pub const FINALLY_CLAUSE: &str = "finally_clause";
    pub const WITH_CLAUSE: &str = "with_clause";
    pub const MATCH_STATEMENT: &str = "match_statement";
    pub const CASE_CLAUSE: &str = "case_clause";

    // Python 2 statements the grammar still accepts
    pub const PRINT_STATEMENT: &str = "print_statement";
    pub const EXEC_STATEMENT: &str = "exec_statement";

    // Statements whose identifiers are not variables
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_FROM_STATEMENT: &str = "import_from_statement";
    pub const FUTURE_IMPORT_STATEMENT: &str = "future_import_statement";
    pub const GLOBAL_STATEMENT: &str = "global_statement";
    pub const NONLOCAL_STATEMENT: &str = "nonlocal_statement";

    // Match patterns
    pub const CASE_PATTERN: &str = "case_pattern";
    pub const CLASS_PATTERN: &str = "class_pattern";
    pub const KEYWORD_PATTERN: &str = "keyword_pattern";
    pub const DICT_PATTERN: &str = "dict_pattern";
    pub const DOTTED_NAME: &str = "dotted_name";

    // Expressions
    pub const IDENTIFIER: &str = "identifier";
    pub const KEYWORD_IDENTIFIER: &str = "keyword_identifier";
    pub const ATTRIBUTE: &str = "attribute";
    pub const SUBSCRIPT: &str = "subscript";
    pub const CALL: &str = "call";
    pub const ARGUMENT_LIST: &str = "argument_list";
    pub const KEYWORD_ARGUMENT: &str = "keyword_argument";
    pub const DICTIONARY_SPLAT: &str = "dictionary_splat";
    pub const DICTIONARY: &str = "dictionary";
    pub const PAIR: &str = "pair";
    pub const BOOLEAN_OPERATOR: &str = "boolean_operator";
    pub const CONDITIONAL_EXPRESSION: &str = "conditional_expression";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub const EXPRESSION_LIST: &str = "expression_list";
    pub const TYPE: &str = "type";
    pub const GENERIC_TYPE: &str = "generic_type";
    pub const MEMBER_TYPE: &str = "member_type";
    pub const TYPE_PARAMETER: &str = "type_parameter";
    pub const STRING: &str = "string";
    pub const STRING_START: &str = "string_start";
    pub const STRING_CONTENT: &str = "string_content";
    pub const INTERPOLATION: &str = "interpolation";
    pub const CONCATENATED_STRING: &str = "concatenated_string";
}

/// Containers that hand their binding role down to every element
///
/// `a, (b, *c) = ...` binds `a`, `b` and `c`.
pub fn is_target_container(kind: &str) -> bool {
    matches!(
        kind,
        "pattern_list"
            | "tuple_pattern"
            | "list_pattern"
            | "expression_list"
            | "tuple"
            | "list"
            | "parenthesized_expression"
            | "list_splat"
            | "list_splat_pattern"
            | node_kinds::AS_PATTERN_TARGET
    )
}

/// Statements whose identifiers name modules or scopes, never variables
pub fn is_non_binding_statement(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::IMPORT_STATEMENT
            | node_kinds::IMPORT_FROM_STATEMENT
            | node_kinds::FUTURE_IMPORT_STATEMENT
            | node_kinds::GLOBAL_STATEMENT
            | node_kinds::NONLOCAL_STATEMENT
    )
}

/// Why Python 3 rejects a construct tree-sitter parsed without error
///
/// The grammar still covers Python 2 (`print x`, `except E, e`, sublist
/// parameters) and is looser than CPython about `del` targets.
pub fn python3_violation(node: &Node) -> Option<String> {
    match node.kind() {
        node_kinds::PRINT_STATEMENT => Some("missing parentheses in call to 'print'".to_string()),
        node_kinds::EXEC_STATEMENT => Some("missing parentheses in call to 'exec'".to_string()),
        node_kinds::EXCEPT_CLAUSE => {
            let mut cursor = node.walk();
            let has_comma = node.children(&mut cursor).any(|child| child.kind() == ",");
            has_comma.then(|| "multiple exception types must be parenthesized".to_string())
        }
        node_kinds::DELETE_STATEMENT => program_children(node)
            .iter()
            .find_map(undeletable)
            .map(|what| format!("cannot delete {}", what)),
        node_kinds::TUPLE_PATTERN => {
            let in_signature = node.parent().is_some_and(|parent| {
                matches!(
                    parent.kind(),
                    node_kinds::PARAMETERS
                        | node_kinds::LAMBDA_PARAMETERS
                        | node_kinds::DEFAULT_PARAMETER
                )
            });
            in_signature.then(|| "sublist parameters are not supported".to_string())
        }
        _ => None,
    }
}

/// What a `del` target is, when it is not a name, attribute or subscript
fn undeletable(target: &Node) -> Option<&'static str> {
    match target.kind() {
        node_kinds::IDENTIFIER
        | node_kinds::KEYWORD_IDENTIFIER
        | node_kinds::ATTRIBUTE
        | node_kinds::SUBSCRIPT => None,
        node_kinds::EXPRESSION_LIST | "tuple" | "list" | node_kinds::PARENTHESIZED_EXPRESSION => {
            program_children(target).iter().find_map(undeletable)
        }
        node_kinds::CALL => Some("function call"),
        node_kinds::STRING
        | node_kinds::CONCATENATED_STRING
        | "integer"
        | "float"
        | "true"
        | "false"
        | "none"
        | "ellipsis" => Some("literal"),
        _ => Some("expression"),
    }
}

/// Named children minus comments
fn program_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}
