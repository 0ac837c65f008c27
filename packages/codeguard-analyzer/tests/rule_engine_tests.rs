//! Rule Engine integration tests
//!
//! Detector thresholds, docstring detection, Hebrew identifiers, unused
//! variables, alert ordering and parse failures through the public API.

mod common;

use codeguard_analyzer::{AlertDetail, AlertKind, IdentifierRole, RuleConfig, RuleEngine};
use common::*;
use pretty_assertions::assert_eq;

fn engine() -> RuleEngine {
    RuleEngine::new(RuleConfig::default())
}

// ═══════════════════════════════════════════════════════════════════════════
// LongFile
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_200_lines_is_not_long() {
    let alerts = engine().analyze(&fixture_n_lines(200), "f.py").unwrap();
    assert!(alerts.is_empty(), "{:?}", alerts);
}

#[test]
fn test_201_lines_is_long() {
    let alerts = engine().analyze(&fixture_n_lines(201), "f.py").unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].detail, AlertDetail::LongFile { line_count: 201 });
    assert_eq!(
        alerts[0].message,
        "The file has 201 lines, which exceeds the recommended limit of 200."
    );
}

#[test]
fn test_line_counting_follows_splitlines() {
    let engine = RuleEngine::new(RuleConfig::default().max_file_lines(2));

    // No trailing newline still counts the last line; "\r\n" is one break
    assert!(engine.analyze("print(1)\r\nprint(2)", "f.py").unwrap().is_empty());
    let alerts = engine.analyze("print(1)\nprint(2)\nprint(3)", "f.py").unwrap();
    assert_eq!(alerts[0].line_count(), Some(3));
}

// ═══════════════════════════════════════════════════════════════════════════
// LongFunction
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_20_line_function_is_not_long() {
    let alerts = engine()
        .analyze(&fixture_function_of_length("ok", 20), "f.py")
        .unwrap();
    assert_no_kind(&alerts, AlertKind::LongFunction);
}

#[test]
fn test_21_line_function_is_long() {
    let alerts = engine()
        .analyze(&fixture_function_of_length("too_long", 21), "f.py")
        .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].detail,
        AlertDetail::LongFunction {
            function_name: "too_long".to_string(),
            line_count: 21,
        }
    );
    assert_eq!(
        alerts[0].message,
        "Function 'too_long' has 21 lines, which exceeds 20."
    );
    assert_eq!(alerts[0].line, Some(1));
}

#[test]
fn test_methods_are_functions() {
    let method = fixture_function_of_length("run", 25)
        .lines()
        .map(|line| format!("    {line}\n"))
        .collect::<String>();
    let source = format!("class Job:\n    \"\"\"Doc.\"\"\"\n{method}");

    let alerts = engine().analyze(&source, "f.py").unwrap();
    assert_eq!(kinds(&alerts), vec![AlertKind::LongFunction]);
    assert_eq!(alerts[0].subject(), Some("run"));
    assert_eq!(alerts[0].line_count(), Some(25));
}

#[test]
fn test_custom_function_threshold() {
    let engine = RuleEngine::new(RuleConfig::default().max_function_lines(5));
    let alerts = engine
        .analyze(&fixture_function_of_length("f", 6), "f.py")
        .unwrap();
    assert_eq!(
        alerts[0].message,
        "Function 'f' has 6 lines, which exceeds 5."
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// MissingDocstring
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_docstring_presence() {
    let documented = [
        "\"\"\"Summary line.\"\"\"",
        "'single quoted'",
        "\"\"\"\n    Multi-line\n    \"\"\"",
        "('Parenthesized.')",
    ];
    for statement in documented {
        let alerts = engine()
            .analyze(&fixture_function_with_first_statement(statement), "f.py")
            .unwrap();
        assert_no_kind(&alerts, AlertKind::MissingDocstring);
    }

    let undocumented = ["pass", "print('not a docstring')", "\"\"\"\"\"\"", "f\"{1}\""];
    for statement in undocumented {
        let alerts = engine()
            .analyze(&fixture_function_with_first_statement(statement), "f.py")
            .unwrap();
        assert_eq!(
            count_kind(&alerts, AlertKind::MissingDocstring),
            1,
            "{statement}"
        );
    }
}

#[test]
fn test_async_functions_are_not_reported() {
    let source = "\
async def שלום(פרמטר):
    return None
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert_no_kind(&alerts, AlertKind::MissingDocstring);
    assert_eq!(hebrew_identifiers(&alerts), vec!["פרמטר"]);
}

#[test]
fn test_missing_docstring_message() {
    let alerts = engine().analyze("def helper():\n    return 1\n", "f.py").unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "Function 'helper' is missing a docstring.");
}

// ═══════════════════════════════════════════════════════════════════════════
// NonLatinIdentifier
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_hebrew_identifiers_alert() {
    let source = "\
def חשב(מספר):
    \"\"\"Doc.\"\"\"
    תוצאה = מספר * 2
    return תוצאה
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert_eq!(
        hebrew_identifiers(&alerts),
        vec!["חשב", "מספר", "תוצאה", "תוצאה", "מספר"]
    );
    assert_eq!(
        alerts[0].message,
        "The function name 'חשב' contains Hebrew characters, which is not recommended."
    );
    assert_eq!(
        alerts[1].message,
        "The parameter name 'מספר' contains Hebrew characters, which is not recommended."
    );
}

#[test]
fn test_latin_and_other_scripts_never_alert() {
    let source = "\
def größe(значение):
    \"\"\"Doc.\"\"\"
    café = значение
    return café
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert_no_kind(&alerts, AlertKind::NonLatinIdentifier);
}

#[test]
fn test_each_occurrence_alerts_separately() {
    let alerts = engine().analyze("שם = 1\nprint(שם)\nprint(שם)\n", "f.py").unwrap();
    assert_eq!(hebrew_identifiers(&alerts), vec!["שם", "שם", "שם"]);
    assert!(alerts.iter().all(|alert| match &alert.detail {
        AlertDetail::NonLatinIdentifier { role, .. } => *role == IdentifierRole::Variable,
        _ => true,
    }));
}

// ═══════════════════════════════════════════════════════════════════════════
// UnusedVariable
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unused_is_defined_minus_used() {
    let source = "\
import os
total = 0
count = 0
for item in range(3):
    total += item
result = total
with open(os.devnull) as handle:
    pass
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert_eq!(unused_names(&alerts), set(&["count", "result", "handle"]));
}

#[test]
fn test_analysis_is_flat_across_scopes() {
    let source = "\
def first():
    \"\"\"Doc.\"\"\"
    value = 1
    return None

def second():
    \"\"\"Doc.\"\"\"
    return value
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert!(unused_names(&alerts).is_empty());
}

#[test]
fn test_match_class_and_value_patterns_are_uses() {
    let source = "\
Point = object
Color = object
p = None
match p:
    case Point():
        pass
    case Color.RED:
        pass
    case captured:
        pass
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    assert!(alerts.is_empty(), "{:?}", alerts);
}

#[test]
fn test_unused_message() {
    let alerts = engine().analyze("temp = 42\n", "f.py").unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "The variable 'temp' is defined but never used.");
}

// ═══════════════════════════════════════════════════════════════════════════
// Ordering and failures
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_alert_order() {
    let engine = RuleEngine::new(RuleConfig::default().max_file_lines(2));
    let source = "\
unused = 1
def שלום():
    return None
";
    let alerts = engine.analyze(source, "f.py").unwrap();
    assert_eq!(
        kinds(&alerts),
        vec![
            AlertKind::LongFile,
            AlertKind::MissingDocstring,
            AlertKind::NonLatinIdentifier,
            AlertKind::UnusedVariable,
        ]
    );
}

#[test]
fn test_alerts_follow_tree_depth() {
    let source = "\
def a(פ):
    \"\"\"d\"\"\"
def b():
    \"\"\"d\"\"\"
    return b
ש = 1
";
    let alerts = engine().analyze(source, "f.py").unwrap();
    let summary: Vec<(AlertKind, Option<&str>)> = alerts
        .iter()
        .map(|alert| (alert.kind(), alert.subject()))
        .collect();
    // The module-level name is one level shallower than the parameter
    assert_eq!(
        summary,
        vec![
            (AlertKind::NonLatinIdentifier, Some("ש")),
            (AlertKind::NonLatinIdentifier, Some("פ")),
            (AlertKind::UnusedVariable, Some("ש")),
        ]
    );
}

#[test]
fn test_python2_syntax_is_a_parse_error() {
    let sources = [
        ("print 'hi'\n", 1),
        ("try:\n    pass\nexcept ValueError, e:\n    pass\n", 3),
        ("x = 1\ndel f()\n", 2),
    ];
    for (source, line) in sources {
        let err = engine().analyze(source, "old.py").unwrap_err();
        assert!(err.is_parse(), "{source}");
        assert_eq!(err.line, Some(line), "{source}");
    }
}

#[test]
fn test_invalid_source_is_a_parse_error() {
    let err = engine()
        .analyze("def ok():\n    pass\n\nclass (:\n", "broken.py")
        .unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.file_path.as_deref(), Some("broken.py"));
    assert_eq!(err.line, Some(4));
}

#[test]
fn test_empty_source_has_no_alerts() {
    assert!(engine().analyze("", "empty.py").unwrap().is_empty());
}
