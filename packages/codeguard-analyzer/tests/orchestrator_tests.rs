//! Orchestrator integration tests
//!
//! Analysis plus history recording on real stores, batch isolation, reports
//! and summaries.

mod common;

use std::fs;

use codeguard_analyzer::pipeline::{render_lines, write_report, TrendSeries};
use codeguard_analyzer::{
    AlertKind, AnalysisOrchestrator, AnalysisSummary, CodeguardConfig, HistoryBackend,
    HistoryConfig, HistoryStore, RuleConfig, RuleEngine,
};
use codeguard_storage::{InMemoryHistoryStore, JsonFileHistoryStore};
use common::*;
use pretty_assertions::assert_eq;

fn batch(files: &[(&str, &str)]) -> Vec<(String, String)> {
    files
        .iter()
        .map(|(file, source)| (file.to_string(), source.to_string()))
        .collect()
}

fn memory_orchestrator() -> AnalysisOrchestrator<InMemoryHistoryStore> {
    AnalysisOrchestrator::new(RuleEngine::default(), InMemoryHistoryStore::new())
}

#[test]
fn test_history_follows_analyses_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis_history.json");
    let orchestrator = AnalysisOrchestrator::new(
        RuleEngine::new(RuleConfig::default()),
        JsonFileHistoryStore::new(&path),
    );

    orchestrator.analyze_file("a = 1\nb = 2\n", "app/main.py").unwrap();
    orchestrator.analyze_file("a = 1\nprint(a)\n", "app/main.py").unwrap();

    let counts: Vec<u64> = orchestrator
        .trend("app/main.py")
        .unwrap()
        .iter()
        .map(|record| record.issue_count)
        .collect();
    assert_eq!(counts, vec![2, 0]);

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["app/main.py"][0]["issues"], 2);
    assert_eq!(document["app/main.py"][1]["issues"], 0);
}

#[test]
fn test_parse_error_leaves_history_untouched() {
    let orchestrator = memory_orchestrator();
    orchestrator.analyze_file("x = 1\n", "m.py").unwrap();

    assert!(orchestrator.analyze_file("def broken(:\n", "m.py").is_err());
    assert_eq!(orchestrator.trend("m.py").unwrap().len(), 1);
}

#[test]
fn test_batch_keeps_going_after_failure() {
    let orchestrator = memory_orchestrator();
    let files = batch(&[
        ("a.py", "def f():\n    return 1\n"),
        ("b.py", "def (:\n"),
        ("c.py", "unused = 1\n"),
    ]);

    let reports = orchestrator.analyze_batch(&files);
    assert_eq!(
        render_lines(&reports)
            .iter()
            .map(|line| line.split(" - ").next().unwrap_or_default().to_string())
            .collect::<Vec<_>>(),
        vec![
            "a.py: Function 'f' is missing a docstring.",
            "b.py: ERROR",
            "c.py: The variable 'unused' is defined but never used.",
        ]
    );

    let recorded = orchestrator.store().files().unwrap();
    assert_eq!(recorded, vec!["a.py", "c.py"]);
}

#[test]
fn test_batch_report_json() {
    let orchestrator = memory_orchestrator();
    let reports = orchestrator.analyze_batch(&batch(&[("a.py", "x = 1\n"), ("b.py", "(\n")]));

    let value = serde_json::to_value(&reports).unwrap();
    assert_eq!(value[0]["file"], "a.py");
    assert_eq!(value[0]["alerts"][0]["kind"], "UnusedVariable");
    assert_eq!(value[0]["alerts"][0]["variable_name"], "x");
    assert_eq!(value[1]["file"], "b.py");
    assert!(value[1]["error"].as_str().unwrap().contains("invalid syntax"));
    assert!(value[1].get("alerts").is_none());
}

#[test]
fn test_report_file_contents() {
    let orchestrator = memory_orchestrator();
    let reports = orchestrator.analyze_batch(&batch(&[("a.py", "x = 1\ny = 2\n")]));

    let dir = tempfile::tempdir().unwrap();
    let path = write_report(dir.path(), &reports).unwrap();
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "a.py: The variable 'x' is defined but never used.\n\
         a.py: The variable 'y' is defined but never used.\n"
    );
}

#[test]
fn test_from_config_uses_configured_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = CodeguardConfig {
        history: HistoryConfig {
            backend: HistoryBackend::Json,
            path: dir.path().join("nested").join("history.json"),
        },
        ..Default::default()
    };

    let orchestrator = AnalysisOrchestrator::from_config(&config).unwrap();
    orchestrator.analyze_file("x = 1\n", "a.py").unwrap();
    assert!(config.history.path.exists());

    let reopened = AnalysisOrchestrator::from_config(&config).unwrap();
    assert_eq!(reopened.trend("a.py").unwrap()[0].issue_count, 1);
}

#[test]
fn test_summary_and_trends() {
    let orchestrator = memory_orchestrator();
    let long = fixture_function_of_length("long", 30);
    let files = batch(&[("long.py", long.as_str()), ("bad.py", "def (:\n"), ("ok.py", "print(1)\n")]);

    let reports = orchestrator.analyze_batch(&files);
    let summary = AnalysisSummary::from_reports(&reports);
    assert_eq!(summary.issues_by_kind[&AlertKind::LongFunction], 1);
    assert_eq!(summary.long_functions[0].line_count, 30);
    assert_eq!(summary.failed_files, vec!["bad.py".to_string()]);

    let series = TrendSeries::collect(orchestrator.store(), &["long.py", "bad.py", "ok.py"]).unwrap();
    let files: Vec<&str> = series.iter().map(|s| s.file.as_str()).collect();
    assert_eq!(files, vec!["long.py", "ok.py"]);
    assert_eq!(series[0].points[0].issues, 1);
}
