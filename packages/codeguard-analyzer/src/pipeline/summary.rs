//! Aggregated statistics for charting
//!
//! Chart rendering happens elsewhere; this module only produces the numbers:
//! issues per kind, issues per file, long-function lengths, and per-file
//! issue trends from the History Store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use codeguard_storage::HistoryStore;

use super::result::FileReport;
use crate::features::parsing::ports::Parser;
use crate::features::rules::{AlertDetail, AlertKind, RuleEngine};
use crate::shared::models::Result;

/// Issue statistics over a set of analyzed files
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Every kind is present, zero when nothing was found
    pub issues_by_kind: BTreeMap<AlertKind, usize>,
    /// Successfully analyzed files, input order
    pub issues_by_file: Vec<FileIssues>,
    pub long_functions: Vec<LongFunction>,
    pub failed_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileIssues {
    pub file: String,
    pub issues: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongFunction {
    pub file: String,
    pub function_name: String,
    pub line_count: usize,
}

impl AnalysisSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            issues_by_kind: AlertKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
            ..Default::default()
        };

        for report in reports {
            if report.is_error() {
                summary.failed_files.push(report.file.clone());
                continue;
            }

            let alerts = report.alert_list();
            summary.issues_by_file.push(FileIssues {
                file: report.file.clone(),
                issues: alerts.len(),
            });
            for alert in alerts {
                *summary.issues_by_kind.entry(alert.kind()).or_insert(0) += 1;
                if let AlertDetail::LongFunction {
                    function_name,
                    line_count,
                } = &alert.detail
                {
                    summary.long_functions.push(LongFunction {
                        file: report.file.clone(),
                        function_name: function_name.clone(),
                        line_count: *line_count,
                    });
                }
            }
        }
        summary
    }

    /// Analyze `(file_id, source)` pairs without recording history
    ///
    /// Files the engine's parser does not handle (by extension) are skipped.
    pub fn from_sources<P: Parser>(engine: &RuleEngine<P>, files: &[(String, String)]) -> Self {
        let reports: Vec<FileReport> = files
            .par_iter()
            .filter(|(file_id, _)| {
                let supported = engine.parser().supports_path(file_id);
                if !supported {
                    debug!(file_id = file_id.as_str(), "skipping unsupported file");
                }
                supported
            })
            .map(|(file_id, source)| match engine.analyze(source, file_id) {
                Ok(alerts) => FileReport::alerts(file_id.as_str(), alerts),
                Err(err) => FileReport::error(file_id.as_str(), err),
            })
            .collect();

        Self::from_reports(&reports)
    }

    pub fn total_issues(&self) -> usize {
        self.issues_by_kind.values().sum()
    }
}

/// One point of a trend line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub issues: u64,
}

/// Issue counts of one file over time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub file: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Series for `files`, in the given order; files without history are omitted
    pub fn collect<S, F>(store: &S, files: &[F]) -> Result<Vec<TrendSeries>>
    where
        S: HistoryStore + ?Sized,
        F: AsRef<str>,
    {
        let mut series = Vec::with_capacity(files.len());
        for file in files {
            let file = file.as_ref();
            let points: Vec<TrendPoint> = store
                .query(file)?
                .into_iter()
                .map(|record| TrendPoint {
                    timestamp: record.timestamp,
                    issues: record.issue_count,
                })
                .collect();
            if !points.is_empty() {
                series.push(TrendSeries {
                    file: file.to_string(),
                    points,
                });
            }
        }
        Ok(series)
    }

    /// Series for every file the store knows
    pub fn collect_all<S>(store: &S) -> Result<Vec<TrendSeries>>
    where
        S: HistoryStore + ?Sized,
    {
        let files = store.files()?;
        Self::collect(store, &files)
    }
}
