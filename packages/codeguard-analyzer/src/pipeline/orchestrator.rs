//! Analysis orchestrator
//!
//! Runs the Rule Engine, then records the alert count in the History Store.

use rayon::prelude::*;
use tracing::{info, warn};

use codeguard_storage::{HistoryRecord, HistoryStore};

use super::history::open_history_store;
use super::result::FileReport;
use crate::config::CodeguardConfig;
use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::ports::Parser;
use crate::features::rules::{Alert, RuleEngine};
use crate::shared::models::Result;

/// Analysis orchestrator
pub struct AnalysisOrchestrator<S, P = TreeSitterParser>
where
    S: HistoryStore,
    P: Parser,
{
    engine: RuleEngine<P>,
    store: S,
}

impl AnalysisOrchestrator<Box<dyn HistoryStore>> {
    /// Python engine plus the configured history backend
    pub fn from_config(config: &CodeguardConfig) -> Result<Self> {
        let store = open_history_store(&config.history)?;
        Ok(Self::new(RuleEngine::new(config.rules.clone()), store))
    }
}

impl<S, P> AnalysisOrchestrator<S, P>
where
    S: HistoryStore,
    P: Parser,
{
    pub fn new(engine: RuleEngine<P>, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &RuleEngine<P> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analyze one file and record its alert count
    ///
    /// A parse error propagates and nothing is recorded.
    pub fn analyze_file(&self, source: &str, file_id: &str) -> Result<Vec<Alert>> {
        let alerts = self.engine.analyze(source, file_id)?;
        self.store.record_now(file_id, alerts.len() as u64)?;
        info!(file_id, issues = alerts.len(), "analysis recorded");
        Ok(alerts)
    }

    /// Analyze `(file_id, source)` pairs
    ///
    /// Files are analyzed in parallel; history is then recorded sequentially
    /// in input order. A failing file becomes an error entry and never stops
    /// the batch.
    pub fn analyze_batch(&self, files: &[(String, String)]) -> Vec<FileReport> {
        let analyzed: Vec<_> = files
            .par_iter()
            .map(|(file_id, source)| (file_id, self.engine.analyze(source, file_id)))
            .collect();

        analyzed
            .into_iter()
            .map(|(file_id, result)| {
                let recorded = result.and_then(|alerts| {
                    self.store.record_now(file_id, alerts.len() as u64)?;
                    Ok(alerts)
                });
                match recorded {
                    Ok(alerts) => FileReport::alerts(file_id.as_str(), alerts),
                    Err(err) => {
                        warn!(file_id = file_id.as_str(), error = %err, "analysis failed");
                        FileReport::error(file_id.as_str(), err)
                    }
                }
            })
            .collect()
    }

    /// Recorded issue counts for `file_id`, oldest first
    pub fn trend(&self, file_id: &str) -> Result<Vec<HistoryRecord>> {
        Ok(self.store.query(file_id)?)
    }
}
