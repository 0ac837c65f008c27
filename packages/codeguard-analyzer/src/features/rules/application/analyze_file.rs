//! Analyze file use case

use tracing::debug;

use crate::config::RuleConfig;
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::ports::Parser;
use crate::features::rules::domain::Alert;
use crate::features::rules::infrastructure::{check_file_length, check_tree};
use crate::shared::models::Result;

/// Runs the detectors over one source text
///
/// Alerts come back ordered: the LongFile alert (if any), then function and
/// identifier alerts level by level, in the order Python's `ast.walk` visits
/// them, then UnusedVariable alerts.
pub struct RuleEngine<P: Parser = TreeSitterParser> {
    parser: P,
    config: RuleConfig,
}

impl RuleEngine {
    /// Python engine with the given thresholds
    pub fn new(config: RuleConfig) -> Self {
        Self::with_parser(TreeSitterParser::python(), config)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(RuleConfig::default())
    }
}

impl<P: Parser> RuleEngine<P> {
    pub fn with_parser(parser: P, config: RuleConfig) -> Self {
        Self { parser, config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse and check `source`
    ///
    /// Invalid source fails with an `ErrorKind::Parse` error and no alerts.
    pub fn analyze(&self, source: &str, file_id: &str) -> Result<Vec<Alert>> {
        let tree = self.parser.parse(source, file_id)?;
        let alerts = self.check(&tree);
        debug!(file_id, alerts = alerts.len(), "analyzed");
        Ok(alerts)
    }

    /// Check an already parsed tree
    pub fn check(&self, tree: &ParsedTree) -> Vec<Alert> {
        let mut alerts: Vec<Alert> =
            check_file_length(tree, self.config.max_file_lines).into_iter().collect();
        alerts.extend(check_tree(&tree.root, &self.config));
        alerts
    }
}
