//! Pipeline result types

use serde::Serialize;

use crate::features::rules::Alert;

/// Outcome of analyzing one file in a batch
///
/// Serializes as `{"file": ..., "alerts": [...]}` or
/// `{"file": ..., "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileOutcome {
    Alerts { alerts: Vec<Alert> },
    Error { error: String },
}

impl FileReport {
    pub fn alerts(file: impl Into<String>, alerts: Vec<Alert>) -> Self {
        Self {
            file: file.into(),
            outcome: FileOutcome::Alerts { alerts },
        }
    }

    pub fn error(file: impl Into<String>, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            outcome: FileOutcome::Error {
                error: error.to_string(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, FileOutcome::Error { .. })
    }

    /// Alerts of a successful analysis, empty for failures
    pub fn alert_list(&self) -> &[Alert] {
        match &self.outcome {
            FileOutcome::Alerts { alerts } => alerts,
            FileOutcome::Error { .. } => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            FileOutcome::Error { error } => Some(error),
            FileOutcome::Alerts { .. } => None,
        }
    }
}
