//! Section configuration types
//!
//! Each YAML section has its own struct with defaults and validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

// ============================================================================
// Rule thresholds
// ============================================================================

/// Rule Engine thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// A file with more lines than this gets a LongFile alert
    pub max_file_lines: usize,

    /// A function spanning more lines than this gets a LongFunction alert
    pub max_function_lines: usize,
}

impl RuleConfig {
    pub const DEFAULT_MAX_FILE_LINES: usize = 200;
    pub const DEFAULT_MAX_FUNCTION_LINES: usize = 20;

    pub fn max_file_lines(mut self, value: usize) -> Self {
        self.max_file_lines = value;
        self
    }

    pub fn max_function_lines(mut self, value: usize) -> Self {
        self.max_function_lines = value;
        self
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_file_lines: Self::DEFAULT_MAX_FILE_LINES,
            max_function_lines: Self::DEFAULT_MAX_FUNCTION_LINES,
        }
    }
}

impl Validatable for RuleConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_file_lines == 0 {
            return Err(ConfigError::invalid_value(
                format!("{}.max_file_lines", self.config_name()),
                self.max_file_lines,
                "File length limit must be at least 1",
            ));
        }
        if self.max_function_lines == 0 {
            return Err(ConfigError::invalid_value(
                format!("{}.max_function_lines", self.config_name()),
                self.max_function_lines,
                "Function length limit must be at least 1",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "rules"
    }
}

// ============================================================================
// History persistence
// ============================================================================

/// History Store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Single JSON document on disk
    #[default]
    Json,
    /// SQLite database file
    Sqlite,
    /// Process-local, nothing persisted
    Memory,
}

impl HistoryBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryBackend::Json => "json",
            HistoryBackend::Sqlite => "sqlite",
            HistoryBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for HistoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(HistoryBackend::Json),
            "sqlite" => Ok(HistoryBackend::Sqlite),
            "memory" => Ok(HistoryBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Where analysis history is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub backend: HistoryBackend,

    /// Document or database path; ignored by the memory backend
    pub path: PathBuf,
}

impl HistoryConfig {
    pub const DEFAULT_PATH: &'static str = "analysis_history.json";

    pub fn memory() -> Self {
        Self {
            backend: HistoryBackend::Memory,
            ..Default::default()
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::Json,
            path: PathBuf::from(Self::DEFAULT_PATH),
        }
    }
}

impl Validatable for HistoryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.backend != HistoryBackend::Memory && self.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value(
                format!("{}.path", self.config_name()),
                "\"\"",
                format!("The {} backend needs a file path", self.backend),
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "history"
    }
}

// ============================================================================
// Report files
// ============================================================================

/// Alert report files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory for report files; the OS temp dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Seconds a report file lives before it is removed
    pub retention_secs: u64,
}

impl ReportConfig {
    pub const DEFAULT_RETENTION_SECS: u64 = 300;

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            retention_secs: Self::DEFAULT_RETENTION_SECS,
        }
    }
}

impl Validatable for ReportConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(dir) = &self.dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("{}.dir", self.config_name()),
                    "\"\"",
                    "Omit the field to use the system temp directory",
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "report"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults() {
        let rules = RuleConfig::default();
        assert_eq!(rules.max_file_lines, 200);
        assert_eq!(rules.max_function_lines, 20);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        let err = RuleConfig::default().max_file_lines(0).validate().unwrap_err();
        assert!(err.to_string().contains("rules.max_file_lines"));

        let err = RuleConfig::default()
            .max_function_lines(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("rules.max_function_lines"));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("json".parse::<HistoryBackend>().unwrap(), HistoryBackend::Json);
        assert_eq!("SQLite".parse::<HistoryBackend>().unwrap(), HistoryBackend::Sqlite);
        assert_eq!(" memory ".parse::<HistoryBackend>().unwrap(), HistoryBackend::Memory);
        assert!(matches!(
            "redis".parse::<HistoryBackend>(),
            Err(ConfigError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_history_path_required_for_file_backends() {
        let config = HistoryConfig {
            backend: HistoryBackend::Sqlite,
            path: PathBuf::new(),
        };
        assert!(config.validate().is_err());

        let memory = HistoryConfig {
            path: PathBuf::new(),
            ..HistoryConfig::memory()
        };
        assert!(memory.validate().is_ok());
    }

    #[test]
    fn test_report_defaults() {
        let report = ReportConfig::default();
        assert_eq!(report.retention(), Duration::from_secs(300));
        assert_eq!(report.resolved_dir(), std::env::temp_dir());
    }
}
