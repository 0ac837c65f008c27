//! Configuration
//!
//! Three ways to get a configuration, most common first:
//! - `CodeguardConfig::default()` (200-line files, 20-line functions,
//!   `analysis_history.json`)
//! - `CodeguardConfig::from_yaml(path)`
//! - either of the above followed by `with_env_overrides()`
//!
//! # Examples
//!
//! ```rust,ignore
//! use codeguard_analyzer::config::CodeguardConfig;
//!
//! let config = CodeguardConfig::from_yaml("codeguard.yaml")?.with_env_overrides()?;
//! ```
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! rules:
//!   max_file_lines: 200
//!   max_function_lines: 20
//! history:
//!   backend: json        # json | sqlite | memory
//!   path: analysis_history.json
//! report:
//!   retention_secs: 300
//! ```

pub mod error;
pub mod io;
pub mod sections;
pub mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ENV_HISTORY_BACKEND, ENV_HISTORY_PATH};
pub use sections::{HistoryBackend, HistoryConfig, ReportConfig, RuleConfig};
pub use validation::Validatable;

/// Complete, validated configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeguardConfig {
    pub rules: RuleConfig,
    pub history: HistoryConfig,
    pub report: ReportConfig,
}

impl CodeguardConfig {
    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file = ConfigFileV1::parse(content)?;
        let config = Self {
            rules: file.rules,
            history: file.history,
            report: file.report,
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as a v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigFileV1 {
            version: Some(1),
            rules: self.rules.clone(),
            history: self.history.clone(),
            report: self.report.clone(),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// Apply `CODEGUARD_HISTORY_*` variables from the process environment
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        io::apply_history_overrides(&mut self.history, lookup)?;
        self.validate()?;
        Ok(self)
    }
}

impl Validatable for CodeguardConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.rules.validate()?;
        self.history.validate()?;
        self.report.validate()
    }
}
